// Business domains
pub mod feed;
pub mod graph;
pub mod matching;
pub mod posting;

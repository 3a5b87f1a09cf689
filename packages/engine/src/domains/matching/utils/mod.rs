pub mod compatibility;
pub mod relevance;

pub use compatibility::match_score;
pub use relevance::{relevance_score, skills_equal, skills_related};

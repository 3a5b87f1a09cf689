// Graph domain - derived node/edge view of the current posting collection

pub mod builder;
pub mod models;

pub use builder::{build_graph, build_graph_with_threshold, SkillGraph, DEFAULT_MATCH_THRESHOLD};
pub use models::{Connection, ConnectionKind, GraphNode, Position};

pub mod connection;
pub mod node;

pub use connection::{Connection, ConnectionKind};
pub use node::{GraphNode, Position};

use serde::Serialize;

use crate::common::PostingKey;
use crate::domains::posting::{Posting, PostingKind};

/// Layout position assigned by the builder. Presentation hint only:
/// deterministic for a given sorted node order, but carries no meaning
/// beyond "more relevant clusters toward the top".
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A posting wrapped with its per-viewer ranking signal and layout hint.
///
/// Derived and ephemeral: nodes are recomputed from scratch on every pass
/// and never persisted. The ask/offer variant rides on the wrapped posting.
#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    pub relevance: f64,
    pub position: Position,
    #[serde(flatten)]
    pub posting: Posting,
}

impl GraphNode {
    pub fn key(&self) -> &PostingKey {
        self.posting.key()
    }

    pub fn kind(&self) -> PostingKind {
        self.posting.kind
    }
}

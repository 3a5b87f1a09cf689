//! Graph construction: postings + viewer + now → ranked nodes and
//! deduplicated connections.
//!
//! All-pairs comparison makes this O(n²) in live postings. Fine for the
//! session sizes this engine serves; revisit before pointing it at
//! thousands of postings.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::common::ViewerContext;
use crate::domains::matching::{match_score, relevance_score, skills_equal};
use crate::domains::posting::{Posting, PostingKind};

use super::models::{Connection, GraphNode, Position};

/// Default minimum match score for a match connection to be emitted.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.2;

/// Horizontal spacing between columns.
const COLUMN_SPACING: f64 = 120.0;

/// Vertical spacing below the first row; grows per row so the most
/// relevant rows sit tightly clustered at the top.
const ROW_SPACING_BASE: f64 = 70.0;
const ROW_SPACING_STEP: f64 = 25.0;

/// The derived graph handed to the UI collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct SkillGraph {
    pub nodes: Vec<GraphNode>,
    pub connections: Vec<Connection>,
}

/// Build the graph with the default match threshold.
pub fn build_graph(postings: &[Posting], viewer: &ViewerContext, now: DateTime<Utc>) -> SkillGraph {
    build_graph_with_threshold(postings, viewer, now, DEFAULT_MATCH_THRESHOLD)
}

/// Build the graph with a custom match threshold (config override).
pub fn build_graph_with_threshold(
    postings: &[Posting],
    viewer: &ViewerContext,
    now: DateTime<Utc>,
    match_threshold: f64,
) -> SkillGraph {
    // 1. Score and rank. Stable sort: ties keep collection order, which the
    //    reducer maintains as most-recent-first.
    let mut nodes: Vec<GraphNode> = postings
        .iter()
        .map(|posting| GraphNode {
            relevance: relevance_score(posting, viewer, now),
            position: Position { x: 0.0, y: 0.0 },
            posting: posting.clone(),
        })
        .collect();
    nodes.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(Ordering::Equal)
    });

    // 2. Deterministic layout over the sorted order.
    assign_positions(&mut nodes);

    // 3+4. Connections, deduplicated by unordered endpoint pair per kind.
    let connections = dedupe_connections(collect_connections(&nodes, now, match_threshold));

    debug!(
        nodes = nodes.len(),
        connections = connections.len(),
        "Built skill graph"
    );

    SkillGraph { nodes, connections }
}

/// Partition nodes into rows of `ceil(sqrt(n))` columns; earlier (more
/// relevant) rows get smaller vertical spacing.
fn assign_positions(nodes: &mut [GraphNode]) {
    if nodes.is_empty() {
        return;
    }
    let columns = (nodes.len() as f64).sqrt().ceil() as usize;
    for (index, node) in nodes.iter_mut().enumerate() {
        let row = index / columns;
        let col = index % columns;
        // y(row) = sum of the spacings of all rows above it
        let row_f = row as f64;
        let y = row_f * ROW_SPACING_BASE + ROW_SPACING_STEP * row_f * (row_f - 1.0) / 2.0;
        node.position = Position {
            x: col as f64 * COLUMN_SPACING,
            y,
        };
    }
}

fn collect_connections(
    nodes: &[GraphNode],
    now: DateTime<Utc>,
    match_threshold: f64,
) -> Vec<Connection> {
    let mut connections = Vec::new();

    // Skill connections: every unordered pair with the same skill string.
    for (i, a) in nodes.iter().enumerate() {
        for b in nodes.iter().skip(i + 1) {
            if skills_equal(a.posting.skill(), b.posting.skill()) {
                connections.push(Connection::skill(a.key().clone(), b.key().clone()));
            }
        }
    }

    // Match connections: every ask × offer pair with distinct wallets.
    // The scorer is always called as (ask, offer), never swapped.
    for a in nodes {
        for b in nodes {
            let (ask, offer) = match (a.kind(), b.kind()) {
                (PostingKind::Ask, PostingKind::Offer) => (&a.posting, &b.posting),
                _ => continue,
            };
            if ask.wallet() == offer.wallet() {
                continue;
            }
            let score = match_score(ask, offer, now);
            if score > match_threshold {
                connections.push(Connection::matched(
                    ask.key().clone(),
                    offer.key().clone(),
                    score,
                ));
            }
        }
    }

    connections
}

/// Drop duplicate connections for the same unordered endpoint pair and
/// kind, keeping the first discovered. Skill and match connections for the
/// same pair coexist.
pub fn dedupe_connections(connections: Vec<Connection>) -> Vec<Connection> {
    let mut seen = HashSet::new();
    connections
        .into_iter()
        .filter(|connection| seen.insert(connection.pair_key()))
        .collect()
}

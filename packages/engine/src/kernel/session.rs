//! The per-viewer session loop.
//!
//! Owns the feed reducer state for one viewing session, folds fetches and
//! pushed events into it, and recomputes the ranked graph + expiry pairs on
//! every state change. A low-frequency tick re-evaluates expiry so the
//! remaining-time values the UI shows stay current; the tick never fetches.
//!
//! Single writer: the loop is the only code touching the working
//! collection, so event order is exactly arrival order. Scoring is
//! synchronous and side-effect-free; nothing in here is fatal; failures
//! degrade to the last published snapshot.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

use crate::common::{PostingKey, SpaceId, ViewerContext};
use crate::config::Config;
use crate::domains::feed::{FeedEvent, FeedState};
use crate::domains::graph::{build_graph_with_threshold, Connection, GraphNode};
use crate::domains::posting::{evaluate_expiry, Posting};

use super::stream_hub::StreamHub;
use super::traits::{BasePostingStore, BasePostingStream};

/// Per-posting `{remaining_ms, expired}` pair, produced alongside the graph.
#[derive(Debug, Clone, Serialize)]
pub struct PostingExpiry {
    pub key: PostingKey,
    pub remaining_ms: i64,
    pub expired: bool,
}

/// What a session publishes after every recomputation pass.
#[derive(Debug, Clone, Serialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<GraphNode>,
    pub connections: Vec<Connection>,
    pub expiry: Vec<PostingExpiry>,
}

/// One viewer's live session over a space.
pub struct ViewSession {
    viewer: ViewerContext,
    space: SpaceId,
    config: Config,
    hub: StreamHub,
    state: FeedState,
}

impl ViewSession {
    pub fn new(viewer: ViewerContext, space: SpaceId, config: Config, hub: StreamHub) -> Self {
        Self {
            viewer,
            space,
            config,
            hub,
            state: FeedState::new(),
        }
    }

    /// Hub topic this session publishes graph snapshots to.
    pub fn topic(&self) -> String {
        format!("graph:{}", self.viewer.wallet)
    }

    /// Fetch a full collection (optionally skill-filtered), fold it in, and
    /// publish the recomputed graph.
    pub async fn load(
        &mut self,
        store: &dyn BasePostingStore,
        skill_filter: Option<&str>,
    ) -> Result<()> {
        let response = store
            .fetch(&self.space, skill_filter)
            .await
            .context("Failed to fetch posting collection")?;

        self.state.apply(FeedEvent::decode_snapshot(
            &response.asks,
            &response.offers,
            skill_filter.map(String::from),
        ));
        self.publish(Utc::now()).await;
        Ok(())
    }

    /// Fold one raw push message in. Malformed messages are logged and
    /// skipped, a per-item defect rather than an abort.
    pub async fn apply_push(&mut self, message: &Value) {
        match FeedEvent::decode_push(message) {
            Ok(event) => {
                self.state.apply(event);
                self.publish(Utc::now()).await;
            }
            Err(e) => {
                warn!(error = %e, "Skipping malformed push message");
            }
        }
    }

    /// Recompute the ranked graph and expiry pairs from the current
    /// collection. Pure function of (state, viewer, now).
    pub fn snapshot(&self, now: DateTime<Utc>) -> GraphSnapshot {
        let postings: Vec<Posting> = self
            .state
            .collection()
            .map(|collection| collection.postings())
            .unwrap_or_default();

        let graph = build_graph_with_threshold(
            &postings,
            &self.viewer,
            now,
            self.config.match_threshold,
        );
        let expiry = postings
            .iter()
            .map(|posting| {
                let state = evaluate_expiry(posting.created_at(), posting.ttl_seconds(), now);
                PostingExpiry {
                    key: posting.key().clone(),
                    remaining_ms: state.remaining_ms,
                    expired: state.expired,
                }
            })
            .collect();

        GraphSnapshot {
            nodes: graph.nodes,
            connections: graph.connections,
            expiry,
        }
    }

    async fn publish(&self, now: DateTime<Utc>) {
        let snapshot = self.snapshot(now);
        match serde_json::to_value(&snapshot) {
            Ok(value) => {
                let delivered = self.hub.publish(&self.topic(), value).await;
                debug!(
                    topic = %self.topic(),
                    nodes = snapshot.nodes.len(),
                    connections = snapshot.connections.len(),
                    delivered,
                    "Published graph snapshot"
                );
            }
            Err(e) => {
                // Last good snapshot stays current for subscribers
                error!(error = %e, "Failed to serialize graph snapshot");
            }
        }
    }

    /// Run the session to completion: initial fetch, then fold pushed
    /// events and refresh ticks until the subscription ends or the session
    /// is cancelled. Dropping the future tears the subscription down.
    pub async fn run(
        mut self,
        store: Arc<dyn BasePostingStore>,
        stream: Arc<dyn BasePostingStream>,
        skill_filter: Option<&str>,
    ) -> Result<()> {
        let mut rx = stream
            .subscribe(&self.space)
            .await
            .context("Failed to subscribe to push stream")?;
        // Hold only the receiver: the store side owns the channel lifetime,
        // and a dropped producer must surface here as StreamClosed.
        drop(stream);

        self.load(store.as_ref(), skill_filter).await?;
        info!(space = %self.space, wallet = %self.viewer.wallet, "View session started");

        let mut refresh = tokio::time::interval(std::time::Duration::from_secs(
            self.config.refresh_interval_secs.max(1),
        ));
        refresh.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        refresh.tick().await; // first tick completes immediately

        loop {
            tokio::select! {
                received = rx.recv() => match received {
                    Ok(message) => self.apply_push(&message).await,
                    Err(RecvError::Lagged(skipped)) => {
                        self.state.apply(FeedEvent::StreamLagged { skipped });
                    }
                    Err(RecvError::Closed) => {
                        self.state.apply(FeedEvent::StreamClosed {
                            reason: "subscription ended".to_string(),
                        });
                        break;
                    }
                },
                _ = refresh.tick() => {
                    // Expiry and recency drift with the clock even when no
                    // events arrive
                    self.publish(Utc::now()).await;
                }
            }
        }

        info!(space = %self.space, wallet = %self.viewer.wallet, "View session ended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::WalletId;
    use crate::kernel::test_dependencies::MockPostingStore;
    use crate::kernel::traits::FetchResponse;
    use chrono::TimeZone;
    use serde_json::json;

    fn posting_json(key: &str, skill: &str, wallet: &str) -> Value {
        json!({
            "key": key,
            "wallet": wallet,
            "skill": skill,
            "spaceId": "mentorship",
            "createdAt": 0,
            "ttlSeconds": 3600,
            "message": "",
            "status": "open"
        })
    }

    fn session() -> (ViewSession, StreamHub) {
        let hub = StreamHub::new();
        let session = ViewSession::new(
            ViewerContext::new(WalletId::new("0xviewer"), ["rust"]),
            SpaceId::new("mentorship"),
            Config::default(),
            hub.clone(),
        );
        (session, hub)
    }

    #[tokio::test]
    async fn test_load_publishes_ranked_snapshot() {
        let (mut session, hub) = session();
        let mut rx = hub.subscribe("graph:0xviewer").await;

        let store = MockPostingStore::new().on_fetch(
            None,
            FetchResponse {
                asks: vec![posting_json("a", "rust", "0xother")],
                offers: vec![posting_json("o", "rust", "0xmentor")],
                ..Default::default()
            },
        );
        session.load(&store, None).await.unwrap();

        let published = rx.recv().await.unwrap();
        assert_eq!(published["nodes"].as_array().unwrap().len(), 2);
        assert_eq!(published["expiry"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_push_is_skipped_without_state_change() {
        let (mut session, _hub) = session();
        let store = MockPostingStore::new();
        session.load(&store, None).await.unwrap();

        session.apply_push(&json!({"nonsense": true})).await;

        let now = Utc.timestamp_millis_opt(0).unwrap();
        assert!(session.snapshot(now).nodes.is_empty());
    }

    #[tokio::test]
    async fn test_push_then_snapshot_includes_posting() {
        let (mut session, _hub) = session();
        let store = MockPostingStore::new();
        session.load(&store, None).await.unwrap();

        session
            .apply_push(&json!({"kind": "ask", "posting": posting_json("p1", "rust", "0xother")}))
            .await;

        let now = Utc.timestamp_millis_opt(0).unwrap();
        let snapshot = session.snapshot(now);
        assert_eq!(snapshot.nodes.len(), 1);
        assert_eq!(snapshot.expiry[0].remaining_ms, 3_600_000);
        assert!(!snapshot.expiry[0].expired);
    }

    #[tokio::test]
    async fn test_snapshot_expiry_tracks_now() {
        let (mut session, _hub) = session();
        let store = MockPostingStore::new().on_fetch(
            None,
            FetchResponse {
                asks: vec![posting_json("a", "rust", "0xother")],
                ..Default::default()
            },
        );
        session.load(&store, None).await.unwrap();

        let later = Utc.timestamp_millis_opt(2 * 3_600_000).unwrap();
        let snapshot = session.snapshot(later);
        assert!(snapshot.expiry[0].expired);
        assert_eq!(snapshot.expiry[0].remaining_ms, -3_600_000);
    }
}

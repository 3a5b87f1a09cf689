//! In-process pub/sub hub for the engine's two real-time flows.
//!
//! Topics are opaque strings, payloads `serde_json::Value`:
//!
//! - `postings:<space>`: creation events from the store client, consumed
//!   by the session loop's reducer
//! - `graph:<wallet>`: recomputed graph snapshots, consumed by the UI
//!   collaborator
//!
//! One logical channel per topic; subscribers that fall behind observe a
//! lagged receive rather than blocking the producer.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

#[derive(Clone)]
pub struct StreamHub {
    channels: Arc<RwLock<HashMap<String, broadcast::Sender<serde_json::Value>>>>,
    capacity: usize,
}

impl StreamHub {
    /// Default capacity matches `Config::default().hub_capacity`.
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            capacity,
        }
    }

    /// Publish to a topic. Returns how many receivers got the message
    /// (0 when nobody is listening; never an error).
    pub async fn publish(&self, topic: &str, value: serde_json::Value) -> usize {
        let channels = self.channels.read().await;
        match channels.get(topic) {
            Some(tx) => tx.send(value).unwrap_or(0),
            None => 0,
        }
    }

    /// Subscribe to a topic, creating its channel on first use.
    pub async fn subscribe(&self, topic: &str) -> broadcast::Receiver<serde_json::Value> {
        let mut channels = self.channels.write().await;
        let tx = channels
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0);
        tx.subscribe()
    }

    /// Drop channels nobody subscribes to anymore (session teardown).
    pub async fn cleanup(&self) {
        let mut channels = self.channels.write().await;
        channels.retain(|_, tx| tx.receiver_count() > 0);
    }
}

impl Default for StreamHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let hub = StreamHub::new();
        let mut rx = hub.subscribe("postings:mentorship").await;

        let event = json!({"kind": "ask", "posting": {"key": "p1"}});
        let delivered = hub.publish("postings:mentorship", event.clone()).await;

        assert_eq!(delivered, 1);
        assert_eq!(rx.recv().await.unwrap(), event);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_returns_zero() {
        let hub = StreamHub::new();
        let delivered = hub.publish("graph:0xnobody", json!({})).await;
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn test_topics_are_isolated() {
        let hub = StreamHub::new();
        let mut graph_rx = hub.subscribe("graph:0xa").await;
        let _postings_rx = hub.subscribe("postings:s").await;

        hub.publish("graph:0xa", json!({"nodes": []})).await;
        assert_eq!(graph_rx.recv().await.unwrap(), json!({"nodes": []}));
        assert!(graph_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_cleanup_drops_abandoned_channels() {
        let hub = StreamHub::new();
        let rx = hub.subscribe("graph:0xa").await;
        drop(rx);
        hub.cleanup().await;
        assert_eq!(hub.publish("graph:0xa", json!({})).await, 0);
    }
}

// Trait definitions for the engine's external collaborators
//
// These are INFRASTRUCTURE traits only - no business logic. The append-only
// entity store and its subscribe surface live behind them; the engine never
// talks to storage directly.
//
// Naming convention: Base* for trait names (e.g., BasePostingStore)

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::common::SpaceId;

/// Shape of a fetch response from the store's query surface.
///
/// Posting items are kept as raw JSON so decoding can be lenient per item:
/// one malformed record must not abort the snapshot (see
/// `FeedEvent::decode_snapshot`). Profiles are optional; an engine that
/// receives none still ranks and matches.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FetchResponse {
    #[serde(default)]
    pub asks: Vec<Value>,
    #[serde(default)]
    pub offers: Vec<Value>,
    #[serde(default)]
    pub profiles: Vec<Value>,
}

/// Query surface of the append-only entity store.
#[async_trait]
pub trait BasePostingStore: Send + Sync {
    /// Fetch the full posting collection for a space, optionally filtered
    /// server-side by skill.
    async fn fetch(&self, space: &SpaceId, skill_filter: Option<&str>) -> Result<FetchResponse>;
}

/// Subscribe surface of the store: one long-lived channel of creation
/// events per viewing session, delivered in creation order. Messages are
/// `{ "kind": "ask" | "offer", "posting": { ... } }`.
#[async_trait]
pub trait BasePostingStream: Send + Sync {
    async fn subscribe(&self, space: &SpaceId) -> Result<broadcast::Receiver<Value>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_response_tolerates_missing_fields() {
        let response: FetchResponse = serde_json::from_value(serde_json::json!({
            "asks": [{"key": "a"}]
        }))
        .unwrap();
        assert_eq!(response.asks.len(), 1);
        assert!(response.offers.is_empty());
        assert!(response.profiles.is_empty());
    }
}

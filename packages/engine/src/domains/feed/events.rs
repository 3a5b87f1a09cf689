//! Feed domain events and their wire decoding.
//!
//! The store's query/subscribe surface hands us JSON: a fetch response with
//! `asks` / `offers` arrays, and one push message per creation event shaped
//! `{ "kind": "ask" | "offer", "posting": { ... } }`. Decoding is lenient
//! per item: a malformed posting is logged and skipped so one bad record
//! never aborts a whole recomputation.

use serde_json::Value;
use tracing::warn;

use crate::domains::posting::{Posting, PostingKind, PostingRecord};

use super::errors::FeedError;

/// Feed domain events, folded one at a time by the reducer.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// A full-collection fetch result. Replaces the working collection
    /// wholesale and records the skill filter it was produced under.
    SnapshotLoaded {
        asks: Vec<Posting>,
        offers: Vec<Posting>,
        skill_filter: Option<String>,
    },

    /// One creation event pushed over the live subscription.
    PostingPushed { posting: Posting },

    /// The broadcast receiver fell behind and dropped messages. Non-fatal;
    /// the next snapshot heals the gap.
    StreamLagged { skipped: u64 },

    /// The subscription ended. Non-fatal; no reconnect policy is defined.
    StreamClosed { reason: String },
}

impl FeedEvent {
    /// Decode one push-stream message.
    ///
    /// Errors are per-message defects the caller should skip, not abort on.
    pub fn decode_push(value: &Value) -> Result<Self, FeedError> {
        let kind: PostingKind = value
            .get("kind")
            .and_then(Value::as_str)
            .ok_or_else(|| FeedError::MalformedEvent("missing kind".to_string()))?
            .parse()
            .map_err(|e: anyhow::Error| FeedError::MalformedEvent(e.to_string()))?;

        let record: PostingRecord = serde_json::from_value(
            value
                .get("posting")
                .cloned()
                .ok_or_else(|| FeedError::MalformedEvent("missing posting".to_string()))?,
        )?;

        Ok(FeedEvent::PostingPushed {
            posting: record.into_posting(kind),
        })
    }

    /// Decode a fetch response's posting arrays into a snapshot event,
    /// skipping (and logging) any item that fails to decode.
    pub fn decode_snapshot(
        asks: &[Value],
        offers: &[Value],
        skill_filter: Option<String>,
    ) -> Self {
        FeedEvent::SnapshotLoaded {
            asks: decode_postings(asks, PostingKind::Ask),
            offers: decode_postings(offers, PostingKind::Offer),
            skill_filter,
        }
    }
}

fn decode_postings(values: &[Value], kind: PostingKind) -> Vec<Posting> {
    values
        .iter()
        .filter_map(|value| match serde_json::from_value::<PostingRecord>(value.clone()) {
            Ok(record) => Some(record.into_posting(kind)),
            Err(e) => {
                warn!(kind = %kind, error = %e, "Skipping malformed posting in fetch response");
                None
            }
        })
        .collect()
}

//! Mock store and stream implementations for tests and the demo binary.
//!
//! `MockPostingStore` serves scripted fetch responses keyed by skill
//! filter; `MockPostingStream` is a hand-driven push channel.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::common::SpaceId;

use super::traits::{BasePostingStore, BasePostingStream, FetchResponse};

/// In-memory store with one scripted response per skill filter.
#[derive(Default)]
pub struct MockPostingStore {
    responses: Mutex<HashMap<Option<String>, FetchResponse>>,
    pub fetch_count: Mutex<usize>,
}

impl MockPostingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the response served for a given skill filter (None = unfiltered).
    pub fn on_fetch(self, skill_filter: Option<&str>, response: FetchResponse) -> Self {
        self.responses
            .lock()
            .expect("mock store lock")
            .insert(skill_filter.map(String::from), response);
        self
    }
}

#[async_trait]
impl BasePostingStore for MockPostingStore {
    async fn fetch(&self, _space: &SpaceId, skill_filter: Option<&str>) -> Result<FetchResponse> {
        *self.fetch_count.lock().expect("mock store lock") += 1;
        let responses = self.responses.lock().expect("mock store lock");
        Ok(responses
            .get(&skill_filter.map(String::from))
            .cloned()
            .unwrap_or_default())
    }
}

/// Hand-driven push stream: tests call `push` to emit creation events.
pub struct MockPostingStream {
    tx: broadcast::Sender<Value>,
}

impl MockPostingStream {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(64);
        Self { tx }
    }

    /// Emit one push message to every subscribed session. Returns receiver
    /// count, zero when no session is listening.
    pub fn push(&self, message: Value) -> usize {
        self.tx.send(message).unwrap_or(0)
    }
}

impl Default for MockPostingStream {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BasePostingStream for MockPostingStream {
    async fn subscribe(&self, _space: &SpaceId) -> Result<broadcast::Receiver<Value>> {
        Ok(self.tx.subscribe())
    }
}

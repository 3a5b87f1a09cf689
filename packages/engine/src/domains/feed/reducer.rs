//! Live merge reducer.
//!
//! Folds fetch results and pushed creation events into the working posting
//! collection. The reducer is the sole writer of that collection; it
//! performs no I/O and runs for the lifetime of a viewing session.
//!
//! State machine: `Uninitialized → Loaded` on the first snapshot, then
//! `Loaded → Loaded` forever. There is no terminal state.

use tracing::{debug, info, warn};

use crate::domains::posting::Posting;

use super::events::FeedEvent;
use super::filter::FeedFilter;

/// The working collection while loaded.
#[derive(Debug, Clone, Default)]
pub struct FeedCollection {
    /// Most-recent-first; part of the contract, not incidental.
    pub asks: Vec<Posting>,
    pub offers: Vec<Posting>,
    /// Skill filter the current snapshot was fetched under; gates admission
    /// of pushed events.
    pub skill_filter: Option<String>,
}

impl FeedCollection {
    /// All live postings, asks first. Order within each list is
    /// most-recent-first.
    pub fn postings(&self) -> Vec<Posting> {
        self.asks.iter().chain(self.offers.iter()).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.asks.len() + self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asks.is_empty() && self.offers.is_empty()
    }

    fn contains_key(&self, posting: &Posting) -> bool {
        self.asks
            .iter()
            .chain(self.offers.iter())
            .any(|existing| existing.key() == posting.key())
    }
}

/// Reducer state.
#[derive(Debug, Clone, Default)]
pub enum FeedState {
    /// No snapshot yet. Pushed events arriving here are dropped; only a
    /// fetch establishes the collection.
    #[default]
    Uninitialized,
    Loaded(FeedCollection),
}

impl FeedState {
    pub fn new() -> Self {
        FeedState::Uninitialized
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, FeedState::Loaded(_))
    }

    pub fn collection(&self) -> Option<&FeedCollection> {
        match self {
            FeedState::Uninitialized => None,
            FeedState::Loaded(collection) => Some(collection),
        }
    }

    /// Fold one event into the state.
    pub fn apply(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::SnapshotLoaded {
                asks,
                offers,
                skill_filter,
            } => {
                info!(
                    asks = asks.len(),
                    offers = offers.len(),
                    filter = skill_filter.as_deref().unwrap_or("<none>"),
                    "Snapshot loaded, replacing working collection"
                );
                *self = FeedState::Loaded(FeedCollection {
                    asks,
                    offers,
                    skill_filter,
                });
            }

            FeedEvent::PostingPushed { posting } => {
                let FeedState::Loaded(collection) = self else {
                    debug!(key = %posting.key(), "Dropping push before first snapshot");
                    return;
                };

                if !FeedFilter::admits_push(collection.skill_filter.as_deref(), posting.skill()) {
                    debug!(
                        key = %posting.key(),
                        skill = posting.skill(),
                        filter = collection.skill_filter.as_deref().unwrap_or(""),
                        "Pushed posting does not match active filter, dropped"
                    );
                    return;
                }

                // Idempotent by key: the store promises exactly-once, but
                // at-least-once delivery must not duplicate a posting.
                if collection.contains_key(&posting) {
                    debug!(key = %posting.key(), "Duplicate push for known key, dropped");
                    return;
                }

                debug!(key = %posting.key(), kind = %posting.kind, "Admitting pushed posting");
                if posting.is_ask() {
                    collection.asks.insert(0, posting);
                } else {
                    collection.offers.insert(0, posting);
                }
            }

            FeedEvent::StreamLagged { skipped } => {
                warn!(skipped, "Push stream lagged; collection may be stale until next fetch");
            }

            FeedEvent::StreamClosed { reason } => {
                info!(reason = %reason, "Push stream closed");
            }
        }
    }
}

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{PostingKey, SpaceId, WalletId};

/// Ask or Offer, the two posting variants.
///
/// The variant lives on the stream envelope and the fetch response arrays,
/// not inside the stored posting record, so the wire shape is
/// [`PostingRecord`] and the tagged in-memory shape is [`Posting`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PostingKind {
    Ask,
    Offer,
}

impl std::fmt::Display for PostingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostingKind::Ask => write!(f, "ask"),
            PostingKind::Offer => write!(f, "offer"),
        }
    }
}

impl std::str::FromStr for PostingKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ask" => Ok(PostingKind::Ask),
            "offer" => Ok(PostingKind::Offer),
            _ => Err(anyhow::anyhow!("Invalid posting kind: {}", s)),
        }
    }
}

/// A posting as the entity store serializes it.
///
/// Append-only: records are immutable once created. "Editing" in the
/// surrounding system means writing a new record; the engine only ever
/// reads these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostingRecord {
    pub key: PostingKey,
    pub wallet: WalletId,
    pub skill: String,
    pub space_id: SpaceId,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Seconds after creation at which the posting counts as expired.
    /// Not validated upstream; a negative value simply reads as already
    /// expired (see `utils::expiry`).
    pub ttl_seconds: i64,
    pub message: String,
    pub status: String,
    /// Offers only: free-text availability window ("weekday evenings").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_window: Option<String>,
}

impl PostingRecord {
    /// Tag the record with the variant its envelope / response array carried.
    pub fn into_posting(self, kind: PostingKind) -> Posting {
        Posting { kind, record: self }
    }
}

/// A variant-tagged posting: what the reducer holds and the scorers read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Posting {
    pub kind: PostingKind,
    #[serde(flatten)]
    pub record: PostingRecord,
}

impl Posting {
    pub fn key(&self) -> &PostingKey {
        &self.record.key
    }

    pub fn wallet(&self) -> &WalletId {
        &self.record.wallet
    }

    pub fn skill(&self) -> &str {
        &self.record.skill
    }

    pub fn space_id(&self) -> &SpaceId {
        &self.record.space_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.record.created_at
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.record.ttl_seconds
    }

    pub fn is_ask(&self) -> bool {
        self.kind == PostingKind::Ask
    }

    pub fn is_offer(&self) -> bool {
        self.kind == PostingKind::Offer
    }
}

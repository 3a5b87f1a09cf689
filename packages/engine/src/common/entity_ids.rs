//! Typed identifier definitions for the engine's entities.
//!
//! The entity store hands us opaque strings for posting keys, wallet
//! identities, and space partitions. Wrapping each in its own newtype keeps
//! them from being mixed up at compile time.
//!
//! # Example
//!
//! ```rust
//! use engine_core::common::{PostingKey, WalletId};
//!
//! let key = PostingKey::new("uhCEk...a9");
//! let wallet = WalletId::new("0x4f2a");
//!
//! // This would be a compile error:
//! // let wrong: WalletId = key;
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! opaque_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

opaque_id! {
    /// Opaque unique key of a posting, assigned by the append-only store.
    PostingKey
}

opaque_id! {
    /// Wallet identity string. Equality is exact: identity strings are
    /// canonical and never case-folded.
    WalletId
}

opaque_id! {
    /// Partitioning identifier. Postings only match within the same space.
    SpaceId
}

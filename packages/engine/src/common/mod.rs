// Common types and utilities shared across the engine

pub mod entity_ids;
pub mod types;

pub use entity_ids::{PostingKey, SpaceId, WalletId};
pub use types::ViewerContext;

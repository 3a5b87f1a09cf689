// Posting domain - the immutable ask/offer records and their TTL math

pub mod models;
pub mod utils;

pub use models::{Posting, PostingKind, PostingRecord, Profile};
pub use utils::{evaluate_expiry, remaining_minutes, ExpiryState};

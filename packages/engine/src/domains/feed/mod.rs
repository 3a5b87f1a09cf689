// Feed domain - live merge of fetches and pushed events into the working
// posting collection

pub mod errors;
pub mod events;
pub mod filter;
pub mod reducer;

pub use errors::FeedError;
pub use events::FeedEvent;
pub use filter::{FeedFilter, MentorRole, RatingRange, TtlBucket};
pub use reducer::{FeedCollection, FeedState};

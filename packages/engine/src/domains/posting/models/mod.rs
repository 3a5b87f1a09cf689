pub mod posting;
pub mod profile;

pub use posting::{Posting, PostingKind, PostingRecord};
pub use profile::Profile;

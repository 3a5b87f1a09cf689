//! Kernel module - engine infrastructure and external collaborators.

pub mod session;
pub mod stream_hub;
pub mod test_dependencies;
pub mod traits;

pub use session::{GraphSnapshot, PostingExpiry, ViewSession};
pub use stream_hub::StreamHub;
pub use test_dependencies::{MockPostingStore, MockPostingStream};
pub use traits::{BasePostingStore, BasePostingStream, FetchResponse};

use thiserror::Error;

/// Feed-layer errors. Every variant is recoverable: a malformed item is
/// skipped, a broken stream degrades to the last good ranking. Nothing here
/// is fatal to the surrounding process.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Malformed push event: {0}")]
    MalformedEvent(String),

    #[error("Invalid posting payload: {0}")]
    InvalidPosting(#[from] serde_json::Error),

    #[error("Push stream closed: {0}")]
    StreamClosed(String),
}

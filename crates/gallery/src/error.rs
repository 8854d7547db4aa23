use picferry_transport::TransportError;
use thiserror::Error;

/// A listing fetch failed and no cached entry could cover for it.
///
/// Only surfaced on a cold cache; once a key holds data, fetch failures
/// degrade to serving the stale entry instead of erroring.
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("gallery fetch failed: {0}")]
    Transport(#[from] TransportError),

    #[error("gallery reply was not parseable: {0}")]
    BadReply(#[from] serde_json::Error),

    /// The server answered 2xx but its reply reported failure.
    #[error("gallery fetch rejected: {0}")]
    Rejected(String),
}

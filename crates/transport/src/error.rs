use std::time::Duration;
use thiserror::Error;

/// Failure of a single endpoint exchange.
///
/// Every request carries a hard deadline, so a hung server surfaces as
/// [`TransportError::Timeout`] rather than blocking the caller forever.
/// Non-success statuses keep the raw body text so callers can show the
/// server's own words.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The deadline elapsed before the full response arrived.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// DNS, connect, TLS or mid-transfer failure.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
}

impl TransportError {
    /// Status code for [`TransportError::HttpStatus`], `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

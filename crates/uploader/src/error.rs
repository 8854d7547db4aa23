use thiserror::Error;

use crate::validate::{MAX_NAME_LEN, format_size};

/// Rejection from the pre-flight checks, before any bytes leave the machine.
///
/// The checks run in a fixed order and stop at the first failure, so one
/// asset reports exactly one reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unsupported file type {mime_type:?}")]
    UnsupportedType { mime_type: String },

    #[error("file is {}, over the {} limit", format_size(*.actual), format_size(*.limit))]
    TooLarge { actual: u64, limit: u64 },

    #[error("file name is {length} characters long, the limit is {}", MAX_NAME_LEN)]
    NameTooLong { length: usize },

    #[error("file name contains forbidden character {character:?}")]
    NameInvalid { character: char },
}

/// Stable classification of a failed upload.
///
/// Callers branch on this for retry and messaging decisions; the free-text
/// message that travels next to it is for humans only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadErrorKind {
    /// The transport deadline elapsed before a full reply arrived.
    #[error("timed out")]
    Timeout,

    /// The server answered 2xx but its reply reported failure.
    #[error("rejected by the server")]
    ServerRejected,

    /// HTTP 429.
    #[error("rate limited")]
    RateLimited,

    /// HTTP 413.
    #[error("payload too large")]
    PayloadTooLarge,

    /// Any other non-success status, or a success reply that could not be
    /// parsed.
    #[error("server error")]
    ServerError,

    /// The request never produced an HTTP response.
    #[error("network error")]
    NetworkError,

    /// Rejected locally; no request was made.
    #[error(transparent)]
    Validation(ValidationError),
}

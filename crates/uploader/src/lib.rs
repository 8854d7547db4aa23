//! Upload orchestration for picferry.
//!
//! [`Uploader`] settles one asset: validate, pick a wire encoding, exchange
//! with the endpoint, classify the reply. [`BatchUploader`] drives many
//! assets through fixed concurrency windows with per-item progress
//! callbacks. Both work against an injected transport, and neither ever
//! fails as a whole: every asset ends up in a [`BatchReport`] as either a
//! success or a classified failure.

pub mod batch;
pub mod error;
pub mod progress;
pub mod report;
pub mod types;
pub mod upload;
pub mod validate;

// Re-export primary types for convenience.
pub use batch::BatchUploader;
pub use error::{UploadErrorKind, ValidationError};
pub use progress::{ProgressCallback, ProgressUpdate};
pub use report::{BatchReport, BatchSummary};
pub use types::{Asset, UploadFailure, UploadOutcome, UploadSuccess};
pub use upload::Uploader;
pub use validate::validate;

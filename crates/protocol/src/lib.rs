//! Wire contract for the picferry media endpoint.
//!
//! Reply shapes for the upload POST and gallery GET, the text-envelope
//! payload used when multipart is not an option, the shared per-run
//! configuration object, and the defaults both sides agree on.

pub mod config;
pub mod constants;
pub mod envelope;
pub mod messages;

// Re-export primary types for convenience.
pub use config::UploadConfig;
pub use envelope::EnvelopeUpload;
pub use messages::{GalleryImage, GalleryReply, UploadReply};

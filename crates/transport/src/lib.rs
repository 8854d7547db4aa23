//! HTTP transport for the picferry media endpoint.
//!
//! The [`Transport`] trait is the seam between upload/gallery logic and the
//! network. Everything above it works against an injected transport, so
//! tests can script replies without sockets while production code uses the
//! `reqwest`-backed [`HttpTransport`]. Every call takes an explicit deadline
//! that covers connect through body read.

pub mod body;
pub mod error;
pub mod http;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

// Re-export primary types for convenience.
pub use body::{UploadParts, WireMode};
pub use error::TransportError;
pub use http::HttpTransport;

/// Capability to exchange requests with a media endpoint.
///
/// Object safe so callers can hold an `Arc<dyn Transport>` and swap the
/// implementation in tests.
pub trait Transport: Send + Sync {
    /// Posts one upload and resolves to the raw reply body text.
    ///
    /// `mode` selects the wire encoding; the reply format is identical for
    /// both, so callers parse the returned text the same way either way.
    fn post_upload(
        &self,
        endpoint_url: &str,
        parts: UploadParts,
        mode: WireMode,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<String, TransportError>> + Send + '_>>;

    /// Fetches a listing URL and resolves to the raw reply body text.
    fn fetch(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<String, TransportError>> + Send + '_>>;
}

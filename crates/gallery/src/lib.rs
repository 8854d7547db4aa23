//! Gallery listing cache for picferry.
//!
//! Listings are fetched through the shared transport, cached per endpoint
//! key with a TTL, and degrade to serving stale data when a refresh fails.
//! Only a cold cache ever surfaces a fetch error to the caller.

pub mod cache;
pub mod clock;
pub mod error;

// Re-export primary types for convenience.
pub use cache::{GalleryCache, Listing};
pub use clock::{Clock, SystemClock};
pub use error::GalleryError;

use std::time::Duration;

/// Maximum accepted file size when the configuration does not set one (10 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// MIME types accepted when the configuration does not set any.
pub const DEFAULT_ALLOWED_MIME_TYPES: &[&str] =
    &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Deadline for a single upload request, connect through body read.
pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Deadline for a gallery listing fetch.
///
/// Shorter than the upload deadline: a listing is small and the caller
/// is usually blocking a picker on it.
pub const DEFAULT_GALLERY_TIMEOUT: Duration = Duration::from_secs(10);

/// How long a fetched gallery listing is served without re-fetching.
pub const DEFAULT_GALLERY_CACHE_TTL: Duration = Duration::from_secs(60);

/// Upload requests in flight at once within a batch window.
pub const DEFAULT_MAX_CONCURRENT_UPLOADS: usize = 3;

/// Tracked endpoint keys before the gallery cache evicts the oldest-inserted.
pub const DEFAULT_GALLERY_CACHE_CAPACITY: usize = 50;

/// Content type of the text envelope. Plain text keeps the request
/// "simple" in CORS terms, so restrictive hosts skip the preflight.
pub const ENVELOPE_CONTENT_TYPE: &str = "text/plain;charset=UTF-8";

/// Query parameter selecting the gallery listing on the endpoint.
pub const GALLERY_ACTION: &str = "gallery";

/// Query parameter carrying the cache-buster timestamp.
pub const GALLERY_BUSTER_PARAM: &str = "_t";

// Sidecar field names shared by the multipart form and the text envelope.
// The endpoint reads the same keys in both modes.
pub const FIELD_FILE: &str = "file";
pub const FIELD_FILENAME: &str = "filename";
pub const FIELD_MIMETYPE: &str = "mimetype";
pub const FIELD_SIZE: &str = "size";
pub const FIELD_UPLOAD_ID: &str = "uploadId";

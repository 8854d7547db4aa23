use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Immutable per-run configuration for uploads and gallery fetches.
///
/// Built once by the caller and borrowed by the upload and gallery flows;
/// nothing in the core mutates it. Every field except `endpoint_url` has a
/// documented default, and unknown keys in the source document are ignored,
/// so a hand-written config stays forward-compatible.
///
/// Timeouts and the cache TTL are serialized as integer milliseconds
/// (`uploadTimeoutMs` and friends) because the endpoint contract speaks
/// in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadConfig {
    /// Upload and gallery endpoint, e.g. `https://media.example/api/upload`.
    pub endpoint_url: String,

    #[serde(default = "default_max_file_size")]
    pub max_file_size_bytes: u64,

    /// MIME types accepted by validation. Membership is checked
    /// ASCII-case-insensitively.
    #[serde(default = "default_allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,

    #[serde(
        default = "default_upload_timeout",
        rename = "uploadTimeoutMs",
        with = "duration_ms"
    )]
    pub upload_timeout: Duration,

    /// Upload requests in flight at once. Values below 1 behave as 1.
    #[serde(default = "default_max_concurrent_uploads")]
    pub max_concurrent_uploads: usize,

    #[serde(
        default = "default_gallery_timeout",
        rename = "galleryTimeoutMs",
        with = "duration_ms"
    )]
    pub gallery_timeout: Duration,

    #[serde(
        default = "default_gallery_cache_ttl",
        rename = "galleryCacheTtlMs",
        with = "duration_ms"
    )]
    pub gallery_cache_ttl: Duration,
}

impl UploadConfig {
    /// Creates a configuration for `endpoint_url` with every other field
    /// at its documented default.
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            max_file_size_bytes: default_max_file_size(),
            allowed_mime_types: default_allowed_mime_types(),
            upload_timeout: default_upload_timeout(),
            max_concurrent_uploads: default_max_concurrent_uploads(),
            gallery_timeout: default_gallery_timeout(),
            gallery_cache_ttl: default_gallery_cache_ttl(),
        }
    }

    /// Returns `true` if `mime_type` is accepted (ASCII-case-insensitive).
    pub fn accepts_mime_type(&self, mime_type: &str) -> bool {
        self.allowed_mime_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(mime_type))
    }

    /// Window width for batch uploads, never below 1.
    pub fn window_size(&self) -> usize {
        self.max_concurrent_uploads.max(1)
    }
}

fn default_max_file_size() -> u64 {
    constants::DEFAULT_MAX_FILE_SIZE
}

fn default_allowed_mime_types() -> Vec<String> {
    constants::DEFAULT_ALLOWED_MIME_TYPES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_upload_timeout() -> Duration {
    constants::DEFAULT_UPLOAD_TIMEOUT
}

fn default_max_concurrent_uploads() -> usize {
    constants::DEFAULT_MAX_CONCURRENT_UPLOADS
}

fn default_gallery_timeout() -> Duration {
    constants::DEFAULT_GALLERY_TIMEOUT
}

fn default_gallery_cache_ttl() -> Duration {
    constants::DEFAULT_GALLERY_CACHE_TTL
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        (d.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let ms = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(ms))
    }
}

use std::path::Path;
use std::time::Duration;

use picferry_transport::WireMode;

use crate::error::UploadErrorKind;

/// One file queued for upload: a display name, a declared MIME type and
/// the raw bytes. Everything downstream works on this in-memory form, so
/// a file is read from disk at most once.
#[derive(Debug, Clone)]
pub struct Asset {
    pub name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

impl Asset {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            content,
        }
    }

    /// Reads a file from disk, taking the name from the final path segment
    /// and guessing the MIME type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("path has no file name: {}", path.display()),
                )
            })?;
        let content = tokio::fs::read(path).await?;
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        Ok(Self {
            name,
            mime_type: mime_type_for_extension(&extension).to_string(),
            content,
        })
    }

    pub fn size_bytes(&self) -> u64 {
        self.content.len() as u64
    }
}

/// MIME type for a lowercase file extension, `application/octet-stream`
/// when unknown.
pub fn mime_type_for_extension(extension: &str) -> &'static str {
    match extension {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// How one asset's upload attempt ended.
///
/// Both arms are data, not errors: a failed upload is a normal, reportable
/// result for the batch, which is why this is not a `Result`.
#[derive(Debug, Clone)]
pub enum UploadOutcome {
    Success(UploadSuccess),
    Failure(UploadFailure),
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Success(_))
    }

    pub fn failure(&self) -> Option<&UploadFailure> {
        match self {
            UploadOutcome::Failure(failure) => Some(failure),
            UploadOutcome::Success(_) => None,
        }
    }
}

/// A stored upload: the identity the endpoint assigned plus local timing.
#[derive(Debug, Clone)]
pub struct UploadSuccess {
    /// Media id assigned by the endpoint.
    pub remote_id: i64,
    /// Public URL of the stored file.
    pub remote_url: String,
    /// Name the endpoint stored the file under. Falls back to the local
    /// asset name when the reply omits one.
    pub display_name: String,
    /// Wire encoding that carried the upload.
    pub mode: WireMode,
    /// Wall time from request start to parsed reply.
    pub elapsed: Duration,
}

/// A failed upload: the asset it concerns, a stable kind to branch on and
/// a human-readable message.
#[derive(Debug, Clone)]
pub struct UploadFailure {
    pub asset_name: String,
    pub kind: UploadErrorKind,
    pub message: String,
}

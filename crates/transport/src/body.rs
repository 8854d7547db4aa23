use serde::{Deserialize, Serialize};

/// One upload request before wire encoding: the raw bytes plus the
/// sidecar metadata the endpoint expects alongside them.
#[derive(Debug, Clone)]
pub struct UploadParts {
    /// File name shown by the endpoint, also sent as a sidecar field.
    pub file_name: String,
    /// Declared MIME type of the bytes.
    pub mime_type: String,
    /// Caller-generated id echoed back by the endpoint for correlation.
    pub upload_id: String,
    /// The file contents.
    pub content: Vec<u8>,
}

impl UploadParts {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        upload_id: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            upload_id: upload_id.into(),
            content,
        }
    }

    pub fn size_bytes(&self) -> u64 {
        self.content.len() as u64
    }
}

/// Wire encoding for an upload request.
///
/// `Structured` is a multipart form with a binary file part. `Envelope`
/// wraps the same data in a JSON document sent as `text/plain`, a shape
/// that restrictive hosts accept without a preflight exchange and that
/// can carry content a file part cannot, such as zero bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireMode {
    Structured,
    Envelope,
}

impl WireMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WireMode::Structured => "structured",
            WireMode::Envelope => "envelope",
        }
    }
}

impl std::fmt::Display for WireMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

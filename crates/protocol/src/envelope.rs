use serde::{Deserialize, Serialize};

use crate::constants;

/// Self-describing upload payload for the text-envelope transport mode.
///
/// Carries the file bytes base64-encoded plus the same sidecar fields the
/// multipart form uses, so the endpoint can accept either shape. Sent as
/// a plain-text body to stay below the cross-origin preflight threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeUpload {
    pub filename: String,
    pub mimetype: String,
    pub size: u64,
    #[serde(rename = "uploadId")]
    pub upload_id: String,
    #[serde(with = "base64_bytes")]
    pub content: Vec<u8>,
}

impl EnvelopeUpload {
    /// Wraps raw file bytes in an envelope. `size` is derived from the bytes.
    pub fn new(
        filename: impl Into<String>,
        mimetype: impl Into<String>,
        upload_id: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            mimetype: mimetype.into(),
            size: content.len() as u64,
            upload_id: upload_id.into(),
            content,
        }
    }

    /// Serializes the envelope to the JSON text the transport sends.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses an envelope back from its JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

mod base64_bytes {
    use base64::{Engine, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        STANDARD.encode(data).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}

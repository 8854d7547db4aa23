use serde::{Deserialize, Serialize};

/// Reply to an upload POST.
///
/// The endpoint answers with `success: true` plus the stored asset's
/// identity, or `success: false` plus an error string. All fields other
/// than `success` are tolerated missing so a misbehaving server still
/// produces a parseable reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadReply {
    pub success: bool,
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub name: String,
    /// Which request shape the server parsed (`"structured"` or `"envelope"`).
    #[serde(default)]
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Reply to a gallery listing GET.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryReply {
    pub success: bool,
    #[serde(default)]
    pub images: Vec<GalleryImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One previously uploaded asset as listed by the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: i64,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub name: String,
}

impl GalleryImage {
    /// URL to render in a picker: the thumbnail when present, else the full asset.
    pub fn preview_url(&self) -> &str {
        self.thumbnail.as_deref().unwrap_or(&self.url)
    }
}

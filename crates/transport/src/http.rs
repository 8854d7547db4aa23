//! `reqwest`-backed [`Transport`] implementation.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use picferry_protocol::EnvelopeUpload;
use picferry_protocol::constants;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::body::{UploadParts, WireMode};
use crate::error::TransportError;
use crate::Transport;

/// Production transport speaking HTTP(S) through a pooled `reqwest` client.
///
/// Cloning is cheap; clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| TransportError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    fn post_upload(
        &self,
        endpoint_url: &str,
        parts: UploadParts,
        mode: WireMode,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<String, TransportError>> + Send + '_>> {
        let http = self.http.clone();
        let url = endpoint_url.to_string();
        Box::pin(async move {
            debug!(url = %url, mode = %mode, bytes = parts.size_bytes(), "posting upload");
            let request = match mode {
                WireMode::Structured => http.post(&url).multipart(multipart_form(parts)?),
                WireMode::Envelope => {
                    let envelope = EnvelopeUpload::new(
                        parts.file_name,
                        parts.mime_type,
                        parts.upload_id,
                        parts.content,
                    );
                    let text = envelope.to_json().map_err(|e| {
                        TransportError::Network(format!("failed to encode envelope: {e}"))
                    })?;
                    http.post(&url)
                        .header(CONTENT_TYPE, constants::ENVELOPE_CONTENT_TYPE)
                        .body(text)
                }
            };
            let response = request
                .timeout(timeout)
                .send()
                .await
                .map_err(|e| classify(e, timeout))?;
            read_reply(response, timeout).await
        })
    }

    fn fetch(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<String, TransportError>> + Send + '_>> {
        let http = self.http.clone();
        let url = url.to_string();
        Box::pin(async move {
            debug!(url = %url, "fetching listing");
            let response = http
                .get(&url)
                .timeout(timeout)
                .send()
                .await
                .map_err(|e| classify(e, timeout))?;
            read_reply(response, timeout).await
        })
    }
}

/// Builds the multipart form: one binary file part plus the sidecar text
/// fields the endpoint reads alongside it.
fn multipart_form(parts: UploadParts) -> Result<Form, TransportError> {
    let size = parts.size_bytes();
    let file = Part::bytes(parts.content)
        .file_name(parts.file_name.clone())
        .mime_str(&parts.mime_type)
        .map_err(|e| {
            TransportError::Network(format!("invalid mime type {:?}: {e}", parts.mime_type))
        })?;
    Ok(Form::new()
        .part(constants::FIELD_FILE, file)
        .text(constants::FIELD_FILENAME, parts.file_name)
        .text(constants::FIELD_MIMETYPE, parts.mime_type)
        .text(constants::FIELD_SIZE, size.to_string())
        .text(constants::FIELD_UPLOAD_ID, parts.upload_id))
}

fn classify(err: reqwest::Error, deadline: Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(deadline)
    } else {
        TransportError::Network(err.to_string())
    }
}

/// Splits transport success from HTTP failure and drains the body either way.
///
/// Error bodies are read best-effort so the caller can surface whatever the
/// server said; a failure while draining them is ignored.
async fn read_reply(
    response: reqwest::Response,
    deadline: Duration,
) -> Result<String, TransportError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(TransportError::HttpStatus {
            status: status.as_u16(),
            body,
        });
    }
    response.text().await.map_err(|e| classify(e, deadline))
}

use std::sync::Arc;
use std::time::{Duration, Instant};

use picferry_protocol::{UploadConfig, UploadReply};
use picferry_transport::{Transport, TransportError, UploadParts, WireMode};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::UploadErrorKind;
use crate::types::{Asset, UploadFailure, UploadOutcome, UploadSuccess};
use crate::validate::validate;

/// Settles a single asset against the endpoint.
///
/// Runs validation, encoding selection, the transport exchange and reply
/// classification. Every path ends in an [`UploadOutcome`]; nothing here
/// panics or retries. Batches drive this once per asset.
#[derive(Clone)]
pub struct Uploader {
    transport: Arc<dyn Transport>,
}

impl Uploader {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn upload(&self, asset: &Asset, config: &UploadConfig) -> UploadOutcome {
        if let Err(err) = validate(asset, config) {
            debug!(asset = %asset.name, error = %err, "rejected before upload");
            return UploadOutcome::Failure(UploadFailure {
                asset_name: asset.name.clone(),
                message: err.to_string(),
                kind: UploadErrorKind::Validation(err),
            });
        }

        let upload_id = Uuid::new_v4().to_string();
        let mode = select_mode(&asset.content);
        let parts = UploadParts::new(
            asset.name.as_str(),
            asset.mime_type.as_str(),
            upload_id,
            asset.content.clone(),
        );

        let started = Instant::now();
        let result = self
            .transport
            .post_upload(&config.endpoint_url, parts, mode, config.upload_timeout)
            .await;
        let elapsed = started.elapsed();

        match result {
            Ok(text) => conclude(asset, mode, elapsed, &text),
            Err(err) => {
                warn!(asset = %asset.name, error = %err, "upload failed in transport");
                UploadOutcome::Failure(UploadFailure {
                    asset_name: asset.name.clone(),
                    kind: classify_transport(&err),
                    message: err.to_string(),
                })
            }
        }
    }
}

/// Structured multipart is the preferred encoding; a zero-byte stream
/// cannot form a multipart file part, so empty assets travel as a text
/// envelope instead. This is the only fallback, and it is decided up
/// front rather than after a failed attempt.
fn select_mode(content: &[u8]) -> WireMode {
    if content.is_empty() {
        WireMode::Envelope
    } else {
        WireMode::Structured
    }
}

/// Classifies the reply text of a transport-successful exchange.
fn conclude(asset: &Asset, mode: WireMode, elapsed: Duration, text: &str) -> UploadOutcome {
    match serde_json::from_str::<UploadReply>(text) {
        Ok(reply) if reply.success => {
            debug!(asset = %asset.name, id = reply.id, mode = %mode, "upload accepted");
            UploadOutcome::Success(UploadSuccess {
                remote_id: reply.id,
                remote_url: reply.url,
                display_name: if reply.name.is_empty() {
                    asset.name.clone()
                } else {
                    reply.name
                },
                mode,
                elapsed,
            })
        }
        Ok(reply) => {
            let message = reply
                .error
                .unwrap_or_else(|| "the server rejected the upload".to_string());
            warn!(asset = %asset.name, error = %message, "server rejected upload");
            UploadOutcome::Failure(UploadFailure {
                asset_name: asset.name.clone(),
                kind: UploadErrorKind::ServerRejected,
                message,
            })
        }
        Err(err) => {
            warn!(asset = %asset.name, error = %err, "unparseable upload reply");
            UploadOutcome::Failure(UploadFailure {
                asset_name: asset.name.clone(),
                kind: UploadErrorKind::ServerError,
                message: format!("unparseable server reply: {err}"),
            })
        }
    }
}

fn classify_transport(err: &TransportError) -> UploadErrorKind {
    match err {
        TransportError::Timeout(_) => UploadErrorKind::Timeout,
        TransportError::Network(_) => UploadErrorKind::NetworkError,
        TransportError::HttpStatus { status: 429, .. } => UploadErrorKind::RateLimited,
        TransportError::HttpStatus { status: 413, .. } => UploadErrorKind::PayloadTooLarge,
        TransportError::HttpStatus { .. } => UploadErrorKind::ServerError,
    }
}

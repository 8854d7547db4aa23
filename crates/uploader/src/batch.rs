use std::sync::Arc;

use futures_util::future::join_all;
use picferry_protocol::UploadConfig;
use picferry_transport::Transport;
use tracing::{debug, info};

use crate::progress::{ProgressCallback, ProgressSink};
use crate::report::BatchReport;
use crate::types::{Asset, UploadOutcome};
use crate::upload::Uploader;

/// Drives a whole batch through fixed concurrency windows.
///
/// Assets are taken in input order, `maxConcurrentUploads` at a time. A
/// window must fully settle before the next one opens; that caps peak
/// concurrency and keeps rate-sensitive endpoints happy. Individual
/// failures are recorded and never abort the batch.
pub struct BatchUploader {
    uploader: Uploader,
}

impl BatchUploader {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            uploader: Uploader::new(transport),
        }
    }

    /// Settles every asset and returns the full report.
    ///
    /// `on_progress` fires once per settled asset, in settle order, with a
    /// strictly increasing completed count. An empty input returns an
    /// empty report without touching the network.
    pub async fn run(
        &self,
        assets: &[Asset],
        config: &UploadConfig,
        on_progress: Option<ProgressCallback>,
    ) -> BatchReport {
        let mut report = BatchReport::default();
        if assets.is_empty() {
            return report;
        }

        let window_size = config.window_size();
        let sink = ProgressSink::new(assets.len(), on_progress);
        info!(assets = assets.len(), window_size, "starting batch upload");

        for (index, window) in assets.chunks(window_size).enumerate() {
            debug!(window = index, size = window.len(), "opening upload window");
            let outcomes = join_all(
                window
                    .iter()
                    .map(|asset| self.settle_one(asset, config, &sink)),
            )
            .await;
            for outcome in outcomes {
                report.record(outcome);
            }
        }

        info!(
            succeeded = report.successes.len(),
            failed = report.failures.len(),
            "batch settled"
        );
        report
    }

    async fn settle_one(
        &self,
        asset: &Asset,
        config: &UploadConfig,
        sink: &ProgressSink,
    ) -> UploadOutcome {
        let outcome = self.uploader.upload(asset, config).await;
        match &outcome {
            UploadOutcome::Success(_) => sink.settled(&asset.name, true, None),
            UploadOutcome::Failure(failure) => {
                sink.settled(&asset.name, false, Some(&failure.message))
            }
        }
        outcome
    }
}

use std::sync::Mutex;

/// Snapshot handed to the progress callback after each settled upload.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    /// Uploads settled so far, this one included. Strictly increasing
    /// across the batch, reaching `total` on the final callback.
    pub completed: usize,
    /// Number of assets in the batch.
    pub total: usize,
    /// Local name of the asset that just settled.
    pub asset_name: String,
    pub succeeded: bool,
    /// Failure message when `succeeded` is false.
    pub error: Option<String>,
}

/// Invoked after every settled upload, success or failure. Runs on the
/// batch task, so it should return quickly.
pub type ProgressCallback = Box<dyn Fn(ProgressUpdate) + Send + Sync>;

/// Serializes progress delivery for one batch.
///
/// Window members settle concurrently; the lock makes the completed count
/// strictly increasing and keeps callback invocations from interleaving.
pub(crate) struct ProgressSink {
    total: usize,
    inner: Mutex<ProgressInner>,
}

struct ProgressInner {
    completed: usize,
    callback: Option<ProgressCallback>,
}

impl ProgressSink {
    pub(crate) fn new(total: usize, callback: Option<ProgressCallback>) -> Self {
        Self {
            total,
            inner: Mutex::new(ProgressInner {
                completed: 0,
                callback,
            }),
        }
    }

    pub(crate) fn settled(&self, asset_name: &str, succeeded: bool, error: Option<&str>) {
        let mut inner = self.inner.lock().unwrap();
        inner.completed += 1;
        if let Some(callback) = &inner.callback {
            callback(ProgressUpdate {
                completed: inner.completed,
                total: self.total,
                asset_name: asset_name.to_string(),
                succeeded,
                error: error.map(str::to_string),
            });
        }
    }
}

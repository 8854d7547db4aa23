use std::fmt;

use crate::types::{UploadFailure, UploadOutcome, UploadSuccess};

/// Everything a settled batch produced.
///
/// A batch never fails as a whole. Every input asset lands in exactly one
/// of the two lists, each in input order, and the report is not mutated
/// after the batch hands it over.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub successes: Vec<UploadSuccess>,
    pub failures: Vec<UploadFailure>,
}

impl BatchReport {
    pub(crate) fn record(&mut self, outcome: UploadOutcome) {
        match outcome {
            UploadOutcome::Success(success) => self.successes.push(success),
            UploadOutcome::Failure(failure) => self.failures.push(failure),
        }
    }

    /// Number of assets the batch settled.
    pub fn total(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    /// One-word classification for notification purposes.
    pub fn summary(&self) -> BatchSummary {
        match (self.successes.len(), self.failures.len()) {
            (_, 0) => BatchSummary::AllSucceeded,
            (0, _) => BatchSummary::AllFailed,
            (succeeded, failed) => BatchSummary::Partial { succeeded, failed },
        }
    }

    /// Short human description of the failures, `None` when there were none.
    ///
    /// Up to `limit` failures are listed with their reasons; past that the
    /// reasons give way to a name list and a count so the text stays
    /// notification-sized.
    pub fn failure_summary(&self, limit: usize) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        let limit = limit.max(1);
        if self.failures.len() <= limit {
            let lines: Vec<String> = self
                .failures
                .iter()
                .map(|f| format!("{}: {}", f.asset_name, f.message))
                .collect();
            return Some(lines.join("; "));
        }
        let names: Vec<&str> = self
            .failures
            .iter()
            .take(limit)
            .map(|f| f.asset_name.as_str())
            .collect();
        Some(format!(
            "{} and {} more failed",
            names.join(", "),
            self.failures.len() - limit
        ))
    }
}

/// Coarse result of a whole batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchSummary {
    AllSucceeded,
    AllFailed,
    Partial { succeeded: usize, failed: usize },
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchSummary::AllSucceeded => f.write_str("all uploads succeeded"),
            BatchSummary::AllFailed => f.write_str("all uploads failed"),
            BatchSummary::Partial { succeeded, failed } => {
                write!(f, "{succeeded} uploaded, {failed} failed")
            }
        }
    }
}

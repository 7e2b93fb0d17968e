//! Run summary types.

use super::result::ProcessingResult;
use crate::pull_requests::PrStatus;

/// Summary of a complete run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of repositories whose README was checked.
    pub repositories_scanned: usize,

    /// Number of repositories still showing the Greenkeeper badge.
    pub repositories_eligible: usize,

    /// Number of repositories that needed no migration.
    pub repositories_skipped: usize,

    /// Number of pull requests opened.
    pub prs_created: usize,

    /// Number of change sets built but not submitted (dry run).
    pub prs_previewed: usize,

    /// Number of pull requests left without the label.
    pub labels_failed: usize,

    /// Number of repositories that failed.
    pub failures: usize,

    /// URLs of the opened pull requests, in processing order.
    pub pull_request_urls: Vec<String>,

    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Updates the summary with a processing result.
    pub fn record_result(&mut self, result: &ProcessingResult) {
        match result {
            ProcessingResult::Success { pr, .. } => match pr {
                PrStatus::Created { url, labeled, .. } => {
                    self.prs_created += 1;
                    if !labeled {
                        self.labels_failed += 1;
                    }
                    self.pull_request_urls.push(url.clone());
                }
                PrStatus::Previewed => self.prs_previewed += 1,
            },
            ProcessingResult::Skipped { .. } => self.repositories_skipped += 1,
            ProcessingResult::Failed { .. } => self.failures += 1,
        }
    }

    /// Returns true if any failures occurred.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failures > 0
    }

    /// Returns true if every repository was processed and labeled.
    #[must_use]
    pub fn all_success(&self) -> bool {
        self.failures == 0 && self.labels_failed == 0
    }
}

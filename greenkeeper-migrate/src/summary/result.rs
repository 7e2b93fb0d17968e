//! Processing result types.

use crate::pull_requests::PrStatus;

/// Result of processing a single repository.
#[derive(Debug, Clone)]
pub enum ProcessingResult {
    /// A migration pull request was opened or previewed.
    Success {
        /// Repository full name.
        repository: String,
        /// Pull request status.
        pr: PrStatus,
    },

    /// The repository needs no migration.
    Skipped {
        /// Repository full name.
        repository: String,
        /// Reason for skipping.
        reason: String,
    },

    /// Processing failed.
    Failed {
        /// Repository full name.
        repository: String,
        /// Error message.
        error: String,
    },
}

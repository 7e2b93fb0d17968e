//! Scan results.

use crate::platform::{PlatformError, RepositoryRef};

/// A repository whose README still shows the Greenkeeper badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibleRepository {
    /// The repository to migrate.
    pub repository: RepositoryRef,

    /// Path the README was read from.
    pub readme_path: String,

    /// README content with the badge removed, formatted.
    pub readme_replacement: String,
}

/// Outcome of checking one repository.
#[derive(Debug)]
pub enum ScanOutcome {
    /// The repository needs migrating.
    Eligible(EligibleRepository),

    /// The repository needs nothing.
    NotEligible {
        /// Repository checked.
        repository: RepositoryRef,
        /// Why it was excluded.
        reason: String,
    },

    /// The README could not be fetched.
    Failed {
        /// Repository checked.
        repository: RepositoryRef,
        /// Underlying error.
        error: PlatformError,
    },
}

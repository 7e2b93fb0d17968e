//! Migration pull request information.

use super::PrStatus;
use crate::platform::RepositoryRef;

/// A pull request replacing Greenkeeper in one repository.
#[derive(Debug, Clone)]
pub struct MigrationPR {
    /// Target repository.
    pub repository: RepositoryRef,

    /// Head branch.
    pub branch_name: String,

    /// PR title.
    pub title: String,

    /// Paths included in the change set.
    pub files: Vec<String>,

    /// Submission status.
    pub status: PrStatus,
}

//! Access to the code hosting platform.
//!
//! Scanning and migration only talk to the platform through [`Platform`], so
//! they can be exercised against a mock. [`GitHubPlatform`] is the real
//! implementation.
//!
//! Lookups that may legitimately find nothing return `Ok(None)`, keeping
//! "not found" apart from genuine failures.

mod error;
mod github;
mod types;

pub use error::PlatformError;
pub use github::GitHubPlatform;
pub use types::{
    ChangeSet, DirectoryEntry, FileContent, PullRequestRequest, PullRequestResult, RepositoryRef,
};

use async_trait::async_trait;

/// Remote operations required by the migration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Platform: Send + Sync {
    /// Lists every active repository of `owner`, following pagination.
    async fn list_repositories(&self, owner: &str) -> Result<Vec<RepositoryRef>, PlatformError>;

    /// Fetches the repository's top-level README.
    async fn get_readme(
        &self,
        repository: &RepositoryRef,
    ) -> Result<Option<FileContent>, PlatformError>;

    /// Lists the entries of a directory.
    async fn list_directory(
        &self,
        repository: &RepositoryRef,
        path: &str,
    ) -> Result<Option<Vec<DirectoryEntry>>, PlatformError>;

    /// Fetches the decoded content of a file.
    async fn get_file(
        &self,
        repository: &RepositoryRef,
        path: &str,
    ) -> Result<Option<String>, PlatformError>;

    /// Commits the change set to `request.branch` and opens a pull request.
    ///
    /// Re-submitting for a branch that already has an open pull request
    /// returns that pull request instead of opening another.
    async fn create_pull_request(
        &self,
        repository: &RepositoryRef,
        request: &PullRequestRequest,
    ) -> Result<PullRequestResult, PlatformError>;

    /// Adds labels to an existing pull request.
    async fn add_labels(
        &self,
        repository: &RepositoryRef,
        number: u64,
        labels: &[String],
    ) -> Result<(), PlatformError>;
}

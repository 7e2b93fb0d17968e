//! Values exchanged with the hosting platform.

use std::collections::BTreeMap;

/// Identifies one remote repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,

    /// Branch pull requests are opened against.
    pub default_branch: String,
}

impl RepositoryRef {
    /// Creates a reference to `owner/name`.
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        default_branch: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            default_branch: default_branch.into(),
        }
    }

    /// Full repository name in "owner/name" format.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// A text file fetched from a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    /// Path of the file relative to the repository root.
    pub path: String,

    /// Decoded file content.
    pub content: String,
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// File name without directory.
    pub name: String,

    /// Path relative to the repository root.
    pub path: String,

    /// Whether the entry is a regular file.
    pub is_file: bool,
}

/// Files and commit message submitted together as one pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Message of the single commit carrying the files.
    pub commit_message: String,

    /// Full replacement content keyed by path.
    pub files: BTreeMap<String, String>,
}

impl ChangeSet {
    /// Creates an empty change set.
    pub fn new(commit_message: impl Into<String>) -> Self {
        Self {
            commit_message: commit_message.into(),
            files: BTreeMap::new(),
        }
    }

    /// Adds or replaces a file.
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    /// Paths of all files in the change set.
    pub fn paths(&self) -> Vec<String> {
        self.files.keys().cloned().collect()
    }
}

/// Everything needed to open a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRequest {
    /// Head branch created for the change set.
    pub branch: String,

    /// Branch the pull request targets.
    pub base: String,

    /// Pull request title.
    pub title: String,

    /// Pull request body.
    pub body: String,

    /// Files committed to `branch`.
    pub change_set: ChangeSet,
}

/// A pull request opened on the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestResult {
    /// Pull request number.
    pub number: u64,

    /// Web URL of the pull request.
    pub url: String,
}

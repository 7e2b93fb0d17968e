//! Platform error types.

use thiserror::Error;

/// Errors returned by a [`Platform`](super::Platform) implementation.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// File content could not be decoded as UTF-8 text.
    #[error("Failed to decode content of '{path}'")]
    Decode { path: String },

    /// The API answered with something we cannot use.
    #[error("Unexpected response: {message}")]
    UnexpectedResponse { message: String },
}

impl PlatformError {
    /// Returns true if the error is a GitHub 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::GitHubError(e) => is_not_found(e),
            _ => false,
        }
    }
}

pub(crate) fn is_not_found(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 404
    )
}

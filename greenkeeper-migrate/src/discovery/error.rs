//! Repository discovery error types.

use crate::platform::PlatformError;
use thiserror::Error;

/// Errors that can occur during repository discovery.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The account's repositories could not be listed.
    #[error("Failed to list repositories of '{owner}': {source}")]
    ListFailed {
        owner: String,
        #[source]
        source: PlatformError,
    },
}

//! Pull request error types.

use crate::platform::PlatformError;
use crate::templates::TemplateError;
use crate::workflow::WorkflowError;
use thiserror::Error;

/// Errors that can occur while migrating one repository.
#[derive(Debug, Error)]
pub enum PrError {
    /// Platform request failed.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// A workflow file could not be rewritten.
    #[error("Failed to rewrite workflow '{path}': {source}")]
    Workflow {
        path: String,
        #[source]
        source: WorkflowError,
    },

    /// The Dependabot configuration could not be serialized.
    #[error("Failed to build Dependabot configuration: {0}")]
    DependabotConfig(#[source] serde_yaml::Error),

    /// Pull request text could not be rendered.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

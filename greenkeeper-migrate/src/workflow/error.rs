//! Workflow transformation error types.

use thiserror::Error;

/// Errors that can occur while rewriting a workflow file.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The workflow is not valid YAML.
    #[error("Failed to parse workflow: {0}")]
    Parse(#[source] serde_yaml::Error),

    /// The rewritten workflow could not be serialized.
    #[error("Failed to serialize workflow: {0}")]
    Serialize(#[source] serde_yaml::Error),
}

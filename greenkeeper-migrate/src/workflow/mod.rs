//! GitHub Actions workflow rewriting.
//!
//! Greenkeeper pushed to `greenkeeper/...` branches, so workflows commonly
//! list those under `on.push.branches` to get CI on its PRs. This module
//! renames those entries to the matching Dependabot branch pattern.

mod error;

pub use error::WorkflowError;

use crate::format::format_yaml;
use crate::patterns::{is_legacy_branch_name, rewrite_branch_name};
use serde_yaml::Value;
use std::fmt;

/// Directory holding GitHub Actions workflow definitions.
pub const WORKFLOWS_PATH: &str = ".github/workflows";

/// A parsed workflow definition.
pub type WorkflowDocument = Value;

/// Why a workflow was left out of the change set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// There is no `on.push.branches` list.
    MissingPushBranches,
    /// `on.push.branches` has no Greenkeeper entry.
    NoLegacyBranches,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPushBranches => f.write_str("no on.push.branches setting"),
            Self::NoLegacyBranches => f.write_str("no on.push.branches for Greenkeeper branches"),
        }
    }
}

/// Outcome of [`transform_workflow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowChange {
    /// The document was rewritten and belongs in the change set.
    Applicable {
        /// Number of branch entries renamed.
        rewritten: usize,
    },
    /// The document was not modified.
    NotApplicable(SkipReason),
}

/// Outcome of [`transform_workflow_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformedWorkflow {
    /// Formatted YAML of the rewritten workflow.
    Rewritten(String),
    /// The workflow needs no changes.
    Skipped(SkipReason),
}

/// Renames every Greenkeeper entry of `on.push.branches` in place.
///
/// Other entries keep their value and position. When nothing matches, the
/// document is left exactly as it was.
pub fn transform_workflow(document: &mut WorkflowDocument) -> WorkflowChange {
    let Some(branches) = push_branches_mut(document) else {
        return WorkflowChange::NotApplicable(SkipReason::MissingPushBranches);
    };

    let mut rewritten = 0;
    for branch in branches.iter_mut() {
        if let Value::String(name) = branch {
            if is_legacy_branch_name(name) {
                *name = rewrite_branch_name(name);
                rewritten += 1;
            }
        }
    }

    if rewritten == 0 {
        WorkflowChange::NotApplicable(SkipReason::NoLegacyBranches)
    } else {
        WorkflowChange::Applicable { rewritten }
    }
}

/// Parses, rewrites and re-serializes a workflow file.
///
/// # Errors
///
/// Returns [`WorkflowError`] if the text is not valid YAML or the rewritten
/// document cannot be serialized.
pub fn transform_workflow_text(text: &str) -> Result<TransformedWorkflow, WorkflowError> {
    let mut document: WorkflowDocument =
        serde_yaml::from_str(text).map_err(WorkflowError::Parse)?;

    match transform_workflow(&mut document) {
        WorkflowChange::Applicable { .. } => {
            let yaml = serde_yaml::to_string(&document).map_err(WorkflowError::Serialize)?;
            Ok(TransformedWorkflow::Rewritten(format_yaml(&yaml)))
        }
        WorkflowChange::NotApplicable(reason) => Ok(TransformedWorkflow::Skipped(reason)),
    }
}

/// Returns true for file names GitHub treats as workflow definitions.
#[must_use]
pub fn is_workflow_file(name: &str) -> bool {
    name.ends_with(".yml") || name.ends_with(".yaml")
}

fn push_branches_mut(document: &mut WorkflowDocument) -> Option<&mut Vec<Value>> {
    document
        .get_mut("on")?
        .get_mut("push")?
        .get_mut("branches")?
        .as_sequence_mut()
}

//! Migration plan configuration.
//!
//! The built-in [`MigrationPlan`] reproduces the Greenkeeper to Dependabot
//! migration as-is. A TOML file can override any of its keys:
//!
//! ```toml
//! title = "Replace Greenkeeper with Dependabot"
//! body = "Follow up to {{issue_url}}"
//! branch = "replace-greenkeeper-with-dependabot"
//! commit-message = "ci: replace Greenkeeper with Dependabot"
//! issue-url = "https://github.com/octokit/create-octokit-project.js/issues/16"
//! label = "maintenance"
//! update-interval = "daily"
//! ```

mod error;
mod plan;

pub use error::ConfigError;
pub use plan::{MigrationPlan, DEPENDABOT_CONFIG_PATH};

use std::path::Path;
use tracing::info;

/// Loads the plan at `path`, or the built-in plan when no path is given.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be loaded or is invalid.
pub fn load_plan(path: Option<&Path>) -> Result<MigrationPlan, ConfigError> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "Loading migration plan");
            MigrationPlan::load(path)
        }
        None => Ok(MigrationPlan::default()),
    }
}

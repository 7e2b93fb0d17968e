//! Runner configuration.

use std::path::{Path, PathBuf};

/// Configuration for a migration run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Organization whose repositories are migrated.
    owner: String,
    /// GitHub token used for API calls.
    token: String,
    /// Whether to build change sets without submitting them.
    dry_run: bool,
    /// GitHub Enterprise API base URL.
    api_url: Option<String>,
    /// Path to a migration plan overriding the defaults.
    plan_path: Option<PathBuf>,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(owner: impl Into<String>, token: impl Into<String>, dry_run: bool) -> Self {
        Self {
            owner: owner.into(),
            token: token.into(),
            dry_run,
            api_url: None,
            plan_path: None,
        }
    }

    /// Sets a GitHub Enterprise API base URL.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    /// Sets a migration plan file.
    pub fn with_plan_path(mut self, plan_path: PathBuf) -> Self {
        self.plan_path = Some(plan_path);
        self
    }

    /// Returns the organization being migrated.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the GitHub Enterprise API base URL, if any.
    pub fn api_url(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    /// Returns the migration plan file, if any.
    pub fn plan_path(&self) -> Option<&Path> {
        self.plan_path.as_deref()
    }
}

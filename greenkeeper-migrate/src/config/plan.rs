//! The fixed values of a migration: pull request text, branch, label and
//! Dependabot configuration.

use crate::config::ConfigError;
use crate::format::format_yaml;
use bstr::ByteSlice;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use url::Url;

/// Path of the Dependabot configuration added to every repository.
pub const DEPENDABOT_CONFIG_PATH: &str = ".github/dependabot.yml";

/// Dependabot update intervals.
const UPDATE_INTERVALS: [&str; 3] = ["daily", "weekly", "monthly"];

/// Greenkeeper only ever handled npm, so every migrated repository is npm.
const PACKAGE_ECOSYSTEM: &str = "npm";

/// Parsed migration plan, optionally loaded from a TOML file.
///
/// Every key is optional; omitted keys keep their default. `body` and
/// `commit-message` are Handlebars templates rendered per repository with
/// `owner`, `repo`, `full_name` and `issue_url`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct MigrationPlan {
    /// Pull request title.
    pub title: String,

    /// Handlebars template of the pull request body.
    pub body: String,

    /// Head branch of the pull request.
    pub branch: String,

    /// Handlebars template of the commit message.
    pub commit_message: String,

    /// Issue tracking the migration, referenced from the body.
    pub issue_url: String,

    /// Label applied to the pull request and to Dependabot's own PRs.
    pub label: String,

    /// How often Dependabot checks for updates.
    pub update_interval: String,
}

impl Default for MigrationPlan {
    fn default() -> Self {
        Self {
            title: "Replace Greenkeeper with Dependabot".to_string(),
            body: "Follow up to {{issue_url}}".to_string(),
            branch: "replace-greenkeeper-with-dependabot".to_string(),
            commit_message: "ci: replace Greenkeeper with Dependabot".to_string(),
            issue_url: "https://github.com/octokit/create-octokit-project.js/issues/16"
                .to_string(),
            label: "maintenance".to_string(),
            update_interval: "daily".to_string(),
        }
    }
}

impl MigrationPlan {
    /// Loads and validates a plan from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unreadable, not valid
    /// TOML, has unknown keys, or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading migration plan");
        let path_str = path.display().to_string();

        if !path.exists() {
            return Err(ConfigError::MissingFile { path: path_str });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path_str.clone(),
            source: e,
        })?;

        let plan: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path_str.clone(),
            source: e,
        })?;

        plan.validate(&path_str)?;
        Ok(plan)
    }

    /// Checks that the plan can be submitted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the first invalid key.
    pub fn validate(&self, path: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::ValidationError {
            path: path.to_string(),
            message,
        };

        for (key, value) in [
            ("title", &self.title),
            ("commit-message", &self.commit_message),
            ("label", &self.label),
        ] {
            if value.trim().is_empty() {
                return Err(invalid(format!("{key} must not be empty")));
            }
        }

        if let Err(e) = gix_validate::reference::name_partial(self.branch.as_bytes().as_bstr()) {
            return Err(invalid(format!(
                "branch is not a valid branch name: {} ({e})",
                self.branch
            )));
        }

        if Url::parse(&self.issue_url).is_err() {
            return Err(invalid(format!(
                "issue-url is not a valid URL: {}",
                self.issue_url
            )));
        }

        if !UPDATE_INTERVALS.contains(&self.update_interval.as_str()) {
            return Err(invalid(format!(
                "update-interval must be one of {}: {}",
                UPDATE_INTERVALS.join(", "),
                self.update_interval
            )));
        }

        if let Err(e) = self.dependabot_config() {
            return Err(invalid(format!("cannot build Dependabot configuration: {e}")));
        }

        Ok(())
    }

    /// Content of `.github/dependabot.yml`. Identical for every repository.
    ///
    /// # Errors
    ///
    /// Returns the [`serde_yaml::Error`] if the document cannot be serialized.
    pub fn dependabot_config(&self) -> Result<String, serde_yaml::Error> {
        let config = DependabotConfig {
            version: 2,
            updates: vec![DependabotUpdate {
                package_ecosystem: PACKAGE_ECOSYSTEM,
                directory: "/",
                schedule: DependabotSchedule {
                    interval: self.update_interval.as_str(),
                },
                labels: vec![self.label.as_str()],
            }],
        };

        Ok(format_yaml(&serde_yaml::to_string(&config)?))
    }
}

/// `.github/dependabot.yml` document.
#[derive(Serialize)]
struct DependabotConfig<'a> {
    version: u8,
    updates: Vec<DependabotUpdate<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct DependabotUpdate<'a> {
    package_ecosystem: &'a str,
    directory: &'a str,
    schedule: DependabotSchedule<'a>,
    labels: Vec<&'a str>,
}

#[derive(Serialize)]
struct DependabotSchedule<'a> {
    interval: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_plan_is_valid() {
        MigrationPlan::default().validate("<default>").unwrap();
    }

    fn parse_dependabot_config(plan: &MigrationPlan) -> serde_yaml::Value {
        let config = plan.dependabot_config().unwrap();
        assert!(config.ends_with('\n'));
        assert!(!config.ends_with("\n\n"));
        serde_yaml::from_str(&config).unwrap()
    }

    #[test]
    fn renders_default_dependabot_config() {
        let parsed = parse_dependabot_config(&MigrationPlan::default());
        let update = &parsed["updates"][0];

        assert_eq!(parsed["version"].as_u64(), Some(2));
        assert_eq!(parsed["updates"].as_sequence().map(Vec::len), Some(1));
        assert_eq!(update["package-ecosystem"].as_str(), Some("npm"));
        assert_eq!(update["directory"].as_str(), Some("/"));
        assert_eq!(update["schedule"]["interval"].as_str(), Some("daily"));
        assert_eq!(update["labels"][0].as_str(), Some("maintenance"));
    }

    #[test]
    fn dependabot_config_keeps_quoted_label() {
        let plan = MigrationPlan {
            label: "deps \"npm\": 'js'".to_string(),
            ..MigrationPlan::default()
        };
        plan.validate("plan.toml").unwrap();

        let parsed = parse_dependabot_config(&plan);

        assert_eq!(
            parsed["updates"][0]["labels"][0].as_str(),
            Some("deps \"npm\": 'js'")
        );
    }

    #[test]
    fn load_keeps_defaults_for_omitted_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("plan.toml");
        fs::write(&path, "label = \"dependencies\"\n").unwrap();

        let plan = MigrationPlan::load(&path).unwrap();

        assert_eq!(plan.label, "dependencies");
        assert_eq!(plan.title, MigrationPlan::default().title);
        assert_eq!(plan.branch, "replace-greenkeeper-with-dependabot");
    }

    #[test]
    fn load_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = MigrationPlan::load(&temp.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::MissingFile { .. })));
    }

    #[test]
    fn load_rejects_unknown_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("plan.toml");
        fs::write(&path, "titel = \"typo\"\n").unwrap();

        let result = MigrationPlan::load(&path);
        assert!(matches!(result, Err(ConfigError::TomlError { .. })));
    }

    #[test]
    fn rejects_invalid_branch() {
        let plan = MigrationPlan {
            branch: "bad..branch".to_string(),
            ..MigrationPlan::default()
        };
        assert!(matches!(
            plan.validate("plan.toml"),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn rejects_invalid_issue_url() {
        let plan = MigrationPlan {
            issue_url: "not a url".to_string(),
            ..MigrationPlan::default()
        };
        assert!(matches!(
            plan.validate("plan.toml"),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn rejects_empty_label() {
        let plan = MigrationPlan {
            label: "  ".to_string(),
            ..MigrationPlan::default()
        };
        assert!(matches!(
            plan.validate("plan.toml"),
            Err(ConfigError::ValidationError { message, .. }) if message.contains("label")
        ));
    }

    #[test]
    fn rejects_unknown_interval() {
        let plan = MigrationPlan {
            update_interval: "hourly".to_string(),
            ..MigrationPlan::default()
        };
        assert!(plan.validate("plan.toml").is_err());
    }
}

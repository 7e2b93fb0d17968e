//! Orchestrates a migration run across an organization.
//!
//! Every repository is scanned first; eligible repositories are then
//! migrated one after another in discovery order. A repository that fails is
//! recorded and the run moves on to the next one.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::config::{load_plan, MigrationPlan};
use crate::discovery::{discover_repositories, scan_repositories, EligibleRepository, ScanOutcome};
use crate::platform::{GitHubPlatform, Platform, RepositoryRef};
use crate::pull_requests::{create_pr, MigrationPR, PrStatus};
use crate::summary::{ProcessingResult, RunSummary};
use crate::templates::TemplateRenderer;
use futures::StreamExt;
use std::pin::pin;
use tracing::{error, info, warn};

/// Runs the Greenkeeper to Dependabot migration.
pub struct Runner {
    config: RunnerConfig,
    platform: Box<dyn Platform>,
    plan: MigrationPlan,
    renderer: TemplateRenderer,
}

impl Runner {
    /// Builds a runner talking to GitHub.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the client cannot be built or the
    /// migration plan is invalid.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let platform = GitHubPlatform::new(config.token(), config.api_url())?;
        Self::with_platform(config, Box::new(platform))
    }

    /// Builds a runner on top of an existing platform client.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the migration plan is invalid.
    pub fn with_platform(
        config: RunnerConfig,
        platform: Box<dyn Platform>,
    ) -> Result<Self, RunnerError> {
        let plan = load_plan(config.plan_path())?;
        let renderer = TemplateRenderer::new();
        renderer.check_plan(&plan)?;

        Ok(Self {
            config,
            platform,
            plan,
            renderer,
        })
    }

    /// Executes the full orchestration flow.
    ///
    /// # Errors
    ///
    /// Only fails if the organization's repositories cannot be listed;
    /// per-repository failures are recorded in the returned summary.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::new(self.config.dry_run());

        let repositories =
            discover_repositories(self.platform.as_ref(), self.config.owner()).await?;
        summary.repositories_scanned = repositories.len();

        let eligible = self.scan(repositories, &mut summary).await;
        summary.repositories_eligible = eligible.len();

        if eligible.is_empty() {
            info!(owner = %self.config.owner(), "No repositories use Greenkeeper");
            return Ok(summary);
        }

        info!(count = eligible.len(), "Found repositories to migrate");

        for repository in &eligible {
            let result = self.process_repository(repository).await;
            summary.record_result(&result);
        }

        Ok(summary)
    }

    /// Checks every README and returns the repositories to migrate.
    async fn scan(
        &self,
        repositories: Vec<RepositoryRef>,
        summary: &mut RunSummary,
    ) -> Vec<EligibleRepository> {
        let mut eligible = Vec::new();
        let mut outcomes = pin!(scan_repositories(self.platform.as_ref(), repositories));

        while let Some(outcome) = outcomes.next().await {
            match outcome {
                ScanOutcome::Eligible(repository) => eligible.push(repository),
                ScanOutcome::NotEligible { repository, reason } => {
                    summary.record_result(&ProcessingResult::Skipped {
                        repository: repository.full_name(),
                        reason,
                    });
                }
                ScanOutcome::Failed { repository, error } => {
                    summary.record_result(&ProcessingResult::Failed {
                        repository: repository.full_name(),
                        error: error.to_string(),
                    });
                }
            }
        }

        eligible
    }

    async fn process_repository(&self, eligible: &EligibleRepository) -> ProcessingResult {
        let full_name = eligible.repository.full_name();
        info!(repo = %full_name, "Processing repository");

        match create_pr(
            self.platform.as_ref(),
            eligible,
            &self.plan,
            &self.renderer,
            self.config.dry_run(),
        )
        .await
        {
            Ok(pr) => {
                match &pr.status {
                    PrStatus::Created { url, labeled, .. } => {
                        if !labeled {
                            warn!(repo = %full_name, "Pull request is missing its label");
                        }
                        info!(repo = %full_name, url = %url, "Pull request");
                    }
                    PrStatus::Previewed => print_dry_run_preview(&pr),
                }
                ProcessingResult::Success {
                    repository: full_name,
                    pr: pr.status,
                }
            }
            Err(e) => {
                error!(repo = %full_name, error = %e, "Failed to migrate repository");
                ProcessingResult::Failed {
                    repository: full_name,
                    error: e.to_string(),
                }
            }
        }
    }
}

fn print_dry_run_preview(pr: &MigrationPR) {
    println!("\n[DRY RUN] {}", pr.repository.full_name());
    println!(
        "  Would open \"{}\" from {} into {}",
        pr.title, pr.branch_name, pr.repository.default_branch
    );
    for file in &pr.files {
        println!("    {file}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{
        DirectoryEntry, FileContent, MockPlatform, PlatformError, PullRequestResult,
    };
    use std::fs;
    use tempfile::TempDir;

    const BADGE_README: &str = "# {name}\n\n[![Greenkeeper badge](https://badges.greenkeeper.io/octokit/{name}.svg)](https://greenkeeper.io/)\n";

    const WORKFLOW: &str = "on:\n  push:\n    branches:\n      - main\n      - greenkeeper/*\n";

    fn repo(name: &str) -> RepositoryRef {
        RepositoryRef::new("octokit", name, "main")
    }

    fn config(dry_run: bool) -> RunnerConfig {
        RunnerConfig::new("octokit", "token", dry_run)
    }

    fn expect_readmes(platform: &mut MockPlatform) {
        platform.expect_get_readme().returning(|repository| {
            let content = match repository.name.as_str() {
                "plain" => "# plain\n".to_string(),
                "bare" => return Ok(None),
                name => BADGE_README.replace("{name}", name),
            };
            Ok(Some(FileContent {
                path: "README.md".to_string(),
                content,
            }))
        });
    }

    #[tokio::test]
    async fn migrates_badge_repository_end_to_end() {
        let mut platform = MockPlatform::new();
        platform
            .expect_list_repositories()
            .withf(|owner| owner == "octokit")
            .returning(|_| Ok(vec![repo("app.js"), repo("plain"), repo("bare")]));
        expect_readmes(&mut platform);
        platform.expect_list_directory().returning(|_, _| {
            Ok(Some(vec![DirectoryEntry {
                name: "test.yml".to_string(),
                path: ".github/workflows/test.yml".to_string(),
                is_file: true,
            }]))
        });
        platform
            .expect_get_file()
            .returning(|_, _| Ok(Some(WORKFLOW.to_string())));
        platform
            .expect_create_pull_request()
            .withf(|repository, request| {
                repository.name == "app.js"
                    && request.title == "Replace Greenkeeper with Dependabot"
                    && request.change_set.files.len() == 3
            })
            .times(1)
            .returning(|_, _| {
                Ok(PullRequestResult {
                    number: 12,
                    url: "https://github.com/octokit/app.js/pull/12".to_string(),
                })
            });
        platform
            .expect_add_labels()
            .times(1)
            .returning(|_, _, _| Ok(()));

        let runner = Runner::with_platform(config(false), Box::new(platform)).unwrap();
        let summary = runner.run().await.unwrap();

        assert_eq!(summary.repositories_scanned, 3);
        assert_eq!(summary.repositories_eligible, 1);
        assert_eq!(summary.repositories_skipped, 2);
        assert_eq!(summary.prs_created, 1);
        assert_eq!(
            summary.pull_request_urls,
            vec!["https://github.com/octokit/app.js/pull/12".to_string()]
        );
        assert!(summary.all_success());
    }

    #[tokio::test]
    async fn continues_after_submission_failure() {
        let mut platform = MockPlatform::new();
        platform
            .expect_list_repositories()
            .returning(|_| Ok(vec![repo("first.js"), repo("second.js")]));
        expect_readmes(&mut platform);
        platform.expect_list_directory().returning(|_, _| Ok(None));
        platform
            .expect_create_pull_request()
            .withf(|repository, _| repository.name == "first.js")
            .times(1)
            .returning(|_, _| {
                Err(PlatformError::UnexpectedResponse {
                    message: "permission denied".to_string(),
                })
            });
        platform
            .expect_create_pull_request()
            .withf(|repository, _| repository.name == "second.js")
            .times(1)
            .returning(|_, _| {
                Ok(PullRequestResult {
                    number: 4,
                    url: "https://github.com/octokit/second.js/pull/4".to_string(),
                })
            });
        platform
            .expect_add_labels()
            .times(1)
            .returning(|_, _, _| Ok(()));

        let runner = Runner::with_platform(config(false), Box::new(platform)).unwrap();
        let summary = runner.run().await.unwrap();

        assert_eq!(summary.repositories_eligible, 2);
        assert_eq!(summary.failures, 1);
        assert_eq!(summary.prs_created, 1);
        assert!(summary.has_failures());
    }

    #[tokio::test]
    async fn dry_run_submits_nothing() {
        let mut platform = MockPlatform::new();
        platform
            .expect_list_repositories()
            .returning(|_| Ok(vec![repo("app.js")]));
        expect_readmes(&mut platform);
        platform.expect_list_directory().returning(|_, _| Ok(None));
        platform.expect_create_pull_request().never();
        platform.expect_add_labels().never();

        let runner = Runner::with_platform(config(true), Box::new(platform)).unwrap();
        let summary = runner.run().await.unwrap();

        assert!(summary.dry_run);
        assert_eq!(summary.prs_previewed, 1);
        assert_eq!(summary.prs_created, 0);
    }

    #[tokio::test]
    async fn listing_failure_aborts_run() {
        let mut platform = MockPlatform::new();
        platform.expect_list_repositories().returning(|_| {
            Err(PlatformError::UnexpectedResponse {
                message: "not an organization".to_string(),
            })
        });
        platform.expect_get_readme().never();

        let runner = Runner::with_platform(config(false), Box::new(platform)).unwrap();
        let result = runner.run().await;

        assert!(matches!(result, Err(RunnerError::Discovery(_))));
    }

    #[test]
    fn rejects_invalid_plan_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("plan.toml");
        fs::write(&path, "branch = \"bad..branch\"\n").unwrap();

        let result = Runner::with_platform(
            config(false).with_plan_path(path),
            Box::new(MockPlatform::new()),
        );

        assert!(matches!(result, Err(RunnerError::Config(_))));
    }

    #[test]
    fn rejects_plan_with_broken_template() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("plan.toml");
        fs::write(&path, "body = \"{{unknown_variable}}\"\n").unwrap();

        let result = Runner::with_platform(
            config(false).with_plan_path(path),
            Box::new(MockPlatform::new()),
        );

        assert!(matches!(result, Err(RunnerError::Template(_))));
    }
}

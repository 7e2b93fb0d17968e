//! Pull request creation for eligible repositories.
//!
//! For one repository this builds the complete change set (README,
//! Dependabot configuration, rewritten workflows), submits it as a single
//! pull request and labels it.

mod error;
mod migration_pr;
mod status;

pub use error::PrError;
pub use migration_pr::MigrationPR;
pub use status::PrStatus;

use crate::config::{MigrationPlan, DEPENDABOT_CONFIG_PATH};
use crate::discovery::EligibleRepository;
use crate::platform::{ChangeSet, Platform, PullRequestRequest, RepositoryRef};
use crate::templates::TemplateRenderer;
use crate::workflow::{
    is_workflow_file, transform_workflow_text, TransformedWorkflow, WORKFLOWS_PATH,
};
use std::collections::BTreeMap;
use tracing::{info, info_span, warn, Instrument};

/// Builds, submits and labels the migration pull request of one repository.
///
/// With `dry_run` set the change set is still built, but nothing is
/// submitted.
///
/// # Errors
///
/// Returns [`PrError`] if a workflow cannot be rewritten, a template fails
/// to render, or a platform request fails. A failure to apply the label is
/// only logged, since the pull request already exists at that point.
pub async fn create_pr<P>(
    platform: &P,
    eligible: &EligibleRepository,
    plan: &MigrationPlan,
    renderer: &TemplateRenderer,
    dry_run: bool,
) -> Result<MigrationPR, PrError>
where
    P: Platform + ?Sized,
{
    let repository = &eligible.repository;
    let span = info_span!("create_pr", repo = %repository.full_name());

    async {
        let change_set = build_change_set(platform, eligible, plan, renderer).await?;
        let files = change_set.paths();

        if dry_run {
            info!(files = ?files, "Dry run, not submitting change set");
            return Ok(MigrationPR {
                repository: repository.clone(),
                branch_name: plan.branch.clone(),
                title: plan.title.clone(),
                files,
                status: PrStatus::Previewed,
            });
        }

        let request = PullRequestRequest {
            branch: plan.branch.clone(),
            base: repository.default_branch.clone(),
            title: plan.title.clone(),
            body: renderer.render_pr_body(plan, repository)?,
            change_set,
        };

        info!("Creating pull request");
        let pr = platform.create_pull_request(repository, &request).await?;

        info!(label = %plan.label, "Adding label");
        let labeled = match platform
            .add_labels(repository, pr.number, &[plan.label.clone()])
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!(pr_number = pr.number, error = %e, "Failed to add label");
                false
            }
        };

        info!(pr_number = pr.number, url = %pr.url, "Pull request ready");

        Ok(MigrationPR {
            repository: repository.clone(),
            branch_name: request.branch,
            title: request.title,
            files,
            status: PrStatus::Created {
                number: pr.number,
                url: pr.url,
                labeled,
            },
        })
    }
    .instrument(span)
    .await
}

/// Assembles the full change set of one repository.
///
/// # Errors
///
/// Returns [`PrError`] if the workflows cannot be collected, the commit
/// message fails to render or the Dependabot configuration cannot be
/// serialized.
pub async fn build_change_set<P>(
    platform: &P,
    eligible: &EligibleRepository,
    plan: &MigrationPlan,
    renderer: &TemplateRenderer,
) -> Result<ChangeSet, PrError>
where
    P: Platform + ?Sized,
{
    let repository = &eligible.repository;
    let mut change_set = ChangeSet::new(renderer.render_commit_message(plan, repository)?);

    change_set.insert(&eligible.readme_path, &eligible.readme_replacement);
    change_set.insert(
        DEPENDABOT_CONFIG_PATH,
        plan.dependabot_config().map_err(PrError::DependabotConfig)?,
    );
    change_set
        .files
        .extend(collect_workflow_changes(platform, repository).await?);

    Ok(change_set)
}

/// Rewrites the repository's workflow files.
///
/// Only workflows that changed are returned, keyed by path. A repository
/// without a workflows directory yields an empty map.
///
/// # Errors
///
/// Returns [`PrError`] if a request fails or a workflow is not valid YAML.
pub async fn collect_workflow_changes<P>(
    platform: &P,
    repository: &RepositoryRef,
) -> Result<BTreeMap<String, String>, PrError>
where
    P: Platform + ?Sized,
{
    info!("Getting workflow files");
    let mut files = BTreeMap::new();

    let Some(entries) = platform.list_directory(repository, WORKFLOWS_PATH).await? else {
        info!("No workflow files found");
        return Ok(files);
    };

    for entry in entries
        .iter()
        .filter(|entry| entry.is_file && is_workflow_file(&entry.name))
    {
        let path = format!("{WORKFLOWS_PATH}/{}", entry.name);

        let Some(content) = platform.get_file(repository, &path).await? else {
            warn!(path = %path, "Workflow file listed but not found");
            continue;
        };

        let transformed = transform_workflow_text(&content).map_err(|source| PrError::Workflow {
            path: path.clone(),
            source,
        })?;

        match transformed {
            TransformedWorkflow::Rewritten(yaml) => {
                info!(path = %path, "Rewrote Greenkeeper branches");
                files.insert(path, yaml);
            }
            TransformedWorkflow::Skipped(reason) => {
                info!(path = %path, reason = %reason, "Skipping workflow");
            }
        }
    }

    Ok(files)
}

//! [`Platform`] implementation backed by the GitHub REST API.

use super::error::is_not_found;
use super::{
    DirectoryEntry, FileContent, Platform, PlatformError, PullRequestRequest, PullRequestResult,
    RepositoryRef,
};
use crate::rate_limit::ensure_core_rate_limit;
use async_trait::async_trait;
use octocrab::models::repos::Object;
use octocrab::models::Repository;
use octocrab::params::{self, repos::Reference};
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Results per page for repository listings.
const RESULTS_PER_PAGE: u8 = 100;

/// Mode of a regular, non-executable file in a git tree.
const TREE_BLOB_MODE: &str = "100644";
const TREE_BLOB_TYPE: &str = "blob";

#[derive(Debug, Serialize)]
struct TreeEntry<'a> {
    path: &'a str,
    mode: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct NewTree<'a> {
    base_tree: &'a str,
    tree: Vec<TreeEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct NewCommit<'a> {
    message: &'a str,
    tree: &'a str,
    parents: [&'a str; 1],
}

#[derive(Debug, Serialize)]
struct RefUpdate<'a> {
    sha: &'a str,
    force: bool,
}

/// A git object created through the Git Data API.
#[derive(Debug, Deserialize)]
struct GitObject {
    sha: String,
}

/// GitHub client authenticated with a personal access token.
pub struct GitHubPlatform {
    octocrab: Octocrab,
}

impl GitHubPlatform {
    /// Builds a client for github.com, or for the GitHub Enterprise API at
    /// `api_url` when given.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the URL is invalid or the client cannot be
    /// constructed.
    pub fn new(token: &str, api_url: Option<&str>) -> Result<Self, PlatformError> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());
        if let Some(api_url) = api_url {
            builder = builder.base_uri(api_url)?;
        }

        Ok(Self {
            octocrab: builder.build()?,
        })
    }

    /// Commits `request.change_set` on top of the base branch and points
    /// `request.branch` at it. Returns the new commit SHA.
    async fn commit_change_set(
        &self,
        repository: &RepositoryRef,
        request: &PullRequestRequest,
    ) -> Result<String, PlatformError> {
        let repos = self.octocrab.repos(&repository.owner, &repository.name);

        let base_ref = repos
            .get_ref(&Reference::Branch(request.base.clone()))
            .await?;
        let base_sha = match base_ref.object {
            Object::Commit { sha, .. } => sha,
            _ => {
                return Err(PlatformError::UnexpectedResponse {
                    message: format!("branch '{}' does not point at a commit", request.base),
                })
            }
        };

        let tree = NewTree {
            base_tree: &base_sha,
            tree: request
                .change_set
                .files
                .iter()
                .map(|(path, content)| TreeEntry {
                    path,
                    mode: TREE_BLOB_MODE,
                    kind: TREE_BLOB_TYPE,
                    content,
                })
                .collect(),
        };
        let tree: GitObject = self
            .octocrab
            .post(self.git_route(repository, "trees"), Some(&tree))
            .await?;
        debug!(sha = %tree.sha, "Created tree");

        let commit = NewCommit {
            message: &request.change_set.commit_message,
            tree: &tree.sha,
            parents: [&base_sha],
        };
        let commit: GitObject = self
            .octocrab
            .post(self.git_route(repository, "commits"), Some(&commit))
            .await?;
        debug!(sha = %commit.sha, "Created commit");

        match repos
            .get_ref(&Reference::Branch(request.branch.clone()))
            .await
        {
            Ok(_) => {
                info!(branch = %request.branch, "Branch exists, updating");
                let route = format!(
                    "{}/heads/{}",
                    self.git_route(repository, "refs"),
                    request.branch
                );
                let update = RefUpdate {
                    sha: &commit.sha,
                    force: true,
                };
                let _: serde_json::Value = self.octocrab.patch(route, Some(&update)).await?;
            }
            Err(e) if is_not_found(&e) => {
                debug!(branch = %request.branch, "Creating branch");
                repos
                    .create_ref(&Reference::Branch(request.branch.clone()), &commit.sha)
                    .await?;
            }
            Err(e) => return Err(e.into()),
        }

        Ok(commit.sha)
    }

    /// Returns the open pull request for `branch`, if any.
    async fn find_open_pull_request(
        &self,
        repository: &RepositoryRef,
        branch: &str,
    ) -> Result<Option<PullRequestResult>, PlatformError> {
        let page = self
            .octocrab
            .pulls(&repository.owner, &repository.name)
            .list()
            .state(params::State::Open)
            .head(format!("{}:{}", repository.owner, branch))
            .send()
            .await?;

        Ok(page
            .items
            .into_iter()
            .next()
            .map(|pr| pull_request_result(repository, pr)))
    }

    fn git_route(&self, repository: &RepositoryRef, kind: &str) -> String {
        format!(
            "/repos/{}/{}/git/{}",
            repository.owner, repository.name, kind
        )
    }
}

#[async_trait]
impl Platform for GitHubPlatform {
    async fn list_repositories(&self, owner: &str) -> Result<Vec<RepositoryRef>, PlatformError> {
        ensure_core_rate_limit(&self.octocrab).await?;
        let mut page = self
            .octocrab
            .orgs(owner)
            .list_repos()
            .per_page(RESULTS_PER_PAGE)
            .send()
            .await?;

        let mut repositories = Vec::new();
        loop {
            repositories.extend(
                page.take_items()
                    .iter()
                    .filter_map(|repo| repository_ref(owner, repo)),
            );

            ensure_core_rate_limit(&self.octocrab).await?;
            match self.octocrab.get_page::<Repository>(&page.next).await? {
                Some(next_page) => page = next_page,
                None => break,
            }
        }

        Ok(repositories)
    }

    async fn get_readme(
        &self,
        repository: &RepositoryRef,
    ) -> Result<Option<FileContent>, PlatformError> {
        let result = self
            .octocrab
            .repos(&repository.owner, &repository.name)
            .get_readme()
            .send()
            .await;

        match result {
            Ok(readme) => {
                let content = readme.decoded_content().ok_or_else(|| PlatformError::Decode {
                    path: readme.path.clone(),
                })?;
                Ok(Some(FileContent {
                    path: readme.path,
                    content,
                }))
            }
            Err(e) if is_not_found(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_directory(
        &self,
        repository: &RepositoryRef,
        path: &str,
    ) -> Result<Option<Vec<DirectoryEntry>>, PlatformError> {
        let result = self
            .octocrab
            .repos(&repository.owner, &repository.name)
            .get_content()
            .path(path)
            .send()
            .await;

        match result {
            Ok(mut items) => Ok(Some(
                items
                    .take_items()
                    .into_iter()
                    .map(|item| DirectoryEntry {
                        is_file: item.r#type == "file",
                        name: item.name,
                        path: item.path,
                    })
                    .collect(),
            )),
            Err(e) if is_not_found(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_file(
        &self,
        repository: &RepositoryRef,
        path: &str,
    ) -> Result<Option<String>, PlatformError> {
        let result = self
            .octocrab
            .repos(&repository.owner, &repository.name)
            .get_content()
            .path(path)
            .send()
            .await;

        match result {
            Ok(mut items) => {
                let items = items.take_items();
                let Some(item) = items.first() else {
                    return Ok(None);
                };
                item.decoded_content()
                    .map(Some)
                    .ok_or_else(|| PlatformError::Decode {
                        path: path.to_string(),
                    })
            }
            Err(e) if is_not_found(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn create_pull_request(
        &self,
        repository: &RepositoryRef,
        request: &PullRequestRequest,
    ) -> Result<PullRequestResult, PlatformError> {
        ensure_core_rate_limit(&self.octocrab).await?;

        let sha = self.commit_change_set(repository, request).await?;
        info!(branch = %request.branch, sha = %sha, "Pushed change set");

        if let Some(existing) = self
            .find_open_pull_request(repository, &request.branch)
            .await?
        {
            info!(
                pr_number = existing.number,
                "Pull request already open for branch"
            );
            return Ok(existing);
        }

        let pr = self
            .octocrab
            .pulls(&repository.owner, &repository.name)
            .create(&request.title, &request.branch, &request.base)
            .body(&request.body)
            .send()
            .await?;

        Ok(pull_request_result(repository, pr))
    }

    async fn add_labels(
        &self,
        repository: &RepositoryRef,
        number: u64,
        labels: &[String],
    ) -> Result<(), PlatformError> {
        self.octocrab
            .issues(&repository.owner, &repository.name)
            .add_labels(number, labels)
            .await?;
        Ok(())
    }
}

/// Converts a listed repository, skipping archived ones since they are
/// read-only.
fn repository_ref(owner: &str, repo: &Repository) -> Option<RepositoryRef> {
    if repo.archived.unwrap_or(false) {
        debug!(repo = %repo.name, "Skipping archived repository");
        return None;
    }

    Some(RepositoryRef {
        owner: repo
            .owner
            .as_ref()
            .map_or_else(|| owner.to_string(), |author| author.login.clone()),
        name: repo.name.clone(),
        default_branch: repo
            .default_branch
            .clone()
            .unwrap_or_else(|| "main".to_string()),
    })
}

fn pull_request_result(
    repository: &RepositoryRef,
    pr: octocrab::models::pulls::PullRequest,
) -> PullRequestResult {
    let url = pr.html_url.as_ref().map_or_else(
        || {
            format!(
                "https://github.com/{}/pull/{}",
                repository.full_name(),
                pr.number
            )
        },
        |url| url.to_string(),
    );

    PullRequestResult {
        number: pr.number,
        url,
    }
}

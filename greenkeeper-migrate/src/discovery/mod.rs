//! Repository discovery.
//!
//! Lists every repository of an account and checks each README for the
//! Greenkeeper badge. Repositories are checked one at a time, in listing
//! order.

mod eligible;
mod error;

pub use eligible::{EligibleRepository, ScanOutcome};
pub use error::DiscoveryError;

use crate::format::format_markdown;
use crate::patterns::{detect_legacy_badge, strip_legacy_badge};
use crate::platform::{Platform, RepositoryRef};
use futures::stream::{self, Stream, StreamExt};
use tracing::{info, info_span, warn, Instrument};

/// Lists the repositories of `owner`.
///
/// # Errors
///
/// Returns [`DiscoveryError`] if the listing fails.
pub async fn discover_repositories<P>(
    platform: &P,
    owner: &str,
) -> Result<Vec<RepositoryRef>, DiscoveryError>
where
    P: Platform + ?Sized,
{
    let span = info_span!("discover", owner = %owner);

    async {
        info!("Listing repositories");
        let repositories = platform
            .list_repositories(owner)
            .await
            .map_err(|source| DiscoveryError::ListFailed {
                owner: owner.to_string(),
                source,
            })?;

        info!(count = repositories.len(), "Discovery complete");
        Ok(repositories)
    }
    .instrument(span)
    .await
}

/// Checks `repositories` lazily, yielding one [`ScanOutcome`] per repository.
///
/// Each README is only fetched when the stream is polled for it.
pub fn scan_repositories<'a, P>(
    platform: &'a P,
    repositories: Vec<RepositoryRef>,
) -> impl Stream<Item = ScanOutcome> + 'a
where
    P: Platform + ?Sized,
{
    stream::iter(repositories).then(move |repository| check_repository(platform, repository))
}

/// Checks a single repository's README.
///
/// A missing README is not an error; the repository is simply not eligible.
pub async fn check_repository<P>(platform: &P, repository: RepositoryRef) -> ScanOutcome
where
    P: Platform + ?Sized,
{
    let span = info_span!("scan", repo = %repository.full_name());

    async move {
        info!("Checking README");

        match platform.get_readme(&repository).await {
            Ok(Some(readme)) if detect_legacy_badge(&readme.content) => {
                info!(path = %readme.path, "Greenkeeper badge found");
                ScanOutcome::Eligible(EligibleRepository {
                    repository,
                    readme_path: readme.path,
                    readme_replacement: format_markdown(&strip_legacy_badge(&readme.content)),
                })
            }
            Ok(Some(_)) => {
                info!("No Greenkeeper badge found");
                ScanOutcome::NotEligible {
                    repository,
                    reason: "no Greenkeeper badge".to_string(),
                }
            }
            Ok(None) => {
                info!("No README found");
                ScanOutcome::NotEligible {
                    repository,
                    reason: "no README".to_string(),
                }
            }
            Err(error) => {
                warn!(error = %error, "Failed to fetch README");
                ScanOutcome::Failed { repository, error }
            }
        }
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{FileContent, MockPlatform, PlatformError};

    const README: &str = "# hello\n\n[![Greenkeeper badge](https://badges.greenkeeper.io/octokit/hello.svg)](https://greenkeeper.io/)\n\nSay hello.\n";

    fn repo(name: &str) -> RepositoryRef {
        RepositoryRef::new("octokit", name, "main")
    }

    fn readme(content: &str) -> Option<FileContent> {
        Some(FileContent {
            path: "README.md".to_string(),
            content: content.to_string(),
        })
    }

    #[tokio::test]
    async fn marks_badge_repository_eligible() {
        let mut platform = MockPlatform::new();
        platform
            .expect_get_readme()
            .returning(|_| Ok(readme(README)));

        let outcome = check_repository(&platform, repo("hello")).await;

        let ScanOutcome::Eligible(eligible) = outcome else {
            panic!("expected eligible repository");
        };
        assert_eq!(eligible.repository, repo("hello"));
        assert_eq!(eligible.readme_path, "README.md");
        assert_eq!(eligible.readme_replacement, "# hello\n\nSay hello.\n");
        assert!(!detect_legacy_badge(&eligible.readme_replacement));
    }

    #[tokio::test]
    async fn skips_repository_without_badge() {
        let mut platform = MockPlatform::new();
        platform
            .expect_get_readme()
            .returning(|_| Ok(readme("# plain\n")));

        let outcome = check_repository(&platform, repo("plain")).await;

        assert!(matches!(outcome, ScanOutcome::NotEligible { .. }));
    }

    #[tokio::test]
    async fn skips_repository_without_readme() {
        let mut platform = MockPlatform::new();
        platform.expect_get_readme().returning(|_| Ok(None));

        let outcome = check_repository(&platform, repo("empty")).await;

        assert!(
            matches!(outcome, ScanOutcome::NotEligible { reason, .. } if reason == "no README")
        );
    }

    #[tokio::test]
    async fn isolates_readme_failures() {
        let mut platform = MockPlatform::new();
        platform
            .expect_get_readme()
            .withf(|repository| repository.name == "broken")
            .returning(|_| {
                Err(PlatformError::UnexpectedResponse {
                    message: "boom".to_string(),
                })
            });
        platform
            .expect_get_readme()
            .withf(|repository| repository.name == "hello")
            .returning(|_| Ok(readme(README)));

        let outcomes: Vec<ScanOutcome> =
            scan_repositories(&platform, vec![repo("broken"), repo("hello")])
                .collect()
                .await;

        assert_eq!(outcomes.len(), 2);
        assert!(matches!(outcomes[0], ScanOutcome::Failed { .. }));
        assert!(matches!(outcomes[1], ScanOutcome::Eligible(_)));
    }

    #[tokio::test]
    async fn reports_listing_failure() {
        let mut platform = MockPlatform::new();
        platform.expect_list_repositories().returning(|_| {
            Err(PlatformError::UnexpectedResponse {
                message: "forbidden".to_string(),
            })
        });

        let result = discover_repositories(&platform, "octokit").await;

        assert!(matches!(
            result,
            Err(DiscoveryError::ListFailed { owner, .. }) if owner == "octokit"
        ));
    }
}

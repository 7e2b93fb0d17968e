//! Template renderer.

use crate::config::MigrationPlan;
use crate::platform::RepositoryRef;
use handlebars::{no_escape, Handlebars};
use serde_json::{json, Value};

/// Creates a configured Handlebars registry.
///
/// The registry is configured with:
/// - No HTML escaping (for markdown output)
/// - Strict mode (catches missing variables)
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs
}

/// Renders the per-repository text of a [`MigrationPlan`].
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Creates a new template renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlebars: create_handlebars_registry(),
        }
    }

    /// Renders the pull request body for `repository`.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_pr_body(
        &self,
        plan: &MigrationPlan,
        repository: &RepositoryRef,
    ) -> Result<String, super::TemplateError> {
        self.render_template(&plan.body, &template_data(plan, repository))
    }

    /// Renders the commit message for `repository`.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_commit_message(
        &self,
        plan: &MigrationPlan,
        repository: &RepositoryRef,
    ) -> Result<String, super::TemplateError> {
        self.render_template(&plan.commit_message, &template_data(plan, repository))
    }

    /// Renders every template of `plan` against a placeholder repository, so
    /// a broken template fails the run before anything is submitted.
    ///
    /// # Errors
    ///
    /// Returns the first rendering error.
    pub fn check_plan(&self, plan: &MigrationPlan) -> Result<(), super::TemplateError> {
        let repository = RepositoryRef::new("owner", "repo", "main");
        self.render_pr_body(plan, &repository)?;
        self.render_commit_message(plan, &repository)?;
        Ok(())
    }

    fn render_template(
        &self,
        template: &str,
        data: &Value,
    ) -> Result<String, super::TemplateError> {
        Ok(self.handlebars.render_template(template, data)?)
    }
}

fn template_data(plan: &MigrationPlan, repository: &RepositoryRef) -> Value {
    json!({
        "owner": repository.owner,
        "repo": repository.name,
        "full_name": repository.full_name(),
        "issue_url": plan.issue_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repository() -> RepositoryRef {
        RepositoryRef::new("octokit", "rest.js", "main")
    }

    #[test]
    fn renders_default_body() {
        let renderer = TemplateRenderer::new();
        let body = renderer
            .render_pr_body(&MigrationPlan::default(), &repository())
            .unwrap();

        assert_eq!(
            body,
            "Follow up to https://github.com/octokit/create-octokit-project.js/issues/16"
        );
    }

    #[test]
    fn renders_repository_variables() {
        let renderer = TemplateRenderer::new();
        let plan = MigrationPlan {
            commit_message: "ci({{repo}}): drop Greenkeeper from {{full_name}}".to_string(),
            ..MigrationPlan::default()
        };

        let message = renderer
            .render_commit_message(&plan, &repository())
            .unwrap();

        assert_eq!(message, "ci(rest.js): drop Greenkeeper from octokit/rest.js");
    }

    #[test]
    fn does_not_escape_markdown() {
        let renderer = TemplateRenderer::new();
        let plan = MigrationPlan {
            body: "See <{{issue_url}}> & {{owner}}".to_string(),
            issue_url: "https://example.com/?a=1&b=2".to_string(),
            ..MigrationPlan::default()
        };

        let body = renderer.render_pr_body(&plan, &repository()).unwrap();

        assert_eq!(body, "See <https://example.com/?a=1&b=2> & octokit");
    }

    #[test]
    fn check_plan_rejects_unknown_variables() {
        let renderer = TemplateRenderer::new();
        let plan = MigrationPlan {
            body: "{{missing}}".to_string(),
            ..MigrationPlan::default()
        };

        assert!(renderer.check_plan(&plan).is_err());
        assert!(renderer.check_plan(&MigrationPlan::default()).is_ok());
    }
}

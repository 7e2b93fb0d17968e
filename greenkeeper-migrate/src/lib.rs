#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod discovery;
pub mod format;
pub mod patterns;
pub mod platform;
pub mod pull_requests;
pub mod rate_limit;
pub mod runner;
pub mod summary;
pub mod templates;
pub mod workflow;

pub use config::{load_plan, ConfigError, MigrationPlan, DEPENDABOT_CONFIG_PATH};
pub use discovery::{
    check_repository, discover_repositories, scan_repositories, DiscoveryError,
    EligibleRepository, ScanOutcome,
};
pub use format::{format_markdown, format_yaml};
pub use patterns::{
    detect_legacy_badge, is_legacy_branch_name, rewrite_branch_name, strip_legacy_badge,
    DEPENDABOT_BRANCH_PREFIX, LEGACY_BRANCH_PREFIX,
};
pub use platform::{GitHubPlatform, Platform, PlatformError, RepositoryRef};
pub use pull_requests::{create_pr, MigrationPR, PrError, PrStatus};
pub use rate_limit::{check_core_rate_limit, ensure_core_rate_limit, wait_if_needed, RateLimitInfo};
pub use runner::{Runner, RunnerConfig, RunnerError};
pub use summary::{ProcessingResult, RunSummary};
pub use templates::{create_handlebars_registry, TemplateError, TemplateRenderer};
pub use workflow::{
    is_workflow_file, transform_workflow, transform_workflow_text, SkipReason, TransformedWorkflow,
    WorkflowChange, WorkflowError,
};

//! Runner error types.

/// Errors that abort a run before or while listing repositories.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Migration plan loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Migration plan templates that fail to render.
    #[error(transparent)]
    Template(#[from] crate::templates::TemplateError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Platform(#[from] crate::platform::PlatformError),

    /// Repository listing errors.
    #[error(transparent)]
    Discovery(#[from] crate::discovery::DiscoveryError),
}

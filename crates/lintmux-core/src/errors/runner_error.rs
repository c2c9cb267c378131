//! Top-level runner errors.

use super::error_code::{self, LintmuxErrorCode};
use super::{BaselineError, CacheError, ConfigError, ToolError, WalkError};

/// Errors that abort an entire run, as opposed to [`ToolError`]s which are
/// recovered per analyzer. Aggregates subsystem errors via `From`.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Walk error: {0}")]
    Walk(#[from] WalkError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Baseline error: {0}")]
    Baseline(#[from] BaselineError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),
}

impl LintmuxErrorCode for RunnerError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Walk(e) => e.error_code(),
            Self::Cache(e) => e.error_code(),
            Self::Baseline(e) => e.error_code(),
            Self::Tool(e) => e.error_code(),
        }
    }
}

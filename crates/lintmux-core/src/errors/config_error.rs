//! Configuration errors.

use super::error_code::{self, LintmuxErrorCode};

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Invalid value for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Unknown analyzer id: {0}")]
    UnknownTool(String),

    #[error("Duplicate analyzer id: {0}")]
    DuplicateTool(String),
}

impl LintmuxErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}

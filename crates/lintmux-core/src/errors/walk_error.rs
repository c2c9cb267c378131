//! Path matching and directory walk errors.

use super::error_code::{self, LintmuxErrorCode};

/// Errors raised by the path-ignore engine.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    #[error("Invalid ignore pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Failed to read ignore file {path}: {message}")]
    IgnoreFileUnreadable { path: String, message: String },

    #[error("Failed to walk {path}: {message}")]
    WalkFailed { path: String, message: String },
}

impl LintmuxErrorCode for WalkError {
    fn error_code(&self) -> &'static str {
        error_code::WALK_ERROR
    }
}

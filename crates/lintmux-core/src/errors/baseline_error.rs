//! Baseline archive errors.

use super::error_code::{self, LintmuxErrorCode};

/// Errors raised while loading or writing the baseline document.
/// An absent baseline file is not an error; an unparsable one is.
#[derive(Debug, thiserror::Error)]
pub enum BaselineError {
    #[error("Failed to read baseline {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Failed to parse baseline {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Failed to write baseline {path}: {message}")]
    WriteError { path: String, message: String },
}

impl LintmuxErrorCode for BaselineError {
    fn error_code(&self) -> &'static str {
        error_code::BASELINE_ERROR
    }
}

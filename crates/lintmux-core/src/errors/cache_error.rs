//! Result cache errors.
//!
//! Stale or corrupt cache entries are self-healed and never surface as
//! errors; this enum covers shared-infrastructure failures only (an
//! unwritable cache directory is the caller's problem, a bad entry is not).

use super::error_code::{self, LintmuxErrorCode};

/// Errors raised while persisting cache entries.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Failed to create cache directory {path}: {message}")]
    DirectoryUnwritable { path: String, message: String },

    #[error("Failed to write cache entry for {tool}: {message}")]
    WriteFailed { tool: String, message: String },
}

impl LintmuxErrorCode for CacheError {
    fn error_code(&self) -> &'static str {
        error_code::CACHE_ERROR
    }
}

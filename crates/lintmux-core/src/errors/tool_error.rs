//! Per-analyzer failures.
//!
//! These are the payload of a failed run result: caught at the worker
//! boundary and returned as data, never allowed to abort sibling analyzers.

use super::error_code::{self, LintmuxErrorCode};

/// A failure in one analyzer's setup/run/parse pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Setup failed for {tool}: {message}")]
    Setup { tool: String, message: String },

    #[error("Execution failed for {tool}: {message}")]
    Execution { tool: String, message: String },

    /// Parse failures carry the raw output for diagnosis.
    #[error("Could not parse output of {tool}: {message}")]
    Parse {
        tool: String,
        message: String,
        raw_output: String,
    },

    #[error("Analyzer {tool} panicked: {message}")]
    Panic { tool: String, message: String },
}

impl ToolError {
    /// The analyzer this failure belongs to.
    pub fn tool(&self) -> &str {
        match self {
            Self::Setup { tool, .. }
            | Self::Execution { tool, .. }
            | Self::Parse { tool, .. }
            | Self::Panic { tool, .. } => tool,
        }
    }
}

impl LintmuxErrorCode for ToolError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Setup { .. } => error_code::TOOL_SETUP_ERROR,
            Self::Execution { .. } => error_code::TOOL_EXEC_ERROR,
            Self::Parse { .. } => error_code::TOOL_PARSE_ERROR,
            Self::Panic { .. } => error_code::TOOL_PANIC,
        }
    }
}

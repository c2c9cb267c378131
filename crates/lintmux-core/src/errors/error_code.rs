//! Stable error codes for machine-readable error reporting.

pub const CONFIG_ERROR: &str = "LM_CONFIG";
pub const WALK_ERROR: &str = "LM_WALK";
pub const CACHE_ERROR: &str = "LM_CACHE";
pub const TOOL_SETUP_ERROR: &str = "LM_TOOL_SETUP";
pub const TOOL_EXEC_ERROR: &str = "LM_TOOL_EXEC";
pub const TOOL_PARSE_ERROR: &str = "LM_TOOL_PARSE";
pub const TOOL_PANIC: &str = "LM_TOOL_PANIC";
pub const BASELINE_ERROR: &str = "LM_BASELINE";
pub const RUNNER_ERROR: &str = "LM_RUNNER";

/// Every lintmux error exposes a stable code string, independent of the
/// human-readable message.
pub trait LintmuxErrorCode {
    fn error_code(&self) -> &'static str;
}

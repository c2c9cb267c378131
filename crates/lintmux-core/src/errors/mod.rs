//! Error handling for lintmux.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod baseline_error;
pub mod cache_error;
pub mod config_error;
pub mod error_code;
pub mod runner_error;
pub mod tool_error;
pub mod walk_error;

pub use baseline_error::BaselineError;
pub use cache_error::CacheError;
pub use config_error::ConfigError;
pub use error_code::LintmuxErrorCode;
pub use runner_error::RunnerError;
pub use tool_error::ToolError;
pub use walk_error::WalkError;

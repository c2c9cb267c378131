//! lintmux-core — shared foundation for the lintmux meta-runner.
//!
//! Holds the pieces every other crate needs: the `Violation` data model,
//! per-subsystem error enums, layered configuration, and tracing setup.
//! No analysis or execution logic lives here.

pub mod config;
pub mod errors;
pub mod trace;
pub mod types;

pub use config::LintmuxConfig;
pub use errors::{
    BaselineError, CacheError, ConfigError, RunnerError, ToolError, WalkError,
};
pub use types::{Severity, Violation, ViolationRecord};

//! The analyzer contract.

use std::path::PathBuf;

use glob::Pattern;
use lintmux_core::errors::ToolError;
use lintmux_core::types::Violation;

/// An external static-analysis tool, adapted behind this contract.
///
/// The runner never inspects an analyzer beyond these methods. `run` is an
/// opaque blocking call (typically a subprocess or container invocation);
/// if the external process can hang, bounding it is the adapter's job, not
/// the runner's.
pub trait Tool: Send + Sync {
    /// Stable identifier, also the cache and baseline key.
    fn id(&self) -> &str;

    /// Glob selecting the files this analyzer consumes. A filter without
    /// `/` (e.g. `*.py`) matches file names at any depth.
    fn file_filter(&self) -> &Pattern;

    /// Version string of the adapted tool, part of the cache key.
    fn version(&self) -> &str;

    /// Idempotent installation / environment preparation. Called once per
    /// run, before any analyzer starts executing.
    fn setup(&self) -> Result<(), ToolError>;

    /// Execute the tool over `files` and return its raw output.
    fn run(&self, files: &[PathBuf]) -> Result<String, ToolError>;

    /// Parse raw output into violations. Implementations should include
    /// the raw output in [`ToolError::Parse`] when they cannot.
    fn parse(&self, raw_output: &str) -> Result<Vec<Violation>, ToolError>;
}

impl std::fmt::Debug for dyn Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool").field("id", &self.id()).finish()
    }
}

//! lintmux-runner — the orchestration engine of the lintmux meta-runner.
//!
//! Pipeline: [`pathmatch`] narrows the project to files that survive the
//! ignore patterns, [`runner`] drives every analyzer concurrently with
//! per-analyzer failure isolation, [`cache`] short-circuits analyzers whose
//! inputs have not changed, and [`baseline`] marks findings that were
//! already accepted in a previous run.

pub mod baseline;
pub mod cache;
pub mod pathmatch;
pub mod runner;
pub mod tools;

pub use baseline::{fingerprint, Baseline};
pub use cache::ResultCache;
pub use pathmatch::{Entry, PathMatcher, PatternSet};
pub use runner::{ProgressBoard, RunOptions, RunReport, Runner, ToolOutcome, ToolProgress};
pub use tools::{Tool, ToolRegistry};

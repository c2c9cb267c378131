//! Concurrent analyzer execution.
//!
//! One worker thread per analyzer. Each worker runs `setup()`, waits on a
//! barrier shared by all workers (so installation work is batched before
//! any potentially-long `run()` begins), executes the tool over its target
//! files — consulting the result cache when enabled — parses the raw
//! output, and marks findings already accepted in the baseline. A failure
//! or panic anywhere in one analyzer's pipeline becomes that analyzer's
//! error result; siblings are never affected.

pub mod progress;

use std::collections::{BTreeMap, BTreeSet};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::time::{Duration, SystemTime};

use lintmux_core::errors::{ConfigError, RunnerError, ToolError, WalkError};
use lintmux_core::types::collections::FxHashSet;
use lintmux_core::types::Violation;

use crate::baseline::Baseline;
use crate::cache::ResultCache;
use crate::pathmatch::PathMatcher;
use crate::tools::Tool;

pub use progress::{ProgressBoard, ToolProgress};

/// Per-analyzer outcome: findings, or the captured failure.
pub type ToolOutcome = Result<Vec<Violation>, ToolError>;

/// Options for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Consult the result cache. Must be false when the working tree is
    /// transiently mutated for a comparison run, so a run over temporary
    /// contents can never poison the cache.
    pub use_cache: bool,
    /// Progress ticker interval.
    pub tick_interval: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            tick_interval: Duration::from_millis(100),
        }
    }
}

/// Aggregate result of one run, re-indexed by analyzer id so callers never
/// depend on completion order.
#[derive(Debug)]
pub struct RunReport {
    pub outcomes: BTreeMap<String, ToolOutcome>,
}

impl RunReport {
    pub fn outcome(&self, tool_id: &str) -> Option<&ToolOutcome> {
        self.outcomes.get(tool_id)
    }

    /// Findings not recognized by the baseline, across all analyzers.
    pub fn new_findings(&self) -> usize {
        self.violations().filter(|v| !v.filtered).count()
    }

    /// Findings suppressed by the baseline, across all analyzers.
    pub fn filtered_findings(&self) -> usize {
        self.violations().filter(|v| v.filtered).count()
    }

    /// Ids of analyzers whose pipeline failed, sorted.
    pub fn failed_tools(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| outcome.is_err())
            .map(|(id, _)| id.as_str())
            .collect()
    }

    fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.outcomes
            .values()
            .filter_map(|outcome| outcome.as_ref().ok())
            .flatten()
    }
}

/// Drives a set of analyzers to completion concurrently.
pub struct Runner<'m> {
    matcher: &'m PathMatcher,
    cache: Option<ResultCache>,
}

impl<'m> Runner<'m> {
    pub fn new(matcher: &'m PathMatcher) -> Self {
        Self {
            matcher,
            cache: None,
        }
    }

    /// Attach a result cache. Without one, every analyzer always runs.
    pub fn with_cache(mut self, cache: ResultCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Run every analyzer over the intersection of `paths`, the analyzer's
    /// file filter, and ignore-pattern survival, marking findings against
    /// `baseline`. An empty `paths` means the whole project root.
    ///
    /// Analyzer ids must be unique: the report is keyed by id, so two
    /// tools sharing one would silently collapse. Duplicates are rejected.
    pub fn run(
        &self,
        tools: &[Arc<dyn Tool>],
        paths: &[PathBuf],
        baseline: &Baseline,
        options: &RunOptions,
    ) -> Result<RunReport, RunnerError> {
        let board = ProgressBoard::for_tools(tools.iter().map(|t| t.id().to_string()));
        self.run_with_progress(tools, paths, baseline, options, &board)
    }

    /// Like [`Runner::run`], observing progress through a caller-owned
    /// board. The board must have one slot per tool, in `tools` order.
    pub fn run_with_progress(
        &self,
        tools: &[Arc<dyn Tool>],
        paths: &[PathBuf],
        baseline: &Baseline,
        options: &RunOptions,
        board: &ProgressBoard,
    ) -> Result<RunReport, RunnerError> {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for tool in tools {
            if !seen.insert(tool.id()) {
                return Err(ConfigError::DuplicateTool(tool.id().to_string()).into());
            }
        }

        // Target selection happens up front: a failure to walk the project
        // is shared infrastructure, not any one analyzer's problem.
        let targets: Vec<BTreeSet<PathBuf>> = tools
            .iter()
            .map(|tool| self.target_files(tool.as_ref(), paths))
            .collect::<Result<_, WalkError>>()?;

        let barrier = Barrier::new(tools.len());
        let (tx, rx) = crossbeam_channel::unbounded::<(String, ToolOutcome)>();

        std::thread::scope(|scope| {
            for (index, (tool, files)) in tools.iter().zip(&targets).enumerate() {
                let tx = tx.clone();
                let barrier = &barrier;
                let tool = Arc::clone(tool);
                scope.spawn(move || {
                    // Setup first, and release the barrier no matter what:
                    // a failed setup must not strand the other workers.
                    let setup_result = catch_tool(tool.id(), || tool.setup());
                    barrier.wait();

                    let keep_ticking = Arc::new(AtomicBool::new(true));
                    let ticker = {
                        let keep_ticking = Arc::clone(&keep_ticking);
                        let interval = options.tick_interval;
                        scope.spawn(move || {
                            while keep_ticking.load(Ordering::Relaxed) {
                                board.advance(index);
                                std::thread::sleep(interval);
                            }
                        })
                    };

                    let outcome = setup_result
                        .and_then(|()| self.execute(tool.as_ref(), files, options, baseline));

                    // Stop the ticker before completing the slot so it can
                    // never tick past a finished analyzer.
                    keep_ticking.store(false, Ordering::Relaxed);
                    let _ = ticker.join();
                    board.complete(index);

                    if let Err(ref e) = outcome {
                        tracing::warn!(tool = tool.id(), error = %e, "analyzer failed");
                    }
                    let _ = tx.send((tool.id().to_string(), outcome));
                });
            }
        });
        drop(tx);

        let outcomes: BTreeMap<String, ToolOutcome> = rx.iter().collect();
        Ok(RunReport { outcomes })
    }

    /// One analyzer's pipeline after setup: run (via cache), parse, mark.
    fn execute(
        &self,
        tool: &dyn Tool,
        files: &BTreeSet<PathBuf>,
        options: &RunOptions,
        baseline: &Baseline,
    ) -> ToolOutcome {
        if files.is_empty() {
            tracing::debug!(tool = tool.id(), "no matching files, nothing to run");
            return Ok(Vec::new());
        }

        let raw = self.raw_output(tool, files, options.use_cache)?;
        let mut violations = catch_tool(tool.id(), || tool.parse(&raw))?;
        let marked = baseline.mark(tool.id(), &mut violations);
        tracing::debug!(
            tool = tool.id(),
            findings = violations.len(),
            filtered = marked,
            "analyzer complete"
        );
        Ok(violations)
    }

    /// Obtain raw output, consulting the cache when enabled. Cache write
    /// failures are logged, never fatal: the output is already in hand.
    fn raw_output(
        &self,
        tool: &dyn Tool,
        files: &BTreeSet<PathBuf>,
        use_cache: bool,
    ) -> Result<String, ToolError> {
        let cache = match (&self.cache, use_cache) {
            (Some(cache), true) => Some(cache),
            _ => None,
        };

        if let Some(cache) = cache {
            if let Some(raw) = cache.get(tool.id(), tool.version(), files) {
                return Ok(raw);
            }
        }

        let file_list: Vec<PathBuf> = files.iter().cloned().collect();
        // Timestamp the entry at run start, not at write time: an input
        // modified while the run is in flight must not look fresh later.
        let started = SystemTime::now();
        let raw = catch_tool(tool.id(), || tool.run(&file_list))?;

        if let Some(cache) = cache {
            if let Err(e) = cache.put(tool.id(), tool.version(), files, &raw, started) {
                tracing::warn!(tool = tool.id(), error = %e, "cache write failed");
            }
        }
        Ok(raw)
    }

    /// Caller-supplied paths ∩ tool file filter ∩ ignore-pattern survival.
    fn target_files(
        &self,
        tool: &dyn Tool,
        paths: &[PathBuf],
    ) -> Result<BTreeSet<PathBuf>, WalkError> {
        let candidates = self.matcher.files_matching(tool.file_filter())?;
        Ok(candidates
            .into_iter()
            .filter(|candidate| {
                paths.is_empty()
                    || paths
                        .iter()
                        .any(|p| candidate == p || candidate.starts_with(p))
            })
            .collect())
    }
}

/// Run a fallible stage with a panic net: a panicking adapter becomes that
/// analyzer's error result instead of taking down the pool.
fn catch_tool<T>(
    tool_id: &str,
    stage: impl FnOnce() -> Result<T, ToolError>,
) -> Result<T, ToolError> {
    match catch_unwind(AssertUnwindSafe(stage)) {
        Ok(result) => result,
        Err(payload) => Err(ToolError::Panic {
            tool: tool_id.to_string(),
            message: panic_message(&payload),
        }),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

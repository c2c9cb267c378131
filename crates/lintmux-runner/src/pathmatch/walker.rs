//! Pruned directory walk with in-memory caching.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use glob::{MatchOptions, Pattern};
use lintmux_core::errors::WalkError;

use super::pattern::PatternSet;

/// Options for matching a tool's file filter: filters are user-facing
/// globs like `*.py`, so `*` may cross separators when matched against a
/// bare file name but filters with `/` are matched against the full
/// relative path with literal separators.
const FILTER_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// One filesystem node observed during a walk. Immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Absolute path of the node.
    pub path: PathBuf,
    /// The node's parent directory.
    pub parent: PathBuf,
    pub is_dir: bool,
    /// False iff some ignore pattern excludes this node.
    pub survives: bool,
}

/// Evaluates ignore patterns against a directory tree.
///
/// The walk result is cached in memory for the lifetime of the matcher;
/// callers needing up-to-date state after external mutation construct a
/// new `PathMatcher`. There is no invalidation API.
///
/// Traversal stops descending into a directory once that directory itself
/// fails to survive — an ignored directory is never opened. A surviving
/// directory is still walked even when some of its children are excluded.
#[derive(Debug)]
pub struct PathMatcher {
    root: PathBuf,
    patterns: PatternSet,
    entries: OnceLock<Vec<Entry>>,
}

impl PathMatcher {
    pub fn new(root: impl Into<PathBuf>, patterns: PatternSet) -> Self {
        Self {
            root: root.into(),
            patterns,
            entries: OnceLock::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// The ordered entry list for the root, walked once and cached.
    pub fn entries(&self) -> Result<&[Entry], WalkError> {
        if let Some(cached) = self.entries.get() {
            return Ok(cached);
        }
        let walked = self.walk()?;
        Ok(self.entries.get_or_init(|| walked))
    }

    /// True iff no ignore pattern excludes `path`. A path beneath an
    /// ignored directory is excluded too, matching what the walk would
    /// surface. For paths outside the root this is vacuously true (nothing
    /// to match against).
    pub fn survives(&self, path: &Path) -> bool {
        let rel = match path.strip_prefix(&self.root) {
            Ok(rel) => rel,
            Err(_) => return true,
        };
        let mut ancestors = rel
            .ancestors()
            .skip(1)
            .filter(|a| !a.as_os_str().is_empty());
        if ancestors.any(|a| self.patterns.excludes(a, true)) {
            return false;
        }
        !self.patterns.excludes(rel, path.is_dir())
    }

    /// All surviving files (not directories) from the cached walk.
    pub fn surviving_files(&self) -> Result<Vec<PathBuf>, WalkError> {
        Ok(self
            .entries()?
            .iter()
            .filter(|e| e.survives && !e.is_dir)
            .map(|e| e.path.clone())
            .collect())
    }

    /// Surviving files that also match an analyzer's file filter.
    ///
    /// A filter containing `/` is matched against the root-relative path;
    /// anything else (`*.py`, `Dockerfile*`) is matched against the bare
    /// file name.
    pub fn files_matching(&self, filter: &Pattern) -> Result<Vec<PathBuf>, WalkError> {
        let against_rel_path = filter.as_str().contains('/');
        Ok(self
            .entries()?
            .iter()
            .filter(|e| e.survives && !e.is_dir)
            .filter(|e| {
                if against_rel_path {
                    match e.path.strip_prefix(&self.root) {
                        Ok(rel) => filter.matches_path_with(rel, FILTER_OPTIONS),
                        Err(_) => false,
                    }
                } else {
                    e.path
                        .file_name()
                        .map(|n| filter.matches(&n.to_string_lossy()))
                        .unwrap_or(false)
                }
            })
            .map(|e| e.path.clone())
            .collect())
    }

    fn walk(&self) -> Result<Vec<Entry>, WalkError> {
        let mut entries = Vec::new();
        let mut it = walkdir::WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter();

        while let Some(item) = it.next() {
            let dent = match item {
                Ok(d) => d,
                Err(e) if e.depth() == 0 => {
                    // The root itself is unreadable: nothing to walk.
                    return Err(WalkError::WalkFailed {
                        path: self.root.display().to_string(),
                        message: e.to_string(),
                    });
                }
                Err(e) => {
                    // Unreadable child: skip it, keep walking.
                    tracing::warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            let is_dir = dent.file_type().is_dir();
            let path = dent.path().to_path_buf();
            let rel = path.strip_prefix(&self.root).unwrap_or(&path);
            let survives = !self.patterns.excludes(rel, is_dir);

            if is_dir && !survives {
                // Ignored directory: record it, never open it.
                it.skip_current_dir();
            }

            let parent = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.root.clone());

            entries.push(Entry {
                path,
                parent,
                is_dir,
                survives,
            });
        }

        tracing::debug!(
            root = %self.root.display(),
            total = entries.len(),
            surviving = entries.iter().filter(|e| e.survives).count(),
            "walk complete"
        );

        Ok(entries)
    }
}

//! Ignore pattern loading and normalization.

use std::path::Path;

use glob::{MatchOptions, Pattern};
use lintmux_core::config::DEFAULT_IGNORE_PATTERNS;
use lintmux_core::errors::WalkError;
use lintmux_core::types::collections::FxHashSet;

/// `*` stays within one path component; `**` crosses any depth.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// One normalized ignore pattern.
#[derive(Debug, Clone)]
struct CompiledPattern {
    raw: String,
    glob: Pattern,
    /// Trailing `/` in the source pattern restricts matching to directories.
    dir_only: bool,
}

/// An ordered, de-duplicated set of ignore patterns, normalized once at
/// load time. Immutable for the lifetime of a matcher.
///
/// Normalization, applied to each pattern:
/// - a trailing `/` marks the pattern directory-only and is stripped;
/// - a pattern with no `/` matches at any depth (`**/` is prepended);
/// - any other pattern not starting with `**` is anchored at the scan root.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<CompiledPattern>,
}

impl PatternSet {
    /// An empty, permissive set: nothing is excluded.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The bundled default patterns, used when no ignore file exists.
    pub fn defaults() -> Self {
        // Bundled patterns are compile-time constants and always valid.
        Self::from_lines(DEFAULT_IGNORE_PATTERNS.iter().copied())
            .unwrap_or_default()
    }

    /// Build a set from raw pattern lines. Comments (`#`) and blank lines
    /// are stripped; duplicates keep their first position.
    pub fn from_lines<'a, I>(lines: I) -> Result<Self, WalkError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut patterns = Vec::new();
        for line in lines {
            let raw = line.trim();
            if raw.is_empty() || raw.starts_with('#') {
                continue;
            }
            if !seen.insert(raw.to_string()) {
                continue;
            }
            patterns.push(Self::compile(raw)?);
        }
        Ok(Self { patterns })
    }

    /// Load patterns from a newline-delimited ignore file.
    pub fn from_file(path: &Path) -> Result<Self, WalkError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            WalkError::IgnoreFileUnreadable {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })?;
        Self::from_lines(text.lines())
    }

    /// Load the ignore file under `path` if it exists, else the defaults.
    pub fn load_or_defaults(path: &Path) -> Result<Self, WalkError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "no ignore file, using bundled defaults");
            Ok(Self::defaults())
        }
    }

    fn compile(raw: &str) -> Result<CompiledPattern, WalkError> {
        let dir_only = raw.ends_with('/');
        let body = raw.trim_end_matches('/');

        let source = if !body.contains('/') {
            // No separator: match at any depth.
            format!("**/{body}")
        } else if body.starts_with("**") {
            body.to_string()
        } else {
            // Anchor at the scan root. Entries are matched relative to it,
            // so anchoring just strips any leading slash.
            body.trim_start_matches('/').to_string()
        };

        let glob = Pattern::new(&source).map_err(|e| WalkError::InvalidPattern {
            pattern: raw.to_string(),
            message: e.to_string(),
        })?;

        Ok(CompiledPattern {
            raw: raw.to_string(),
            glob,
            dir_only,
        })
    }

    /// True iff any pattern excludes the entry at `rel` (relative to the
    /// scan root). Order is irrelevant: any match excludes.
    pub fn excludes(&self, rel: &Path, is_dir: bool) -> bool {
        self.patterns.iter().any(|p| {
            if p.dir_only && !is_dir {
                return false;
            }
            p.glob.matches_path_with(rel, MATCH_OPTIONS)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// The raw source patterns, in load order.
    pub fn raw_patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.raw.as_str())
    }
}

//! The baseline archive: accepted fingerprints per analyzer.
//!
//! Persisted as a single YAML document keyed by analyzer id; each analyzer
//! maps to a `violations` object keyed by fingerprint. Read-only during a
//! check; an archive operation rewrites the document wholesale.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use lintmux_core::errors::BaselineError;
use lintmux_core::types::{Violation, ViolationRecord};

use super::fingerprint::fingerprint;

/// Accepted findings for one analyzer, keyed by fingerprint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolBaseline {
    #[serde(default)]
    pub violations: BTreeMap<String, ViolationRecord>,
}

/// Accepted-findings archive across all analyzers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Baseline {
    tools: BTreeMap<String, ToolBaseline>,
}

impl Baseline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the baseline at `path`. An absent file is an empty baseline,
    /// not an error; an unparsable file is.
    pub fn load(path: &Path) -> Result<Self, BaselineError> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let text = std::fs::read_to_string(path).map_err(|e| BaselineError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml(&text).map_err(|message| BaselineError::ParseError {
            path: path.display().to_string(),
            message,
        })
    }

    /// Parse a baseline document.
    pub fn from_yaml(text: &str) -> Result<Self, String> {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }
        serde_yaml::from_str(text).map_err(|e| e.to_string())
    }

    /// Serialize the whole archive.
    pub fn to_yaml(&self) -> Result<String, String> {
        serde_yaml::to_string(self).map_err(|e| e.to_string())
    }

    /// Replace the document at `path` wholesale.
    pub fn save(&self, path: &Path) -> Result<(), BaselineError> {
        let text = self.to_yaml().map_err(|message| BaselineError::WriteError {
            path: path.display().to_string(),
            message,
        })?;
        std::fs::write(path, text).map_err(|e| BaselineError::WriteError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Build a baseline from a run's violations: everything seen becomes
    /// accepted. Used by the archive command path.
    pub fn from_violations<'a, I>(violations: I) -> Self
    where
        I: IntoIterator<Item = &'a Violation>,
    {
        let mut baseline = Self::new();
        for v in violations {
            baseline.insert(v);
        }
        baseline
    }

    /// Accept one violation into the archive.
    pub fn insert(&mut self, violation: &Violation) {
        self.tools
            .entry(violation.tool_id.clone())
            .or_default()
            .violations
            .insert(fingerprint(violation), violation.record());
    }

    /// True iff `fp` is accepted for `tool_id`.
    pub fn contains(&self, tool_id: &str, fp: &str) -> bool {
        self.tools
            .get(tool_id)
            .is_some_and(|t| t.violations.contains_key(fp))
    }

    /// Mark each violation `filtered` iff its fingerprint is accepted for
    /// `tool_id`. Violations are never removed from the list — callers
    /// decide whether to display filtered ones. Returns the marked count.
    pub fn mark(&self, tool_id: &str, violations: &mut [Violation]) -> usize {
        let Some(tool) = self.tools.get(tool_id) else {
            return 0;
        };
        let mut marked = 0;
        for v in violations.iter_mut() {
            if tool.violations.contains_key(&fingerprint(v)) {
                v.filtered = true;
                marked += 1;
            }
        }
        marked
    }

    /// Accepted fingerprints for `tool_id`, sorted.
    pub fn fingerprints(&self, tool_id: &str) -> Vec<&str> {
        self.tools
            .get(tool_id)
            .map(|t| t.violations.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Analyzer ids present in the archive, sorted.
    pub fn tool_ids(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// Total accepted findings across all analyzers.
    pub fn len(&self) -> usize {
        self.tools.values().map(|t| t.violations.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

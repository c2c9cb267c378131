//! Findings produced by analyzers.

use serde::{Deserialize, Serialize};

/// Severity of a finding, as reported by the analyzer's adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// One finding from one analyzer.
///
/// All fields are set once at parse time except `filtered`, which is
/// flipped by baseline comparison. Filtered violations stay in the result
/// list so callers can still count archived vs. new findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Id of the analyzer that produced this finding.
    pub tool_id: String,
    /// Analyzer-specific check/rule id.
    pub check_id: String,
    /// Path of the offending file, relative to the project root.
    pub path: String,
    pub line: u32,
    pub column: u32,
    pub message: String,
    pub severity: Severity,
    /// The source text the finding points at, as reported by the analyzer.
    pub syntactic_context: String,
    /// Optional documentation link for the check.
    pub link: Option<String>,
    /// True once baseline comparison has recognized this as an accepted
    /// finding. Never set at parse time.
    pub filtered: bool,
}

impl Violation {
    /// The persisted projection of this violation, as stored in the
    /// baseline document. Drops the mutable `filtered` flag.
    pub fn record(&self) -> ViolationRecord {
        ViolationRecord {
            tool_id: self.tool_id.clone(),
            check_id: self.check_id.clone(),
            path: self.path.clone(),
            line: self.line,
            column: self.column,
            message: self.message.clone(),
            severity: self.severity,
            syntactic_context: self.syntactic_context.clone(),
            link: self.link.clone(),
        }
    }
}

/// The serializable subset of a [`Violation`], keyed by fingerprint in the
/// baseline document. Line and column are recorded for human readers of
/// the archive but play no part in identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationRecord {
    pub tool_id: String,
    pub check_id: String,
    pub path: String,
    pub line: u32,
    pub column: u32,
    pub message: String,
    pub severity: Severity,
    pub syntactic_context: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation() -> Violation {
        Violation {
            tool_id: "toolx".into(),
            check_id: "no-eval".into(),
            path: "src/app.py".into(),
            line: 12,
            column: 4,
            message: "eval is dangerous".into(),
            severity: Severity::Error,
            syntactic_context: "eval(user_input)".into(),
            link: None,
            filtered: false,
        }
    }

    #[test]
    fn record_drops_filtered_flag_only() {
        let mut v = violation();
        v.filtered = true;
        let r = v.record();
        assert_eq!(r.tool_id, v.tool_id);
        assert_eq!(r.line, v.line);
        assert_eq!(r.severity, Severity::Error);
    }

    #[test]
    fn severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
    }
}

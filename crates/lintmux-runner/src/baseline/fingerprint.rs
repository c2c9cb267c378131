//! Stable finding fingerprints via xxh3.
//!
//! Identity is derived from the semantically meaningful fields of a
//! violation: tool id, check id, path, and the whitespace-normalized
//! message and syntactic context. Line and column are deliberately
//! excluded so a finding that merely shifted lines — unrelated edits
//! elsewhere in the file — is still recognized as the same finding.

use lintmux_core::types::Violation;
use xxhash_rust::xxh3::Xxh3;

/// Compute the stable fingerprint of a violation, as a 16-char hex string.
pub fn fingerprint(violation: &Violation) -> String {
    let mut hasher = Xxh3::new();
    for field in [
        violation.tool_id.as_str(),
        violation.check_id.as_str(),
        violation.path.as_str(),
    ] {
        hasher.update(field.as_bytes());
        hasher.update(b"\0");
    }
    hasher.update(normalize(&violation.message).as_bytes());
    hasher.update(b"\0");
    hasher.update(normalize(&violation.syntactic_context).as_bytes());

    format!("{:016x}", hasher.digest())
}

/// Collapse internal whitespace runs to single spaces and trim, so
/// incidental reindentation does not change identity.
fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintmux_core::types::{Severity, Violation};

    fn violation(line: u32, column: u32) -> Violation {
        Violation {
            tool_id: "toolx".into(),
            check_id: "no-eval".into(),
            path: "src/app.py".into(),
            line,
            column,
            message: "eval is dangerous".into(),
            severity: Severity::Error,
            syntactic_context: "eval(user_input)".into(),
            link: None,
            filtered: false,
        }
    }

    #[test]
    fn stable_under_line_and_column_drift() {
        assert_eq!(fingerprint(&violation(10, 1)), fingerprint(&violation(42, 7)));
    }

    #[test]
    fn sensitive_to_check_id() {
        let a = violation(1, 1);
        let mut b = violation(1, 1);
        b.check_id = "no-exec".into();
        assert_ne!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn sensitive_to_path() {
        let a = violation(1, 1);
        let mut b = violation(1, 1);
        b.path = "src/other.py".into();
        assert_ne!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn whitespace_in_context_is_normalized() {
        let a = violation(1, 1);
        let mut b = violation(1, 1);
        b.syntactic_context = "  eval(user_input)\t".into();
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn fingerprint_is_hex_16() {
        let fp = fingerprint(&violation(1, 1));
        assert_eq!(fp.len(), 16);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }
}

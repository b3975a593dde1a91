//! Nesting depth analysis.
//!
//! Indentation-significant languages derive depth from leading whitespace
//! (unit inferred from the first indented line); brace-delimited languages
//! track the running `{`/`(` balance. The same scan fills
//! `ParseResult::max_nesting_depth` and this module's flagged report.

use serde::{Deserialize, Serialize};

use crate::metrics::Severity;
use crate::profile::LanguageProfile;

/// Raw result of a depth scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthScan {
    pub max_depth: usize,
    /// 1-based line where the maximum was first reached; 0 when flat.
    pub line: usize,
}

/// Flagged nesting report for a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestingReport {
    pub max_depth: usize,
    pub line: usize,
    pub severity: Option<Severity>,
}

/// Scan a file for its maximum nesting depth.
pub fn scan_depth(text: &str, profile: &LanguageProfile) -> DepthScan {
    if profile.indent_based {
        indent_depth(text)
    } else {
        brace_depth(text)
    }
}

/// Build the flagged report: depth 4 is worth a look, 6 is unreadable.
pub fn analyze(text: &str, profile: &LanguageProfile) -> NestingReport {
    let scan = scan_depth(text, profile);
    NestingReport {
        max_depth: scan.max_depth,
        line: scan.line,
        severity: severity_for_depth(scan.max_depth),
    }
}

fn severity_for_depth(depth: usize) -> Option<Severity> {
    match depth {
        0..=3 => None,
        4 => Some(Severity::Medium),
        5 => Some(Severity::High),
        _ => Some(Severity::Critical),
    }
}

fn indent_depth(text: &str) -> DepthScan {
    let unit = infer_indent_unit(text);
    let mut scan = DepthScan::default();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let depth = leading_width(line) / unit;
        if depth > scan.max_depth {
            scan.max_depth = depth;
            scan.line = idx + 1;
        }
    }
    scan
}

/// Width of the first indented non-blank line, defaulting to 4. A tab
/// counts as one unit's worth of width.
fn infer_indent_unit(text: &str) -> usize {
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let width = leading_width(line);
        if width > 0 {
            return width;
        }
    }
    4
}

fn leading_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

fn brace_depth(text: &str) -> DepthScan {
    let mut scan = DepthScan::default();
    let mut balance = 0i64;
    for (idx, line) in text.lines().enumerate() {
        for ch in line.chars() {
            match ch {
                '{' | '(' => {
                    balance += 1;
                    if balance as usize > scan.max_depth {
                        scan.max_depth = balance as usize;
                        scan.line = idx + 1;
                    }
                }
                '}' | ')' => balance = (balance - 1).max(0),
                _ => {}
            }
        }
    }
    scan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::profile_for;

    #[test]
    fn test_indent_depth() {
        let src = "def f():\n    if a:\n        if b:\n            if c:\n                x = 1\n";
        let scan = scan_depth(src, profile_for("python"));
        assert_eq!(scan.max_depth, 4);
        assert_eq!(scan.line, 5);
    }

    #[test]
    fn test_brace_depth() {
        let src = "fn f() {\n    if a {\n        if b {\n            x();\n        }\n    }\n}\n";
        let scan = scan_depth(src, profile_for("rust"));
        // The x() call parens reach one past the three braces.
        assert!(scan.max_depth >= 3);
    }

    #[test]
    fn test_unbalanced_braces_floor_at_zero() {
        let scan = scan_depth("}}}}}\n{", profile_for("rust"));
        assert_eq!(scan.max_depth, 1);
    }

    #[test]
    fn test_severity_bands() {
        assert_eq!(severity_for_depth(3), None);
        assert_eq!(severity_for_depth(4), Some(Severity::Medium));
        assert_eq!(severity_for_depth(5), Some(Severity::High));
        assert_eq!(severity_for_depth(6), Some(Severity::Critical));
        assert_eq!(severity_for_depth(10), Some(Severity::Critical));
    }

    #[test]
    fn test_flat_file() {
        let scan = scan_depth("x = 1\ny = 2\n", profile_for("python"));
        assert_eq!(scan.max_depth, 0);
        assert_eq!(scan.line, 0);
    }

    #[test]
    fn test_two_space_indent_unit() {
        let src = "def f():\n  if a:\n    if b:\n      x = 1\n";
        let scan = scan_depth(src, profile_for("python"));
        assert_eq!(scan.max_depth, 3);
    }
}

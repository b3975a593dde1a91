//! Pure-function metrics computed from a [`ParseResult`] and raw text.
//!
//! Every function here is side-effect free: the same inputs always yield
//! the same report, so callers can recompute at will and parallelize
//! without coordination. `compute_metrics` assembles the full
//! [`MetricsReport`] consumed by downstream detectors.

pub mod cognitive;
pub mod diversity;
pub mod duplication;
pub mod halstead;
pub mod nesting;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::profile::profile_for;
use crate::result::ParseResult;

pub use cognitive::{CognitiveReport, Hotspot};
pub use diversity::DiversityReport;
pub use duplication::DuplicateMatch;
pub use halstead::{HalsteadAnomaly, HalsteadReport, MaintainabilityReport};
pub use nesting::NestingReport;

/// How strongly a finding should weigh on downstream scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-function cyclomatic complexity over the conventional bands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexityFlag {
    pub name: String,
    pub line: usize,
    pub complexity: u32,
    pub severity: Severity,
}

/// File-level cyclomatic summary with flagged functions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexityReport {
    pub file_complexity: u32,
    pub function_count: usize,
    pub average: f64,
    pub max: u32,
    pub anomalies: Vec<ComplexityFlag>,
}

/// The complete derived-metrics view of one file. Recomputed on demand;
/// it has no lifecycle of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    pub complexity: ComplexityReport,
    pub cognitive: CognitiveReport,
    pub halstead: HalsteadReport,
    pub maintainability: MaintainabilityReport,
    /// None when the file has too few identifiers to judge.
    pub diversity: Option<DiversityReport>,
    pub nesting: NestingReport,
    pub duplication: Vec<DuplicateMatch>,
}

const CYCLOMATIC_HIGH: u32 = 10;
const CYCLOMATIC_CRITICAL: u32 = 20;

/// Compute the full metrics report for a parsed file.
pub fn compute_metrics(result: &ParseResult, text: &str) -> MetricsReport {
    let profile = profile_for(&result.language);

    let halstead = halstead::analyze(text, profile);
    let loc = result.total_lines.saturating_sub(result.blank_lines);
    let comment_fraction = if loc > 0 {
        result.comment_lines as f64 / loc as f64
    } else {
        0.0
    };
    let maintainability = halstead::maintainability_index(
        halstead.volume,
        result.complexity,
        loc,
        comment_fraction,
    );

    MetricsReport {
        complexity: complexity_report(result),
        cognitive: cognitive::analyze(result, text),
        halstead,
        maintainability,
        diversity: diversity::analyze(text, profile),
        nesting: nesting::analyze(text, profile),
        duplication: duplication::analyze(text, profile),
    }
}

fn complexity_report(result: &ParseResult) -> ComplexityReport {
    let functions = result.all_functions();
    let function_count = functions.len();
    let mut max = 0u32;
    let mut sum = 0u64;
    let mut anomalies = Vec::new();

    for func in &functions {
        max = max.max(func.complexity);
        sum += u64::from(func.complexity);
        let severity = if func.complexity > CYCLOMATIC_CRITICAL {
            Some(Severity::Critical)
        } else if func.complexity > CYCLOMATIC_HIGH {
            Some(Severity::High)
        } else {
            None
        };
        if let Some(severity) = severity {
            anomalies.push(ComplexityFlag {
                name: func.name.clone(),
                line: func.line_start,
                complexity: func.complexity,
                severity,
            });
        }
    }

    anomalies.sort_by(|a, b| b.complexity.cmp(&a.complexity).then(a.line.cmp(&b.line)));

    ComplexityReport {
        file_complexity: result.complexity,
        function_count,
        average: if function_count > 0 {
            sum as f64 / function_count as f64
        } else {
            0.0
        },
        max,
        anomalies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::parse_source;

    #[test]
    fn test_compute_metrics_smoke() {
        let src = "def f(x):\n    if x:\n        return 1\n    return 0\n";
        let result = parse_source(src, "python");
        let report = compute_metrics(&result, src);
        assert_eq!(report.complexity.file_complexity, 2);
        assert_eq!(report.complexity.function_count, 1);
        assert!((0.0..=100.0).contains(&report.maintainability.index));
        assert!(report.duplication.is_empty());
    }

    #[test]
    fn test_complexity_anomaly_bands() {
        // 12 sequential branches push one function past the HIGH band.
        let mut src = String::from("def busy(x):\n");
        for i in 0..12 {
            src.push_str(&format!("    if x > {}:\n        x -= 1\n", i));
        }
        src.push_str("    return x\n");
        let result = parse_source(&src, "python");
        let report = compute_metrics(&result, &src);
        assert_eq!(report.complexity.anomalies.len(), 1);
        let flag = &report.complexity.anomalies[0];
        assert_eq!(flag.name, "busy");
        assert_eq!(flag.severity, Severity::High);
        assert_eq!(report.complexity.max, flag.complexity);
    }

    #[test]
    fn test_empty_input_report_is_sane() {
        let result = parse_source("", "python");
        let report = compute_metrics(&result, "");
        assert_eq!(report.complexity.file_complexity, 1);
        assert_eq!(report.complexity.function_count, 0);
        assert!(report.diversity.is_none());
        assert!(report.duplication.is_empty());
        assert!((0.0..=100.0).contains(&report.maintainability.index));
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Medium.to_string(), "medium");
        assert_eq!(Severity::Critical.as_str(), "critical");
    }

    #[test]
    fn test_reports_serialize() {
        let src = "def f():\n    return 1\n";
        let result = parse_source(src, "python");
        let report = compute_metrics(&result, src);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("maintainability"));
        assert!(json.contains("file_complexity"));
    }
}

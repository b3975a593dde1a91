//! Vocabulary-diversity statistics over identifier tokens.
//!
//! A low type-token ratio means the same few names are repeated over and
//! over, a signal of copy-paste or generated code. Identifiers shorter
//! than three characters carry no signal and language keywords are
//! excluded so the ratio reflects the author's own vocabulary.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::extract::lines::{classify_lines, LineKind};
use crate::metrics::Severity;
use crate::profile::LanguageProfile;

/// Minimum identifier sample before the ratios mean anything.
const MIN_TOKENS: usize = 20;

const TTR_HIGH: f64 = 0.5;
const TTR_CRITICAL: f64 = 0.3;

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"[A-Za-z_][A-Za-z0-9_]{2,}").unwrap();
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiversityReport {
    pub total_tokens: usize,
    pub unique_tokens: usize,
    /// Type-token ratio: unique / total.
    pub ttr: f64,
    /// Guiraud's index: unique / sqrt(total), less length-sensitive.
    pub guiraud: f64,
    pub severity: Option<Severity>,
    /// The three most-repeated tokens with their counts, as evidence.
    pub top_tokens: Vec<(String, usize)>,
}

/// Collect identifier tokens and compute the ratios. Returns None below
/// the minimum sample size.
pub fn analyze(text: &str, profile: &LanguageProfile) -> Option<DiversityReport> {
    let kinds = classify_lines(text, profile);
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut total = 0usize;

    for (idx, line) in text.lines().enumerate() {
        if kinds.get(idx) != Some(&LineKind::Code) {
            continue;
        }
        for m in IDENTIFIER.find_iter(line) {
            let token = m.as_str();
            if profile.keywords.contains(&token) {
                continue;
            }
            *counts.entry(token.to_ascii_lowercase()).or_insert(0) += 1;
            total += 1;
        }
    }

    if total < MIN_TOKENS {
        return None;
    }

    let unique = counts.len();
    let ttr = unique as f64 / total as f64;
    let guiraud = unique as f64 / (total as f64).sqrt();

    let severity = if ttr < TTR_CRITICAL {
        Some(Severity::Critical)
    } else if ttr < TTR_HIGH {
        Some(Severity::High)
    } else {
        None
    };

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(3);

    Some(DiversityReport {
        total_tokens: total,
        unique_tokens: unique,
        ttr,
        guiraud,
        severity,
        top_tokens: ranked,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::profile_for;

    #[test]
    fn test_below_minimum_returns_none() {
        assert!(analyze("x = 1\n", profile_for("python")).is_none());
        assert!(analyze("", profile_for("python")).is_none());
    }

    #[test]
    fn test_varied_vocabulary_not_flagged() {
        let mut src = String::new();
        for i in 0..30 {
            src.push_str(&format!("alpha_{i} = beta_{i}\n"));
        }
        let report = analyze(&src, profile_for("python")).unwrap();
        assert!(report.ttr > 0.9);
        assert!(report.severity.is_none());
    }

    #[test]
    fn test_repetitive_vocabulary_flagged_critical() {
        let src = "value = value + value\n".repeat(20);
        let report = analyze(&src, profile_for("python")).unwrap();
        assert!(report.ttr < TTR_CRITICAL);
        assert_eq!(report.severity, Some(Severity::Critical));
        assert_eq!(report.top_tokens[0].0, "value");
        assert_eq!(report.top_tokens[0].1, 60);
    }

    #[test]
    fn test_keywords_and_short_names_excluded() {
        let src = "for it in all_items:\n    if it:\n        use_item(it)\n"
            .repeat(10);
        let report = analyze(&src, profile_for("python")).unwrap();
        assert!(report
            .top_tokens
            .iter()
            .all(|(t, _)| t != "for" && t != "if" && t != "it"));
    }

    #[test]
    fn test_comment_lines_excluded() {
        let code = "first_name = last_name\n".repeat(15);
        let with_comments =
            format!("{}# first_name appears here too\n", code);
        let a = analyze(&code, profile_for("python")).unwrap();
        let b = analyze(&with_comments, profile_for("python")).unwrap();
        assert_eq!(a.total_tokens, b.total_tokens);
    }

    #[test]
    fn test_case_folding() {
        let src = "TotalCount = totalcount + TOTALCOUNT\n".repeat(10);
        let report = analyze(&src, profile_for("python")).unwrap();
        assert_eq!(report.unique_tokens, 1);
    }
}

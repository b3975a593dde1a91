//! Halstead complexity figures and the maintainability index.
//!
//! Tokens from code lines split into operators (reserved words and
//! punctuation) and operands (identifiers, numbers, string literals).
//! Distinct/total counts of each feed the classic formulas.

use serde::{Deserialize, Serialize};

use crate::extract::lines::{classify_lines, LineKind};
use crate::metrics::Severity;
use crate::profile::LanguageProfile;

/// Raw Halstead figures with threshold flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HalsteadReport {
    /// Distinct operators (n1).
    pub distinct_operators: usize,
    /// Distinct operands (n2).
    pub distinct_operands: usize,
    /// Total operator occurrences (N1).
    pub total_operators: usize,
    /// Total operand occurrences (N2).
    pub total_operands: usize,
    pub vocabulary: usize,
    pub length: usize,
    pub volume: f64,
    pub difficulty: f64,
    pub effort: f64,
    pub bugs_estimate: f64,
    pub anomalies: Vec<HalsteadAnomaly>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HalsteadAnomaly {
    pub metric: String,
    pub value: f64,
    pub threshold: f64,
    pub severity: Severity,
}

/// Composite maintainability score in [0, 100].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintainabilityReport {
    pub index: f64,
    pub rating: String,
}

const VOLUME_THRESHOLD: f64 = 1000.0;
const DIFFICULTY_THRESHOLD: f64 = 30.0;
const BUGS_THRESHOLD: f64 = 1.0;

/// Multi-character operators matched before single characters.
const MULTI_CHAR_OPERATORS: &[&str] = &[
    "<<=", ">>=", "===", "!==", "...", "**=", "//=", "&&", "||", "??", "==",
    "!=", "<=", ">=", "->", "=>", "::", "+=", "-=", "*=", "/=", "%=", "&=",
    "|=", "^=", "**", "//", "<<", ">>", "?.", "?:", "..",
];

const SINGLE_CHAR_OPERATORS: &[char] = &[
    '+', '-', '*', '/', '%', '=', '<', '>', '!', '&', '|', '^', '~', '?',
    ':', '.', ',', ';', '(', ')', '[', ']', '{', '}', '@', '#',
];

/// Compute the Halstead figures over a file's code lines.
pub fn analyze(text: &str, profile: &LanguageProfile) -> HalsteadReport {
    let kinds = classify_lines(text, profile);
    let mut operators: std::collections::HashMap<String, usize> =
        std::collections::HashMap::new();
    let mut operands: std::collections::HashMap<String, usize> =
        std::collections::HashMap::new();

    for (idx, line) in text.lines().enumerate() {
        if kinds.get(idx) != Some(&LineKind::Code) {
            continue;
        }
        tokenize_line(line, profile, &mut operators, &mut operands);
    }

    let n1 = operators.len();
    let n2 = operands.len();
    let total_n1: usize = operators.values().sum();
    let total_n2: usize = operands.values().sum();

    let vocabulary = n1 + n2;
    let length = total_n1 + total_n2;
    let volume = if vocabulary > 1 {
        length as f64 * (vocabulary as f64).log2()
    } else {
        0.0
    };
    let difficulty = if n2 > 0 {
        (n1 as f64 / 2.0) * (total_n2 as f64 / n2 as f64)
    } else {
        0.0
    };
    let effort = difficulty * volume;
    let bugs_estimate = volume / 3000.0;

    let mut anomalies = Vec::new();
    for (metric, value, threshold) in [
        ("volume", volume, VOLUME_THRESHOLD),
        ("difficulty", difficulty, DIFFICULTY_THRESHOLD),
        ("bugs_estimate", bugs_estimate, BUGS_THRESHOLD),
    ] {
        if value > threshold {
            anomalies.push(HalsteadAnomaly {
                metric: metric.to_string(),
                value,
                threshold,
                severity: Severity::High,
            });
        }
    }

    HalsteadReport {
        distinct_operators: n1,
        distinct_operands: n2,
        total_operators: total_n1,
        total_operands: total_n2,
        vocabulary,
        length,
        volume,
        difficulty,
        effort,
        bugs_estimate,
        anomalies,
    }
}

/// `MI = 171 - 5.2 ln(V) - 0.23 CC - 16.2 ln(LOC) + 50 sin(sqrt(2.4 CM))`
/// clamped to [0, 100]; any numeric misbehavior lands on the neutral 50.
pub fn maintainability_index(
    volume: f64,
    cyclomatic: u32,
    loc: usize,
    comment_fraction: f64,
) -> MaintainabilityReport {
    let volume = volume.max(1.0);
    let cc = f64::from(cyclomatic.max(1));
    let loc = loc.max(1) as f64;
    let cm = comment_fraction.clamp(0.0, 1.0);

    let raw = 171.0 - 5.2 * volume.ln() - 0.23 * cc - 16.2 * loc.ln()
        + 50.0 * (2.4 * cm).sqrt().sin();

    let index = if raw.is_finite() {
        raw.clamp(0.0, 100.0)
    } else {
        50.0
    };

    let rating = if index >= 80.0 {
        "high"
    } else if index >= 60.0 {
        "moderate"
    } else {
        "low"
    };

    MaintainabilityReport {
        index,
        rating: rating.to_string(),
    }
}

/// Split one line into operator/operand occurrences. String literals
/// collapse to a single operand each; their delimiters count as
/// operators.
fn tokenize_line(
    line: &str,
    profile: &LanguageProfile,
    operators: &mut std::collections::HashMap<String, usize>,
    operands: &mut std::collections::HashMap<String, usize>,
) {
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];

        if ch.is_whitespace() {
            i += 1;
            continue;
        }

        if ch == '"' || ch == '\'' {
            *operators.entry(ch.to_string()).or_insert(0) += 1;
            let mut j = i + 1;
            let mut literal = String::new();
            while j < chars.len() && chars[j] != ch {
                if chars[j] == '\\' {
                    j += 1;
                }
                if j < chars.len() {
                    literal.push(chars[j]);
                }
                j += 1;
            }
            if !literal.is_empty() {
                *operands.entry(literal).or_insert(0) += 1;
            }
            i = (j + 1).min(chars.len());
            continue;
        }

        if ch.is_ascii_alphabetic() || ch == '_' {
            let mut j = i;
            while j < chars.len()
                && (chars[j].is_ascii_alphanumeric() || chars[j] == '_')
            {
                j += 1;
            }
            let word: String = chars[i..j].iter().collect();
            if profile.keywords.contains(&word.as_str()) {
                *operators.entry(word).or_insert(0) += 1;
            } else {
                *operands.entry(word).or_insert(0) += 1;
            }
            i = j;
            continue;
        }

        if ch.is_ascii_digit() {
            let mut j = i;
            while j < chars.len()
                && (chars[j].is_ascii_alphanumeric()
                    || chars[j] == '.'
                    || chars[j] == '_')
            {
                j += 1;
            }
            let number: String = chars[i..j].iter().collect();
            *operands.entry(number).or_insert(0) += 1;
            i = j;
            continue;
        }

        let lookahead: String =
            chars[i..(i + 3).min(chars.len())].iter().collect();
        if let Some(op) = MULTI_CHAR_OPERATORS
            .iter()
            .find(|op| lookahead.starts_with(*op))
        {
            *operators.entry((*op).to_string()).or_insert(0) += 1;
            i += op.chars().count();
            continue;
        }

        if SINGLE_CHAR_OPERATORS.contains(&ch) {
            *operators.entry(ch.to_string()).or_insert(0) += 1;
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::profile_for;

    #[test]
    fn test_empty_input() {
        let report = analyze("", profile_for("python"));
        assert_eq!(report.vocabulary, 0);
        assert_eq!(report.volume, 0.0);
        assert_eq!(report.difficulty, 0.0);
        assert!(report.anomalies.is_empty());
    }

    #[test]
    fn test_simple_counts() {
        let report = analyze("x = y + z\n", profile_for("python"));
        // operands: x, y, z; operators: =, +
        assert_eq!(report.distinct_operands, 3);
        assert_eq!(report.distinct_operators, 2);
        assert_eq!(report.length, 5);
        assert!(report.volume > 0.0);
    }

    #[test]
    fn test_keywords_are_operators() {
        let report = analyze("if x:\n    return y\n", profile_for("python"));
        // if, :, return are operators; x, y operands.
        assert_eq!(report.distinct_operands, 2);
        assert!(report.distinct_operators >= 3);
    }

    #[test]
    fn test_comment_lines_excluded() {
        let with_comment = analyze("x = 1\n# y = 2\n", profile_for("python"));
        let without = analyze("x = 1\n", profile_for("python"));
        assert_eq!(with_comment.length, without.length);
    }

    #[test]
    fn test_multi_char_operator_not_split() {
        let report = analyze("a == b\n", profile_for("rust"));
        assert!(report.distinct_operators >= 1);
        // `==` must not double-count as two `=`.
        assert_eq!(report.total_operators, 1);
    }

    #[test]
    fn test_volume_anomaly_flagged() {
        let mut src = String::new();
        for i in 0..120 {
            src.push_str(&format!("value_{} = other_{} + {}\n", i, i, i));
        }
        let report = analyze(&src, profile_for("python"));
        assert!(report.volume > VOLUME_THRESHOLD);
        assert!(report
            .anomalies
            .iter()
            .any(|a| a.metric == "volume" && a.severity == Severity::High));
    }

    #[test]
    fn test_maintainability_bounds() {
        for (volume, cc, loc, cm) in [
            (0.0, 0, 0, 0.0),
            (1.0, 1, 1, 0.0),
            (1e9, 5000, 100000, 1.0),
            (f64::NAN, 1, 10, 0.5),
        ] {
            let report = maintainability_index(volume, cc, loc, cm);
            assert!(
                (0.0..=100.0).contains(&report.index),
                "MI {} out of bounds",
                report.index
            );
        }
    }

    #[test]
    fn test_maintainability_small_clean_file_rates_high() {
        let report = maintainability_index(50.0, 2, 10, 0.2);
        assert!(report.index > 80.0);
        assert_eq!(report.rating, "high");
    }
}

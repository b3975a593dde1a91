//! Structural extraction: tier selection and the fallback chain.
//!
//! `parse_source` tries the richest available tier and degrades on
//! failure, always returning a usable [`ParseResult`]:
//!
//! 1. Grammar: tree-sitter, when a grammar is registered and loadable.
//!    A failed grammar parse falls through to the heuristic tier.
//! 2. Native: `syn`, when the source is Rust and no grammar was tried.
//! 3. Heuristic: regex tables; cannot fail.
//!
//! Nothing here panics on malformed input; all data-quality failures
//! become `parse_errors` diagnostics on a degraded result.

pub mod heuristic;
pub mod lines;
pub mod native;

#[cfg(feature = "tree-sitter")]
pub mod grammar;
#[cfg(feature = "tree-sitter")]
pub mod languages;

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;

use crate::metrics::nesting;
use crate::profile::{language_for_extension, profile_for, ParamStyle};
use crate::result::{Backend, ParseResult};

/// Typed failure causes recorded as diagnostics by the fallback chain.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("grammar parse failed: {0}")]
    GrammarParse(String),
    #[error("native parse failed: {0}")]
    NativeParse(String),
    #[error("unreadable file: {0}")]
    Io(String),
}

/// Tier toggles, mainly for callers that need deterministic fallback
/// behavior (and for the fallback tests). Both tiers default to on.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub use_grammar: bool,
    pub use_native: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            use_grammar: true,
            use_native: true,
        }
    }
}

/// Parse source text with the default tier selection.
pub fn parse_source(text: &str, language: &str) -> ParseResult {
    parse_source_with(text, language, &ParseOptions::default())
}

/// Parse source text with explicit tier toggles. Never panics for any
/// input text; see the module docs for the selection algorithm.
pub fn parse_source_with(
    text: &str,
    language: &str,
    options: &ParseOptions,
) -> ParseResult {
    let mut diagnostics: Vec<String> = Vec::new();
    let mut degraded = false;
    let mut grammar_attempted = false;

    #[cfg(feature = "tree-sitter")]
    if options.use_grammar {
        if let Some(spec) = languages::grammar_for(language) {
            grammar_attempted = true;
            match grammar::extract(text, spec) {
                Ok(result) => return finalize(result, text, true, diagnostics),
                Err(err) => {
                    diagnostics.push(
                        ExtractError::GrammarParse(format!("{:#}", err))
                            .to_string(),
                    );
                    degraded = true;
                }
            }
        }
    }

    // The native tier only stands in when no grammar was tried; a failed
    // grammar parse goes straight to the heuristic tier.
    if options.use_native && !grammar_attempted && language == "rust" {
        match native::extract(text) {
            Ok(result) => return finalize(result, text, !degraded, diagnostics),
            Err(err) => {
                diagnostics.push(
                    ExtractError::NativeParse(format!("{:#}", err)).to_string(),
                );
                degraded = true;
            }
        }
    }

    let result = heuristic::extract(text, language);
    finalize(result, text, !degraded, diagnostics)
}

/// Read a file, decode it leniently, and parse it. An unreadable file
/// yields a failed result with one diagnostic rather than an error.
pub fn parse_path(path: &Path) -> ParseResult {
    let language = path
        .extension()
        .and_then(|e| e.to_str())
        .map(language_for_extension)
        .unwrap_or(crate::profile::UNKNOWN_LANGUAGE);

    match std::fs::read(path) {
        Ok(bytes) => {
            let text = String::from_utf8_lossy(&bytes);
            parse_source(&text, language)
        }
        Err(err) => {
            let mut result = ParseResult::empty(language, Backend::Heuristic);
            result.parse_succeeded = false;
            result.parse_errors.push(
                ExtractError::Io(format!("{}: {}", path.display(), err))
                    .to_string(),
            );
            result
        }
    }
}

/// Parse many files in parallel, one file per rayon worker. Results come
/// back in input order; per-file failures are embedded in their results,
/// so a batch never aborts.
pub fn parse_paths(paths: &[PathBuf]) -> Vec<ParseResult> {
    paths.par_iter().map(|p| parse_path(p)).collect()
}

/// Fill in the backend-independent fields: shared line accounting,
/// text-derived nesting depth, fallback diagnostics, and the complexity
/// floor.
fn finalize(
    mut result: ParseResult,
    text: &str,
    succeeded: bool,
    diagnostics: Vec<String>,
) -> ParseResult {
    let profile = profile_for(&result.language);
    let counts = lines::count_lines(text, profile);
    result.total_lines = counts.total;
    result.code_lines = counts.code;
    result.comment_lines = counts.comment;
    result.blank_lines = counts.blank;

    let depth = nesting::scan_depth(text, profile);
    result.max_nesting_depth = depth.max_depth as u32;

    let mut errors = diagnostics;
    errors.append(&mut result.parse_errors);
    result.parse_errors = errors;
    result.parse_succeeded = succeeded;
    result.complexity = result.complexity.max(1);
    for func in &mut result.functions {
        func.complexity = func.complexity.max(1);
    }
    for class in &mut result.classes {
        for method in &mut class.methods {
            method.complexity = method.complexity.max(1);
        }
    }
    result
}

/// Split a parameter list on top-level commas and reduce each entry to
/// its bare name. Receivers (`self`, `cls`, `this`) are dropped.
pub(crate) fn clean_params(raw: &str, style: ParamStyle) -> Vec<String> {
    split_top_level(raw)
        .into_iter()
        .filter_map(|p| param_name(&p, style))
        .collect()
}

fn split_top_level(raw: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();
    for ch in raw.chars() {
        match ch {
            '(' | '[' | '{' | '<' => {
                depth += 1;
                current.push(ch);
            }
            ')' | ']' | '}' | '>' => {
                depth -= 1;
                current.push(ch);
            }
            ',' if depth <= 0 => {
                parts.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    if !current.trim().is_empty() {
        parts.push(current);
    }
    parts
}

fn param_name(raw: &str, style: ParamStyle) -> Option<String> {
    // Defaults and attribute noise go first.
    let raw = raw.split('=').next().unwrap_or(raw).trim();
    if raw.is_empty() {
        return None;
    }
    if matches!(raw, "self" | "&self" | "&mut self" | "mut self" | "cls" | "this") {
        return None;
    }

    let segment = match style {
        ParamStyle::NameFirst => {
            let seg = raw.split(':').next().unwrap_or(raw).trim();
            if raw.contains(':') {
                // `mut x: u32`, swift's `with name: String`
                seg.split_whitespace().last().unwrap_or(seg)
            } else {
                // go's `x int`, bare python/ruby names
                seg.split_whitespace().next().unwrap_or(seg)
            }
        }
        ParamStyle::NameLast => raw.split_whitespace().last().unwrap_or(raw),
    };

    let name: String = segment
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if name.is_empty() || ["self", "cls", "this"].contains(&name.as_str()) {
        return None;
    }
    Some(name)
}

/// Split an imported-symbol list, dropping aliases.
pub(crate) fn split_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|n| n.split(" as ").next().unwrap_or(n).trim())
        .filter(|n| !n.is_empty() && *n != "*")
        .map(|n| n.trim_matches('(').trim_matches(')').to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source_totality() {
        for text in ["", "def f(:", "}{", "\u{FFFD}", "x\ny\nz"] {
            for language in ["python", "rust", "unknown", "klingon"] {
                let result = parse_source(text, language);
                assert!(result.complexity >= 1);
                assert_eq!(
                    result.code_lines
                        + result.comment_lines
                        + result.blank_lines,
                    result.total_lines
                );
            }
        }
    }

    #[test]
    fn test_empty_string_scenario() {
        let result = parse_source("", "python");
        assert_eq!(result.total_lines, 1);
        assert!(result.functions.is_empty());
        assert_eq!(result.complexity, 1);
        assert!(result.parse_succeeded);
    }

    #[test]
    fn test_fallback_monotonicity() {
        let src = "def f(x):\n    if x:\n        return 1\n    return 0\n";
        let full = parse_source(src, "python");
        let no_grammar = parse_source_with(
            src,
            "python",
            &ParseOptions {
                use_grammar: false,
                use_native: true,
            },
        );
        #[cfg(feature = "tree-sitter")]
        assert_eq!(full.backend_used, Backend::Grammar);
        assert_eq!(no_grammar.backend_used, Backend::Heuristic);
        assert!(no_grammar.parse_succeeded);
        // Both tiers agree on the structure of this input.
        assert_eq!(full.functions.len(), no_grammar.functions.len());
        assert_eq!(full.functions[0].complexity, 2);
        assert_eq!(no_grammar.functions[0].complexity, 2);
    }

    #[test]
    fn test_rust_native_when_grammar_disabled() {
        let src = "fn f(x: bool) -> u8 {\n    if x { 1 } else { 0 }\n}\n";
        let result = parse_source_with(
            src,
            "rust",
            &ParseOptions {
                use_grammar: false,
                use_native: true,
            },
        );
        assert_eq!(result.backend_used, Backend::Native);
        assert!(result.parse_succeeded);
        assert_eq!(result.functions[0].name, "f");
    }

    #[test]
    fn test_broken_rust_degrades_to_heuristic() {
        let src = "fn broken( {{{\n";
        let result = parse_source_with(
            src,
            "rust",
            &ParseOptions {
                use_grammar: false,
                use_native: true,
            },
        );
        assert_eq!(result.backend_used, Backend::Heuristic);
        assert!(!result.parse_succeeded);
        assert!(!result.parse_errors.is_empty());
    }

    #[test]
    fn test_parse_path_unreadable_file() {
        let result = parse_path(Path::new("/nonexistent/file.py"));
        assert!(!result.parse_succeeded);
        assert_eq!(result.parse_errors.len(), 1);
        assert_eq!(result.language, "python");
    }

    #[test]
    fn test_parse_path_and_batch() {
        let dir = tempfile::TempDir::new().unwrap();
        let good = dir.path().join("a.py");
        std::fs::write(&good, "def f():\n    pass\n").unwrap();
        let missing = dir.path().join("missing.rs");

        let results = parse_paths(&[good, missing]);
        assert_eq!(results.len(), 2);
        assert!(results[0].parse_succeeded);
        assert_eq!(results[0].functions.len(), 1);
        assert!(!results[1].parse_succeeded);
    }

    #[test]
    fn test_clean_params_styles() {
        assert_eq!(
            clean_params("self, path, timeout=5", ParamStyle::NameFirst),
            vec!["path", "timeout"]
        );
        assert_eq!(
            clean_params("mut x: u32, ys: &[u8]", ParamStyle::NameFirst),
            vec!["x", "ys"]
        );
        assert_eq!(
            clean_params("x int, y int", ParamStyle::NameFirst),
            vec!["x", "y"]
        );
        assert_eq!(
            clean_params("final List<String> items, int n", ParamStyle::NameLast),
            vec!["items", "n"]
        );
        assert_eq!(
            clean_params("*args, **kwargs", ParamStyle::NameFirst),
            vec!["args", "kwargs"]
        );
        assert!(clean_params("", ParamStyle::NameFirst).is_empty());
    }

    #[test]
    fn test_split_names() {
        assert_eq!(
            split_names("List, Optional as Opt, *"),
            vec!["List", "Optional"]
        );
    }
}

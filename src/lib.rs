//! Codegauge - multi-language parsing and code-metrics engine.
//!
//! Codegauge turns source text in any of a dozen languages into a
//! normalized structural model and a set of algorithmically precise
//! metrics: cyclomatic and cognitive complexity, Halstead figures, a
//! maintainability index, vocabulary-diversity statistics, nesting
//! depth, and fuzzy duplication findings. Downstream heuristic
//! detectors consume only the two data structures produced here.
//!
//! # Architecture
//!
//! ```text
//! source text + language tag
//!        │
//!        ▼
//! ┌─────────────────────────────┐
//! │ Structural Extractor        │  grammar (tree-sitter)
//! │ (three tiers, best wins,    │  native  (syn, rust only)
//! │  degrade on failure)        │  heuristic (regex tables)
//! └─────────────┬───────────────┘
//!               ▼
//!          ParseResult ──────────▶ Metrics Engine ──▶ MetricsReport
//! ```
//!
//! - `profile`: per-language constant tables (extensions, keywords,
//!   comment syntax, signature patterns)
//! - `result`: the unified structural model
//! - `extract`: the three extraction tiers and the fallback chain
//! - `metrics`: pure metric functions over `ParseResult` + text
//!
//! Parsing never fails: malformed input degrades to a lower tier with
//! the reason recorded in `parse_errors`. Every call is synchronous and
//! stateless, so batch callers can parallelize freely.

pub mod extract;
pub mod metrics;
pub mod profile;
pub mod result;

pub use extract::{
    parse_path, parse_paths, parse_source, parse_source_with, ParseOptions,
};
pub use metrics::{compute_metrics, MetricsReport, Severity};
pub use profile::{language_for_extension, UNKNOWN_LANGUAGE};
pub use result::{
    Backend, ClassInfo, FunctionInfo, ImportInfo, ParseResult, VariableInfo,
};

/// Initialize all subsystems.
///
/// Call this once at startup. Registration is read-only afterwards, so
/// parse calls from any number of threads need no locking. Parsing
/// works without calling this; the first parse then pays the one-time
/// registration cost itself.
pub fn init() {
    #[cfg(feature = "tree-sitter")]
    extract::languages::register_grammars();
}

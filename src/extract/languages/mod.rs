//! Per-language grammar specifications and the process-wide registry.
//!
//! Registration is a one-time, read-only initialization: each grammar is
//! load-checked once and the availability list never changes afterwards,
//! so parse calls can consult the registry without locking.
//!
//! # Adding a New Language
//!
//! 1. Create a module here with a `GrammarSpec` (queries + node-kind
//!    tables); see `python.rs` for a reference.
//! 2. Add the spec to `ALL` below.
//! 3. Map its file extensions in `profile.rs`.

mod c;
mod cpp;
mod go;
mod java;
mod javascript;
mod python;
mod rust_lang;
mod scala;
mod swift;
mod typescript;

use once_cell::sync::OnceCell;

use super::grammar::GrammarSpec;

static ALL: &[&GrammarSpec] = &[
    &c::SPEC,
    &cpp::SPEC,
    &go::SPEC,
    &java::SPEC,
    &javascript::SPEC,
    &python::SPEC,
    &rust_lang::SPEC,
    &scala::SPEC,
    &swift::SPEC,
    &typescript::SPEC,
];

/// Language ids whose grammar loaded successfully at registration time.
static AVAILABLE: OnceCell<Vec<&'static str>> = OnceCell::new();

/// Register all grammars, load-checking each one.
///
/// Call this once at startup. Idempotent: later calls (including the
/// implicit one in [`grammar_for`]) return immediately.
pub fn register_grammars() {
    AVAILABLE.get_or_init(|| {
        ALL.iter()
            .filter(|spec| {
                let mut parser = tree_sitter::Parser::new();
                parser.set_language(&(spec.language)()).is_ok()
            })
            .map(|spec| spec.language_id)
            .collect()
    });
}

/// Get the grammar spec for a language tag.
///
/// Returns None when no grammar is registered or its library failed to
/// load, which sends the caller down the fallback chain.
pub fn grammar_for(language: &str) -> Option<&'static GrammarSpec> {
    register_grammars();
    let available = AVAILABLE.get()?;
    if !available.contains(&language) {
        return None;
    }
    ALL.iter().copied().find(|spec| spec.language_id == language)
}

/// All language ids with a loadable grammar.
pub fn grammar_languages() -> Vec<&'static str> {
    register_grammars();
    AVAILABLE.get().cloned().unwrap_or_default()
}

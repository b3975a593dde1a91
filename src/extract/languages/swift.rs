//! Swift grammar specification.

use tree_sitter::Language;

use crate::extract::grammar::GrammarSpec;

fn lang() -> Language {
    tree_sitter_swift::LANGUAGE.into()
}

const FUNCTION_QUERY: &str = r#"
(function_declaration name: (simple_identifier) @name) @function
"#;

const CLASS_QUERY: &str = r#"
(class_declaration name: (type_identifier) @name) @class
(protocol_declaration name: (type_identifier) @name) @class
"#;

const IMPORT_QUERY: &str = r#"
(import_declaration) @import
"#;

/// `class_declaration` covers class, struct, enum, and actor declarations
/// in tree-sitter-swift.
pub static SPEC: GrammarSpec = GrammarSpec {
    language_id: "swift",
    language: lang,
    function_query: FUNCTION_QUERY,
    class_query: CLASS_QUERY,
    import_query: IMPORT_QUERY,
    variable_query: "",
    decision_kinds: &[
        "if_statement",
        "guard_statement",
        "while_statement",
        "for_statement",
        "repeat_while_statement",
        "switch_entry",
        "catch_block",
    ],
    boolean_operators: &[],
    bases_kinds: &["inheritance_specifier"],
    has_docstrings: false,
};

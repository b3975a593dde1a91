//! Go grammar specification.

use tree_sitter::Language;

use crate::extract::grammar::GrammarSpec;

fn lang() -> Language {
    tree_sitter_go::LANGUAGE.into()
}

const FUNCTION_QUERY: &str = r#"
(function_declaration name: (identifier) @name) @function
(method_declaration name: (field_identifier) @name) @method
"#;

const CLASS_QUERY: &str = r#"
(type_declaration (type_spec name: (type_identifier) @name)) @class
"#;

const IMPORT_QUERY: &str = r#"
(import_spec path: (interpreted_string_literal) @module) @import
"#;

const VARIABLE_QUERY: &str = r#"
(source_file (const_declaration (const_spec name: (identifier) @name))) @variable
(source_file (var_declaration (var_spec name: (identifier) @name))) @variable
"#;

/// Decision points: if/for statements, switch and select case arms, and
/// short-circuit operators.
pub static SPEC: GrammarSpec = GrammarSpec {
    language_id: "go",
    language: lang,
    function_query: FUNCTION_QUERY,
    class_query: CLASS_QUERY,
    import_query: IMPORT_QUERY,
    variable_query: VARIABLE_QUERY,
    decision_kinds: &[
        "if_statement",
        "for_statement",
        "expression_case",
        "type_case",
        "communication_case",
        "default_case",
    ],
    boolean_operators: &["&&", "||"],
    bases_kinds: &[],
    has_docstrings: false,
};

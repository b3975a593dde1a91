//! TypeScript grammar specification.

use tree_sitter::Language;

use crate::extract::grammar::GrammarSpec;

fn lang() -> Language {
    tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
}

const FUNCTION_QUERY: &str = r#"
(function_declaration name: (identifier) @name) @function
(method_definition name: (property_identifier) @name) @method
"#;

const CLASS_QUERY: &str = r#"
(class_declaration name: (type_identifier) @name) @class
(interface_declaration name: (type_identifier) @name) @class
"#;

const IMPORT_QUERY: &str = r#"
(import_statement source: (string) @module) @import
(import_statement (import_clause (named_imports (import_specifier name: (identifier) @iname))) source: (string) @module) @import
"#;

const VARIABLE_QUERY: &str = r#"
(program (lexical_declaration (variable_declarator name: (identifier) @name))) @variable
(program (variable_declaration (variable_declarator name: (identifier) @name))) @variable
"#;

/// Decision points: branches, loops, switch cases, catch clauses,
/// ternaries, and short-circuit operators including `??`.
pub static SPEC: GrammarSpec = GrammarSpec {
    language_id: "typescript",
    language: lang,
    function_query: FUNCTION_QUERY,
    class_query: CLASS_QUERY,
    import_query: IMPORT_QUERY,
    variable_query: VARIABLE_QUERY,
    decision_kinds: &[
        "if_statement",
        "for_statement",
        "for_in_statement",
        "while_statement",
        "do_statement",
        "switch_case",
        "catch_clause",
        "ternary_expression",
        "throw_statement",
    ],
    boolean_operators: &["&&", "||", "??"],
    bases_kinds: &["class_heritage"],
    has_docstrings: false,
};

//! Java grammar specification.

use tree_sitter::Language;

use crate::extract::grammar::GrammarSpec;

fn lang() -> Language {
    tree_sitter_java::LANGUAGE.into()
}

const FUNCTION_QUERY: &str = r#"
(method_declaration name: (identifier) @name) @method
(constructor_declaration name: (identifier) @name) @method
"#;

const CLASS_QUERY: &str = r#"
(class_declaration name: (identifier) @name) @class
(interface_declaration name: (identifier) @name) @class
(enum_declaration name: (identifier) @name) @class
"#;

const IMPORT_QUERY: &str = r#"
(import_declaration (scoped_identifier) @module) @import
"#;

pub static SPEC: GrammarSpec = GrammarSpec {
    language_id: "java",
    language: lang,
    function_query: FUNCTION_QUERY,
    class_query: CLASS_QUERY,
    import_query: IMPORT_QUERY,
    variable_query: "",
    decision_kinds: &[
        "if_statement",
        "for_statement",
        "enhanced_for_statement",
        "while_statement",
        "do_statement",
        "switch_block_statement_group",
        "catch_clause",
        "ternary_expression",
        "throw_statement",
    ],
    boolean_operators: &["&&", "||"],
    bases_kinds: &["superclass", "super_interfaces"],
    has_docstrings: false,
};

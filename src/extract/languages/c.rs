//! C grammar specification.

use tree_sitter::Language;

use crate::extract::grammar::GrammarSpec;

fn lang() -> Language {
    tree_sitter_c::LANGUAGE.into()
}

const FUNCTION_QUERY: &str = r#"
(function_definition declarator: (function_declarator declarator: (identifier) @name)) @function
"#;

const CLASS_QUERY: &str = r#"
(struct_specifier name: (type_identifier) @name) @class
(enum_specifier name: (type_identifier) @name) @class
(union_specifier name: (type_identifier) @name) @class
"#;

const IMPORT_QUERY: &str = r#"
(preproc_include path: (string_literal) @module) @import
(preproc_include path: (system_lib_string) @module) @import
"#;

pub static SPEC: GrammarSpec = GrammarSpec {
    language_id: "c",
    language: lang,
    function_query: FUNCTION_QUERY,
    class_query: CLASS_QUERY,
    import_query: IMPORT_QUERY,
    variable_query: "",
    decision_kinds: &[
        "if_statement",
        "for_statement",
        "while_statement",
        "do_statement",
        "case_statement",
        "conditional_expression",
        "goto_statement",
    ],
    boolean_operators: &["&&", "||"],
    bases_kinds: &[],
    has_docstrings: false,
};

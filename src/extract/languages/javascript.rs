//! JavaScript grammar specification.

use tree_sitter::Language;

use crate::extract::grammar::GrammarSpec;

fn lang() -> Language {
    tree_sitter_javascript::LANGUAGE.into()
}

const FUNCTION_QUERY: &str = r#"
(function_declaration name: (identifier) @name) @function
(method_definition name: (property_identifier) @name) @method
"#;

const CLASS_QUERY: &str = r#"
(class_declaration name: (identifier) @name) @class
"#;

const IMPORT_QUERY: &str = r#"
(import_statement source: (string) @module) @import
(import_statement (import_clause (named_imports (import_specifier name: (identifier) @iname))) source: (string) @module) @import
"#;

const VARIABLE_QUERY: &str = r#"
(program (lexical_declaration (variable_declarator name: (identifier) @name))) @variable
(program (variable_declaration (variable_declarator name: (identifier) @name))) @variable
"#;

pub static SPEC: GrammarSpec = GrammarSpec {
    language_id: "javascript",
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::grammar;

    #[test]
    fn test_extract_javascript_structure() {
        let src = r#"const config = require("./config");

class Queue {
    push(item) {
        if (item == null) {
            throw new Error("empty");
        }
        this.items.push(item);
    }
}

function drain(queue) {
    while (queue.size() > 0) {
        queue.pop();
    }
}
"#;
        let result = grammar::extract(src, &SPEC).unwrap();
        assert_eq!(result.classes.len(), 1);
        assert_eq!(result.classes[0].methods.len(), 1);
        assert_eq!(result.functions.len(), 1);
        assert_eq!(result.functions[0].name, "drain");
        // 1 base + 1 while
        assert_eq!(result.functions[0].complexity, 2);
        assert!(result.variables.iter().any(|v| v.name == "config"));
    }
}

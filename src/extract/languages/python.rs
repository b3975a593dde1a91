//! Python grammar specification.

use tree_sitter::Language;

use crate::extract::grammar::GrammarSpec;

fn lang() -> Language {
    tree_sitter_python::LANGUAGE.into()
}

const FUNCTION_QUERY: &str = r#"
(function_definition name: (identifier) @name) @function
"#;

const CLASS_QUERY: &str = r#"
(class_definition name: (identifier) @name) @class
"#;

const IMPORT_QUERY: &str = r#"
(import_statement name: (dotted_name) @module) @import
(import_statement name: (aliased_import name: (dotted_name) @module)) @import
(import_from_statement module_name: (dotted_name) @module name: (dotted_name) @iname) @import
(import_from_statement module_name: (relative_import) @module) @import
"#;

const VARIABLE_QUERY: &str = r#"
(module (expression_statement (assignment left: (identifier) @name type: (type) @type))) @variable
(module (expression_statement (assignment left: (identifier) @name))) @variable
"#;

/// Decision points counted for cyclomatic complexity:
/// branches, loops, exception handlers, comprehension clauses, boolean
/// operators, assertions, raises, and match arms.
pub static SPEC: GrammarSpec = GrammarSpec {
    language_id: "python",
    language: lang,
    function_query: FUNCTION_QUERY,
    class_query: CLASS_QUERY,
    import_query: IMPORT_QUERY,
    variable_query: VARIABLE_QUERY,
    decision_kinds: &[
        "if_statement",
        "elif_clause",
        "for_statement",
        "while_statement",
        "except_clause",
        "with_statement",
        "conditional_expression",
        "list_comprehension",
        "dictionary_comprehension",
        "set_comprehension",
        "generator_expression",
        "assert_statement",
        "raise_statement",
        "case_clause",
    ],
    boolean_operators: &["and", "or"],
    bases_kinds: &["argument_list"],
    has_docstrings: true,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::grammar;

    #[test]
    fn test_extract_python_structure() {
        let src = r#"import os
from typing import List

CACHE_SIZE = 128

class Loader(Base):
    """Loads things."""

    def load(self, path):
        if path and os.path.exists(path):
            return open(path)
        return None

async def main():
    loader = Loader()
"#;
        let result = grammar::extract(src, &SPEC).unwrap();
        assert_eq!(result.classes.len(), 1);
        let class = &result.classes[0];
        assert_eq!(class.name, "Loader");
        assert_eq!(class.base_classes, vec!["Base"]);
        assert_eq!(class.docstring.as_deref(), Some("Loads things."));
        assert_eq!(class.methods.len(), 1);
        assert_eq!(class.methods[0].name, "load");
        assert_eq!(class.methods[0].parameters, vec!["path"]);
        assert!(class.methods[0].is_method);

        assert_eq!(result.functions.len(), 1);
        assert_eq!(result.functions[0].name, "main");
        assert!(result.functions[0].is_async);

        assert_eq!(result.imports.len(), 2);
        assert_eq!(result.imports[0].module, "os");
        assert_eq!(result.imports[1].module, "typing");
        assert_eq!(result.imports[1].names, vec!["List"]);

        assert!(result
            .variables
            .iter()
            .any(|v| v.name == "CACHE_SIZE" && v.is_constant));
    }

    #[test]
    fn test_python_complexity_counts() {
        let src = "def f(x):\n    if x:\n        return 1\n    return 0\n";
        let result = grammar::extract(src, &SPEC).unwrap();
        assert_eq!(result.functions.len(), 1);
        assert_eq!(result.functions[0].complexity, 2);
        assert_eq!(result.complexity, 2);
    }

    #[test]
    fn test_python_partial_tree_still_extracts() {
        let src = "def good():\n    return 1\n\ndef broken(:\n";
        let result = grammar::extract(src, &SPEC).unwrap();
        assert!(!result.parse_errors.is_empty());
        assert!(result.functions.iter().any(|f| f.name == "good"));
    }
}

//! C++ grammar specification.

use tree_sitter::Language;

use crate::extract::grammar::GrammarSpec;

fn lang() -> Language {
    tree_sitter_cpp::LANGUAGE.into()
}

const FUNCTION_QUERY: &str = r#"
(function_definition declarator: (function_declarator declarator: (identifier) @name)) @function
(function_definition declarator: (function_declarator declarator: (qualified_identifier name: (identifier) @name))) @method
(function_definition declarator: (function_declarator declarator: (field_identifier) @name)) @method
"#;

const CLASS_QUERY: &str = r#"
(class_specifier name: (type_identifier) @name) @class
(struct_specifier name: (type_identifier) @name) @class
"#;

const IMPORT_QUERY: &str = r#"
(preproc_include path: (string_literal) @module) @import
(preproc_include path: (system_lib_string) @module) @import
"#;

pub static SPEC: GrammarSpec = GrammarSpec {
    language_id: "cpp",
    language: lang,
    function_query: FUNCTION_QUERY,
    class_query: CLASS_QUERY,
    import_query: IMPORT_QUERY,
    variable_query: "",
    decision_kinds: &[
        "if_statement",
        "for_statement",
        "for_range_loop",
        "while_statement",
        "do_statement",
        "case_statement",
        "catch_clause",
        "conditional_expression",
        "throw_statement",
    ],
    boolean_operators: &["&&", "||"],
    bases_kinds: &["base_class_clause"],
    has_docstrings: false,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::grammar;

    #[test]
    fn test_extract_cpp_structure() {
        let src = r#"#include <vector>

class Buffer : public Container {
public:
    void append(int value) {
        if (value >= 0) {
            data.push_back(value);
        }
    }
};

int Buffer_size(const Buffer& buf) {
    return 0;
}
"#;
        let result = grammar::extract(src, &SPEC).unwrap();
        assert_eq!(result.imports[0].module, "vector");
        assert_eq!(result.classes.len(), 1);
        assert_eq!(result.classes[0].base_classes, vec!["Container"]);
        assert_eq!(result.classes[0].methods.len(), 1);
        assert_eq!(result.classes[0].methods[0].name, "append");
        assert_eq!(result.functions.len(), 1);
        assert_eq!(result.functions[0].name, "Buffer_size");
        assert_eq!(result.functions[0].parameters, vec!["buf"]);
    }
}

//! Scala grammar specification.

use tree_sitter::Language;

use crate::extract::grammar::GrammarSpec;

fn lang() -> Language {
    tree_sitter_scala::LANGUAGE.into()
}

const FUNCTION_QUERY: &str = r#"
(function_definition name: (identifier) @name) @function
"#;

const CLASS_QUERY: &str = r#"
(class_definition name: (identifier) @name) @class
(object_definition name: (identifier) @name) @class
(trait_definition name: (identifier) @name) @class
"#;

const IMPORT_QUERY: &str = r#"
(import_declaration) @import
"#;

pub static SPEC: GrammarSpec = GrammarSpec {
    language_id: "scala",
    language: lang,
    function_query: FUNCTION_QUERY,
    class_query: CLASS_QUERY,
    import_query: IMPORT_QUERY,
    variable_query: "",
    decision_kinds: &[
        "if_expression",
        "while_expression",
        "for_expression",
        "case_clause",
        "catch_clause",
    ],
    boolean_operators: &[],
    bases_kinds: &["extends_clause"],
    has_docstrings: false,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::grammar;

    #[test]
    fn test_extract_scala_structure() {
        let src = r#"import scala.collection.mutable

object Tally {
  def count(values: Seq[Int]): Int = {
    var total = 0
    for (v <- values) {
      if (v > 0) {
        total += v
      }
    }
    total
  }
}
"#;
        let result = grammar::extract(src, &SPEC).unwrap();
        assert_eq!(result.imports.len(), 1);
        assert_eq!(result.imports[0].module, "scala.collection.mutable");
        assert_eq!(result.classes.len(), 1);
        assert_eq!(result.classes[0].name, "Tally");
        assert_eq!(result.classes[0].methods.len(), 1);
        let count = &result.classes[0].methods[0];
        assert_eq!(count.name, "count");
        // 1 base + 1 for + 1 if
        assert_eq!(count.complexity, 3);
    }
}

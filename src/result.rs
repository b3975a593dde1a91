//! Structural facts extracted from a single source file.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which extraction tier produced a [`ParseResult`].
///
/// Tiers are ordered by structural fidelity: a grammar-backed concrete
/// syntax tree, the host language's own parser, then regex heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Backend {
    Grammar,
    Native,
    Heuristic,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Grammar => "grammar",
            Backend::Native => "native",
            Backend::Heuristic => "heuristic",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A function or method extracted from source code.
///
/// Line numbers are 1-based and inclusive. For the heuristic tier,
/// `line_end == line_start` means the end of the defining block could not
/// be determined, not that the function is one line long.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionInfo {
    pub name: String,
    pub line_start: usize,
    pub line_end: usize,
    /// Parameter names in declaration order; receivers (`self`, `cls`,
    /// `&self`) are excluded.
    pub parameters: Vec<String>,
    pub is_async: bool,
    pub is_method: bool,
    /// Decorators/attributes/annotations, preserved verbatim.
    pub decorators: Vec<String>,
    /// Function-scoped cyclomatic complexity, always >= 1.
    pub complexity: u32,
    pub docstring: Option<String>,
    pub return_type: Option<String>,
}

impl FunctionInfo {
    /// Create a function record with base complexity at the given line.
    pub fn new(name: impl Into<String>, line_start: usize) -> Self {
        Self {
            name: name.into(),
            line_start,
            line_end: line_start,
            parameters: Vec::new(),
            is_async: false,
            is_method: false,
            decorators: Vec::new(),
            complexity: 1,
            docstring: None,
            return_type: None,
        }
    }

    /// Whether the defining block's end was actually located.
    pub fn has_known_end(&self) -> bool {
        self.line_end > self.line_start
    }
}

/// A class/struct/trait-like type declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassInfo {
    pub name: String,
    pub line_start: usize,
    pub line_end: usize,
    pub base_classes: Vec<String>,
    pub methods: Vec<FunctionInfo>,
    pub attributes: Vec<String>,
    pub docstring: Option<String>,
}

impl ClassInfo {
    pub fn new(name: impl Into<String>, line_start: usize) -> Self {
        Self {
            name: name.into(),
            line_start,
            line_end: line_start,
            base_classes: Vec::new(),
            methods: Vec::new(),
            attributes: Vec::new(),
            docstring: None,
        }
    }
}

/// An import/use/include declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportInfo {
    /// Raw or dotted module path as written in the source.
    pub module: String,
    /// Imported symbols; empty for whole-module imports.
    pub names: Vec<String>,
    pub line_number: usize,
}

/// A module-level variable binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableInfo {
    pub name: String,
    pub line_number: usize,
    pub type_annotation: Option<String>,
    /// All-uppercase names are treated as constants.
    pub is_constant: bool,
    /// This extractor only reports module scope.
    pub scope: String,
}

impl VariableInfo {
    pub fn new(name: impl Into<String>, line_number: usize) -> Self {
        let name = name.into();
        let is_constant = is_constant_name(&name);
        Self {
            name,
            line_number,
            type_annotation: None,
            is_constant,
            scope: "module".to_string(),
        }
    }
}

/// Heuristic: a name is a constant when it has no lowercase letters and at
/// least one uppercase letter.
pub fn is_constant_name(name: &str) -> bool {
    name.chars().any(|c| c.is_ascii_uppercase())
        && !name.chars().any(|c| c.is_ascii_lowercase())
}

/// The unified structural model produced by one parse call.
///
/// Immutable after construction and owned by the caller; no backend state
/// (in particular no grammar tree handle) is retained inside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResult {
    pub language: String,
    pub backend_used: Backend,
    pub parse_succeeded: bool,
    /// Non-fatal diagnostics, in the order the fallback chain produced them.
    pub parse_errors: Vec<String>,
    /// Top-level functions in source order. Methods live under `classes`.
    pub functions: Vec<FunctionInfo>,
    pub classes: Vec<ClassInfo>,
    pub imports: Vec<ImportInfo>,
    /// Module-scope variables only.
    pub variables: Vec<VariableInfo>,
    pub total_lines: usize,
    pub code_lines: usize,
    pub comment_lines: usize,
    pub blank_lines: usize,
    /// File-level cyclomatic complexity, always >= 1.
    pub complexity: u32,
    pub max_nesting_depth: u32,
}

impl ParseResult {
    /// An empty result for the given language and tier, with the line
    /// counts of an empty file and base complexity.
    pub fn empty(language: &str, backend: Backend) -> Self {
        Self {
            language: language.to_string(),
            backend_used: backend,
            parse_succeeded: true,
            parse_errors: Vec::new(),
            functions: Vec::new(),
            classes: Vec::new(),
            imports: Vec::new(),
            variables: Vec::new(),
            total_lines: 1,
            code_lines: 0,
            comment_lines: 0,
            blank_lines: 1,
            complexity: 1,
            max_nesting_depth: 0,
        }
    }

    /// All functions and methods, ordered by starting line.
    pub fn all_functions(&self) -> Vec<&FunctionInfo> {
        let mut all: Vec<&FunctionInfo> = self
            .functions
            .iter()
            .chain(self.classes.iter().flat_map(|c| c.methods.iter()))
            .collect();
        all.sort_by(|a, b| {
            a.line_start.cmp(&b.line_start).then_with(|| a.name.cmp(&b.name))
        });
        all
    }

    /// Find a function or method by name.
    pub fn find_function(&self, name: &str) -> Option<&FunctionInfo> {
        self.all_functions().into_iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_as_str() {
        assert_eq!(Backend::Grammar.as_str(), "grammar");
        assert_eq!(Backend::Heuristic.to_string(), "heuristic");
    }

    #[test]
    fn test_function_info_defaults() {
        let f = FunctionInfo::new("main", 3);
        assert_eq!(f.complexity, 1);
        assert_eq!(f.line_end, 3);
        assert!(!f.has_known_end());
        assert!(f.parameters.is_empty());
    }

    #[test]
    fn test_constant_name_heuristic() {
        assert!(is_constant_name("MAX_SIZE"));
        assert!(is_constant_name("TIMEOUT"));
        assert!(!is_constant_name("maxSize"));
        assert!(!is_constant_name("_private"));
        assert!(!is_constant_name("__123__"));
    }

    #[test]
    fn test_empty_result_invariants() {
        let r = ParseResult::empty("python", Backend::Heuristic);
        assert!(r.parse_succeeded);
        assert_eq!(r.total_lines, 1);
        assert_eq!(
            r.code_lines + r.comment_lines + r.blank_lines,
            r.total_lines
        );
        assert_eq!(r.complexity, 1);
    }

    #[test]
    fn test_all_functions_ordering() {
        let mut r = ParseResult::empty("python", Backend::Grammar);
        r.functions.push(FunctionInfo::new("late", 20));
        let mut class = ClassInfo::new("C", 1);
        let mut m = FunctionInfo::new("early", 2);
        m.is_method = true;
        class.methods.push(m);
        r.classes.push(class);

        let all = r.all_functions();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "early");
        assert_eq!(all[1].name, "late");
        assert!(r.find_function("late").is_some());
        assert!(r.find_function("missing").is_none());
    }
}

//! Per-language constant data driving the extraction tiers.
//!
//! A [`LanguageProfile`] carries everything the heuristic backend and the
//! text-based metrics need to know about a language: decision keywords and
//! operators, the reserved-word set for Halstead operator classification,
//! comment syntax, and the regex sources used for signature extraction.
//! Profiles are pure data; the extraction logic lives in `extract`.

use phf::phf_map;

/// Sentinel tag for unrecognized file extensions. Routes straight to the
/// heuristic backend with the generic profile.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Where parameter names sit relative to their types in a parameter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamStyle {
    /// `name: Type` or bare `name` (python, rust, go, typescript, swift).
    NameFirst,
    /// `Type name` (java, c, c++).
    NameLast,
}

/// Constant per-language data. No behavior beyond lookups.
#[derive(Debug)]
pub struct LanguageProfile {
    pub id: &'static str,
    /// Keywords that add a decision point, counted at word boundaries.
    pub decision_keywords: &'static [&'static str],
    /// Operator tokens that add a decision point, counted as substrings.
    pub decision_operators: &'static [&'static str],
    /// Reserved words, used to classify Halstead operators.
    pub keywords: &'static [&'static str],
    pub line_comment: &'static [&'static str],
    /// Block comment (or doc-string) delimiter pairs.
    pub block_comment: &'static [(&'static str, &'static str)],
    /// Whether nesting is expressed by indentation rather than braces.
    pub indent_based: bool,
    pub param_style: ParamStyle,
    /// Heuristic-tier signature regexes. Named groups: `name` (required),
    /// `params`, `async`, `ret`, `recv`, `bases`.
    pub function_patterns: &'static [&'static str],
    pub class_patterns: &'static [&'static str],
    /// Named groups: `mod` (module path), `names` (imported symbols).
    pub import_patterns: &'static [&'static str],
    /// Named groups: `name`, `type`. Matched at module level only.
    pub variable_patterns: &'static [&'static str],
}

static EXTENSION_MAP: phf::Map<&'static str, &'static str> = phf_map! {
    "py" => "python",
    "pyi" => "python",
    "rs" => "rust",
    "ts" => "typescript",
    "tsx" => "typescript",
    "mts" => "typescript",
    "js" => "javascript",
    "jsx" => "javascript",
    "mjs" => "javascript",
    "go" => "go",
    "java" => "java",
    "c" => "c",
    "h" => "c",
    "cpp" => "cpp",
    "cc" => "cpp",
    "cxx" => "cpp",
    "hpp" => "cpp",
    "hh" => "cpp",
    "scala" => "scala",
    "sc" => "scala",
    "swift" => "swift",
    "rb" => "ruby",
    "kt" => "kotlin",
    "kts" => "kotlin",
};

/// Map a file extension (with or without leading dot, any case) to a
/// language tag. Unrecognized extensions map to [`UNKNOWN_LANGUAGE`].
pub fn language_for_extension(ext: &str) -> &'static str {
    let ext = ext.trim_start_matches('.').to_ascii_lowercase();
    EXTENSION_MAP.get(ext.as_str()).copied().unwrap_or(UNKNOWN_LANGUAGE)
}

static PYTHON: LanguageProfile = LanguageProfile {
    id: "python",
    decision_keywords: &[
        "if", "elif", "for", "while", "except", "with", "and", "or",
        "assert", "raise", "case",
    ],
    decision_operators: &[],
    keywords: &[
        "False", "None", "True", "and", "as", "assert", "async", "await",
        "break", "class", "continue", "def", "del", "elif", "else", "except",
        "finally", "for", "from", "global", "if", "import", "in", "is",
        "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
        "while", "with", "yield", "match", "case",
    ],
    line_comment: &["#"],
    block_comment: &[("\"\"\"", "\"\"\""), ("'''", "'''")],
    indent_based: true,
    param_style: ParamStyle::NameFirst,
    function_patterns: &[
        r"^\s*(?P<async>async\s+)?def\s+(?P<name>\w+)\s*\((?P<params>[^)]*)\)\s*(?:->\s*(?P<ret>[^:]+?)\s*)?:",
    ],
    class_patterns: &[r"^\s*class\s+(?P<name>\w+)\s*(?:\((?P<bases>[^)]*)\))?\s*:"],
    import_patterns: &[
        r"^\s*from\s+(?P<mod>[.\w]+)\s+import\s+(?P<names>[^#]+)",
        r"^\s*import\s+(?P<mod>[\w.]+(?:\s*,\s*[\w.]+)*)",
    ],
    variable_patterns: &[
        r"^(?P<name>[A-Za-z_]\w*)\s*(?::\s*(?P<type>[^=]+?)\s*)?=\s*[^=]",
    ],
};

static RUST: LanguageProfile = LanguageProfile {
    id: "rust",
    decision_keywords: &["if", "for", "while", "loop", "match"],
    decision_operators: &["&&", "||"],
    keywords: &[
        "as", "async", "await", "break", "const", "continue", "crate", "dyn",
        "else", "enum", "extern", "fn", "for", "if", "impl", "in", "let",
        "loop", "match", "mod", "move", "mut", "pub", "ref", "return",
        "self", "static", "struct", "super", "trait", "type", "unsafe",
        "use", "where", "while",
    ],
    line_comment: &["//"],
    block_comment: &[("/*", "*/")],
    indent_based: false,
    param_style: ParamStyle::NameFirst,
    function_patterns: &[
        r"^\s*(?:pub(?:\([^)]*\))?\s+)?(?P<async>async\s+)?(?:unsafe\s+)?(?:extern\s+\S+\s+)?fn\s+(?P<name>\w+)\s*(?:<[^>]*>)?\s*\((?P<params>[^)]*)\)(?:\s*->\s*(?P<ret>[^{;]+?)\s*)?[{;]?",
    ],
    class_patterns: &[
        r"^\s*(?:pub(?:\([^)]*\))?\s+)?(?:struct|enum|trait)\s+(?P<name>\w+)",
    ],
    import_patterns: &[
        r"^\s*(?:pub(?:\([^)]*\))?\s+)?use\s+(?P<mod>[\w:]+)(?:::\{(?P<names>[^}]*)\})?",
    ],
    variable_patterns: &[
        r"^\s*(?:pub(?:\([^)]*\))?\s+)?(?:const|static)\s+(?P<name>\w+)\s*:\s*(?P<type>[^=]+?)\s*=",
    ],
};

static TYPESCRIPT: LanguageProfile = LanguageProfile {
    id: "typescript",
    decision_keywords: &["if", "for", "while", "case", "catch", "do", "throw"],
    decision_operators: &["&&", "||", "??"],
    keywords: &[
        "abstract", "any", "as", "async", "await", "break", "case", "catch",
        "class", "const", "continue", "default", "delete", "do", "else",
        "enum", "export", "extends", "finally", "for", "function", "if",
        "implements", "import", "in", "instanceof", "interface", "let",
        "new", "of", "private", "protected", "public", "readonly", "return",
        "static", "switch", "throw", "try", "type", "typeof", "var", "void",
        "while", "yield",
    ],
    line_comment: &["//"],
    block_comment: &[("/*", "*/")],
    indent_based: false,
    param_style: ParamStyle::NameFirst,
    function_patterns: &[
        r"^\s*(?:export\s+)?(?:default\s+)?(?P<async>async\s+)?function\s*\*?\s*(?P<name>\w+)\s*(?:<[^>]*>)?\s*\((?P<params>[^)]*)\)(?:\s*:\s*(?P<ret>[^{]+?)\s*)?\{?",
        r"^\s*(?:export\s+)?(?:const|let|var)\s+(?P<name>\w+)\s*=\s*(?P<async>async\s+)?\((?P<params>[^)]*)\)\s*(?::\s*(?P<ret>[^=]+?)\s*)?=>",
    ],
    class_patterns: &[
        r"^\s*(?:export\s+)?(?:default\s+)?(?:abstract\s+)?class\s+(?P<name>\w+)(?:\s+extends\s+(?P<bases>[\w.,\s<>]+?))?(?:\s+implements\s+[\w.,\s<>]+)?\s*\{?",
        r"^\s*(?:export\s+)?interface\s+(?P<name>\w+)",
    ],
    import_patterns: &[
        r#"^\s*import\s+(?:\{(?P<names>[^}]*)\}|\*\s+as\s+\w+|\w+)\s+from\s+['"](?P<mod>[^'"]+)['"]"#,
        r#"^\s*import\s+['"](?P<mod>[^'"]+)['"]"#,
        r#"^\s*(?:const|let|var)\s+\w+\s*=\s*require\(\s*['"](?P<mod>[^'"]+)['"]\s*\)"#,
    ],
    variable_patterns: &[
        r"^(?:export\s+)?(?:const|let|var)\s+(?P<name>\w+)\s*(?::\s*(?P<type>[^=]+?)\s*)?=\s*[^(>]",
    ],
};

static GO: LanguageProfile = LanguageProfile {
    id: "go",
    decision_keywords: &["if", "for", "case", "select", "go", "defer"],
    decision_operators: &["&&", "||"],
    keywords: &[
        "break", "case", "chan", "const", "continue", "default", "defer",
        "else", "fallthrough", "for", "func", "go", "goto", "if", "import",
        "interface", "map", "package", "range", "return", "select", "struct",
        "switch", "type", "var",
    ],
    line_comment: &["//"],
    block_comment: &[("/*", "*/")],
    indent_based: false,
    param_style: ParamStyle::NameFirst,
    function_patterns: &[
        r"^\s*func\s+(?:\((?P<recv>[^)]*)\)\s*)?(?P<name>\w+)\s*\((?P<params>[^)]*)\)\s*(?P<ret>[^{]*)\{",
    ],
    class_patterns: &[r"^\s*type\s+(?P<name>\w+)\s+(?:struct|interface)\b"],
    import_patterns: &[r#"^\s*import\s+(?:\w+\s+)?"(?P<mod>[^"]+)""#],
    variable_patterns: &[
        r"^(?:const|var)\s+(?P<name>\w+)(?:\s+(?P<type>[\w\[\]*.]+))?\s*=",
    ],
};

static JAVA: LanguageProfile = LanguageProfile {
    id: "java",
    decision_keywords: &["if", "for", "while", "case", "catch", "do", "throw"],
    decision_operators: &["&&", "||"],
    keywords: &[
        "abstract", "assert", "boolean", "break", "byte", "case", "catch",
        "char", "class", "const", "continue", "default", "do", "double",
        "else", "enum", "extends", "final", "finally", "float", "for", "if",
        "implements", "import", "instanceof", "int", "interface", "long",
        "native", "new", "package", "private", "protected", "public",
        "return", "short", "static", "super", "switch", "synchronized",
        "this", "throw", "throws", "try", "void", "volatile", "while",
    ],
    line_comment: &["//"],
    block_comment: &[("/*", "*/")],
    indent_based: false,
    param_style: ParamStyle::NameLast,
    function_patterns: &[
        r"^\s*(?:(?:public|private|protected|static|final|abstract|synchronized|native)\s+)+[\w<>\[\],.\s]+?\s+(?P<name>\w+)\s*\((?P<params>[^)]*)\)\s*(?:throws\s+[\w,.\s]+)?\s*\{",
    ],
    class_patterns: &[
        r"^\s*(?:(?:public|private|protected|final|abstract|static)\s+)*(?:class|interface|enum)\s+(?P<name>\w+)(?:\s+extends\s+(?P<bases>[\w.,\s<>]+?))?(?:\s+implements\s+[\w.,\s<>]+)?\s*\{?",
    ],
    import_patterns: &[r"^\s*import\s+(?:static\s+)?(?P<mod>[\w.]+(?:\.\*)?)\s*;"],
    variable_patterns: &[],
};

static C: LanguageProfile = LanguageProfile {
    id: "c",
    decision_keywords: &["if", "for", "while", "case", "do", "goto"],
    decision_operators: &["&&", "||"],
    keywords: &[
        "auto", "break", "case", "char", "const", "continue", "default",
        "do", "double", "else", "enum", "extern", "float", "for", "goto",
        "if", "inline", "int", "long", "register", "return", "short",
        "signed", "sizeof", "static", "struct", "switch", "typedef",
        "union", "unsigned", "void", "volatile", "while",
    ],
    line_comment: &["//"],
    block_comment: &[("/*", "*/")],
    indent_based: false,
    param_style: ParamStyle::NameLast,
    function_patterns: &[
        r"^(?:[\w*]+\s+)+\*?(?P<name>\w+)\s*\((?P<params>[^)]*)\)\s*\{",
    ],
    class_patterns: &[r"^\s*(?:typedef\s+)?(?:struct|enum|union)\s+(?P<name>\w+)"],
    import_patterns: &[r#"^\s*#\s*include\s*[<"](?P<mod>[^>"]+)[>"]"#],
    variable_patterns: &[],
};

static CPP: LanguageProfile = LanguageProfile {
    id: "cpp",
    decision_keywords: &["if", "for", "while", "case", "catch", "do", "throw"],
    decision_operators: &["&&", "||"],
    keywords: &[
        "auto", "bool", "break", "case", "catch", "char", "class", "const",
        "constexpr", "continue", "default", "delete", "do", "double", "else",
        "enum", "explicit", "extern", "false", "float", "for", "friend",
        "goto", "if", "inline", "int", "long", "mutable", "namespace", "new",
        "noexcept", "nullptr", "operator", "private", "protected", "public",
        "return", "short", "signed", "sizeof", "static", "struct", "switch",
        "template", "this", "throw", "true", "try", "typedef", "typename",
        "union", "unsigned", "using", "virtual", "void", "volatile", "while",
    ],
    line_comment: &["//"],
    block_comment: &[("/*", "*/")],
    indent_based: false,
    param_style: ParamStyle::NameLast,
    function_patterns: &[
        r"^(?:[\w:<>,*&~\s]+?)\b(?P<name>~?\w+)\s*\((?P<params>[^)]*)\)\s*(?:const\s*)?(?:noexcept\s*)?(?:override\s*)?\{",
    ],
    class_patterns: &[
        r"^\s*(?:template\s*<[^>]*>\s*)?(?:class|struct)\s+(?P<name>\w+)(?:\s*:\s*(?P<bases>[\w:,\s<>]+?))?\s*\{?",
    ],
    import_patterns: &[r#"^\s*#\s*include\s*[<"](?P<mod>[^>"]+)[>"]"#],
    variable_patterns: &[],
};

static SCALA: LanguageProfile = LanguageProfile {
    id: "scala",
    decision_keywords: &["if", "for", "while", "match", "case", "catch"],
    decision_operators: &["&&", "||"],
    keywords: &[
        "abstract", "case", "catch", "class", "def", "do", "else", "extends",
        "final", "finally", "for", "forSome", "if", "implicit", "import",
        "lazy", "match", "new", "object", "override", "package", "private",
        "protected", "return", "sealed", "super", "this", "throw", "trait",
        "try", "type", "val", "var", "while", "with", "yield",
    ],
    line_comment: &["//"],
    block_comment: &[("/*", "*/")],
    indent_based: false,
    param_style: ParamStyle::NameFirst,
    function_patterns: &[
        r"^\s*(?:(?:private|protected|override|final|implicit|lazy)\s+)*def\s+(?P<name>\w+)\s*(?:\[[^\]]*\])?\s*(?:\((?P<params>[^)]*)\))?(?:\s*:\s*(?P<ret>[^={]+?)\s*)?[={]?",
    ],
    class_patterns: &[
        r"^\s*(?:(?:case|final|abstract|sealed)\s+)*(?:class|object|trait)\s+(?P<name>\w+)(?:.*?extends\s+(?P<bases>[\w.,\s\[\]]+?))?\s*\{?",
    ],
    import_patterns: &[r"^\s*import\s+(?P<mod>[\w.]+)(?:\.\{(?P<names>[^}]*)\})?"],
    variable_patterns: &[],
};

static SWIFT: LanguageProfile = LanguageProfile {
    id: "swift",
    decision_keywords: &[
        "if", "guard", "for", "while", "switch", "case", "catch", "repeat",
        "throw",
    ],
    decision_operators: &["&&", "||", "??"],
    keywords: &[
        "actor", "as", "associatedtype", "async", "await", "break", "case",
        "catch", "class", "continue", "default", "defer", "deinit", "do",
        "else", "enum", "extension", "fallthrough", "fileprivate", "final",
        "for", "func", "guard", "if", "import", "in", "init", "inout",
        "internal", "is", "let", "nil", "open", "operator", "private",
        "protocol", "public", "repeat", "rethrows", "return", "self",
        "static", "struct", "subscript", "super", "switch", "throw",
        "throws", "try", "typealias", "var", "where", "while",
    ],
    line_comment: &["//"],
    block_comment: &[("/*", "*/")],
    indent_based: false,
    param_style: ParamStyle::NameFirst,
    function_patterns: &[
        r"^\s*(?:(?:public|private|internal|fileprivate|open|static|final|override|mutating)\s+)*func\s+(?P<name>\w+)\s*(?:<[^>]*>)?\s*\((?P<params>[^)]*)\)(?:\s*(?P<async>async)\s*)?(?:\s*throws\s*)?(?:\s*->\s*(?P<ret>[^{]+?)\s*)?\{?",
    ],
    class_patterns: &[
        r"^\s*(?:(?:public|private|internal|open|final)\s+)*(?:class|struct|enum|protocol|actor)\s+(?P<name>\w+)(?:\s*:\s*(?P<bases>[\w.,\s<>]+?))?\s*\{?",
    ],
    import_patterns: &[r"^\s*import\s+(?P<mod>[\w.]+)"],
    variable_patterns: &[],
};

static RUBY: LanguageProfile = LanguageProfile {
    id: "ruby",
    decision_keywords: &[
        "if", "elsif", "unless", "while", "until", "for", "when", "rescue",
        "and", "or",
    ],
    decision_operators: &["&&", "||"],
    keywords: &[
        "alias", "and", "begin", "break", "case", "class", "def", "do",
        "else", "elsif", "end", "ensure", "false", "for", "if", "in",
        "module", "next", "nil", "not", "or", "raise", "redo", "rescue",
        "retry", "return", "self", "super", "then", "true", "undef",
        "unless", "until", "when", "while", "yield",
    ],
    line_comment: &["#"],
    block_comment: &[("=begin", "=end")],
    indent_based: false,
    param_style: ParamStyle::NameFirst,
    function_patterns: &[
        r"^\s*def\s+(?:self\.)?(?P<name>[\w?!]+)\s*(?:\((?P<params>[^)]*)\))?",
    ],
    class_patterns: &[
        r"^\s*(?:class|module)\s+(?P<name>\w+)(?:\s*<\s*(?P<bases>[\w:]+))?",
    ],
    import_patterns: &[
        r#"^\s*require(?:_relative)?\s+['"](?P<mod>[^'"]+)['"]"#,
    ],
    variable_patterns: &[r"^(?P<name>[A-Z][A-Z0-9_]*)\s*=\s*"],
};

static KOTLIN: LanguageProfile = LanguageProfile {
    id: "kotlin",
    decision_keywords: &["if", "for", "while", "when", "catch", "do", "throw"],
    decision_operators: &["&&", "||", "?:"],
    keywords: &[
        "abstract", "as", "break", "by", "catch", "class", "companion",
        "const", "continue", "data", "do", "else", "enum", "false", "final",
        "finally", "for", "fun", "if", "import", "in", "interface",
        "internal", "is", "lateinit", "null", "object", "open", "override",
        "package", "private", "protected", "public", "return", "sealed",
        "super", "suspend", "this", "throw", "true", "try", "typealias",
        "val", "var", "when", "while",
    ],
    line_comment: &["//"],
    block_comment: &[("/*", "*/")],
    indent_based: false,
    param_style: ParamStyle::NameFirst,
    function_patterns: &[
        r"^\s*(?:(?:public|private|internal|protected|suspend|inline|override|open|operator)\s+)*fun\s+(?:<[^>]*>\s*)?(?:[\w.<>?]+\.)?(?P<name>\w+)\s*\((?P<params>[^)]*)\)(?:\s*:\s*(?P<ret>[\w<>?.]+))?",
    ],
    class_patterns: &[
        r"^\s*(?:(?:data|open|sealed|abstract|final|enum|annotation)\s+)*(?:class|interface|object)\s+(?P<name>\w+)(?:\s*(?:\([^)]*\))?\s*:\s*(?P<bases>[\w.,\s()<>]+?))?\s*\{?",
    ],
    import_patterns: &[r"^\s*import\s+(?P<mod>[\w.]+(?:\.\*)?)"],
    variable_patterns: &[
        r"^(?:const\s+)?(?:val|var)\s+(?P<name>\w+)(?:\s*:\s*(?P<type>[\w<>?.]+))?\s*=",
    ],
};

/// Catch-all profile for the `unknown` tag: a union of common control-flow
/// keywords and C-family comment syntax, so the heuristic tier still
/// produces usable line counts and a complexity estimate.
static GENERIC: LanguageProfile = LanguageProfile {
    id: UNKNOWN_LANGUAGE,
    decision_keywords: &[
        "if", "elif", "elsif", "for", "while", "case", "when", "catch",
        "except",
    ],
    decision_operators: &["&&", "||"],
    keywords: &[
        "break", "case", "catch", "class", "continue", "def", "do", "else",
        "elif", "except", "finally", "fn", "for", "func", "function", "if",
        "import", "in", "let", "match", "return", "switch", "try", "var",
        "while",
    ],
    line_comment: &["#", "//"],
    block_comment: &[("/*", "*/")],
    indent_based: false,
    param_style: ParamStyle::NameFirst,
    function_patterns: &[
        r"^\s*(?:def|fn|func|function|sub)\s+(?P<name>\w+)\s*(?:\((?P<params>[^)]*)\))?",
    ],
    class_patterns: &[r"^\s*(?:class|struct|trait|interface)\s+(?P<name>\w+)"],
    import_patterns: &[
        r"^\s*(?:import|use|require|include)\s+(?P<mod>[\w./:]+)",
    ],
    variable_patterns: &[],
};

/// Look up the profile for a language tag; unknown tags get the generic
/// profile.
pub fn profile_for(language: &str) -> &'static LanguageProfile {
    match language {
        "python" => &PYTHON,
        "rust" => &RUST,
        "typescript" => &TYPESCRIPT,
        "javascript" => &TYPESCRIPT, // same syntax family, same tables
        "go" => &GO,
        "java" => &JAVA,
        "c" => &C,
        "cpp" => &CPP,
        "scala" => &SCALA,
        "swift" => &SWIFT,
        "ruby" => &RUBY,
        "kotlin" => &KOTLIN,
        _ => &GENERIC,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_lookup() {
        assert_eq!(language_for_extension("py"), "python");
        assert_eq!(language_for_extension(".py"), "python");
        assert_eq!(language_for_extension("RS"), "rust");
        assert_eq!(language_for_extension("tsx"), "typescript");
        assert_eq!(language_for_extension("hpp"), "cpp");
        assert_eq!(language_for_extension("xyz"), UNKNOWN_LANGUAGE);
        assert_eq!(language_for_extension(""), UNKNOWN_LANGUAGE);
    }

    #[test]
    fn test_profile_lookup_falls_back_to_generic() {
        assert_eq!(profile_for("python").id, "python");
        assert_eq!(profile_for("javascript").id, "typescript");
        assert_eq!(profile_for("brainfuck").id, UNKNOWN_LANGUAGE);
    }

    #[test]
    fn test_profiles_have_comment_syntax() {
        for lang in [
            "python", "rust", "typescript", "go", "java", "c", "cpp",
            "scala", "swift", "ruby", "kotlin", UNKNOWN_LANGUAGE,
        ] {
            let p = profile_for(lang);
            assert!(
                !p.line_comment.is_empty(),
                "{} has no line comment marker",
                p.id
            );
            assert!(!p.decision_keywords.is_empty());
        }
    }

    #[test]
    fn test_function_patterns_compile() {
        for lang in [
            "python", "rust", "typescript", "go", "java", "c", "cpp",
            "scala", "swift", "ruby", "kotlin", UNKNOWN_LANGUAGE,
        ] {
            let p = profile_for(lang);
            for pat in p
                .function_patterns
                .iter()
                .chain(p.class_patterns)
                .chain(p.import_patterns)
                .chain(p.variable_patterns)
            {
                assert!(
                    regex::Regex::new(pat).is_ok(),
                    "{}: invalid pattern {:?}",
                    p.id,
                    pat
                );
            }
        }
    }

    #[test]
    fn test_python_function_pattern_matches() {
        let re = regex::Regex::new(PYTHON.function_patterns[0]).unwrap();
        let caps = re.captures("async def fetch(url, timeout=5) -> str:").unwrap();
        assert_eq!(&caps["name"], "fetch");
        assert_eq!(&caps["params"], "url, timeout=5");
        assert!(caps.name("async").is_some());
        assert_eq!(caps.name("ret").unwrap().as_str(), "str");
    }

    #[test]
    fn test_go_method_pattern_captures_receiver() {
        let re = regex::Regex::new(GO.function_patterns[0]).unwrap();
        let caps = re
            .captures("func (c *Config) Validate(strict bool) error {")
            .unwrap();
        assert_eq!(&caps["name"], "Validate");
        assert!(caps.name("recv").is_some());
    }
}

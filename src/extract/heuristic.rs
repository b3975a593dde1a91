//! Regex-based extraction tier.
//!
//! Used when no grammar is registered for a language, or when a richer
//! tier failed. Works line by line against the profile's signature
//! patterns and never fails on malformed input: patterns that match
//! nothing simply produce an empty structure.

use std::collections::HashMap;
use std::sync::RwLock;

use regex::Regex;

use crate::extract::lines::{classify_lines, LineKind};
use crate::extract::{clean_params, split_names};
use crate::profile::{profile_for, LanguageProfile};
use crate::result::{
    Backend, ClassInfo, FunctionInfo, ImportInfo, ParseResult, VariableInfo,
};

lazy_static::lazy_static! {
    /// Process-wide cache of compiled signature patterns, keyed by source.
    static ref PATTERN_CACHE: RwLock<HashMap<&'static str, Regex>> =
        RwLock::new(HashMap::new());
}

/// Fetch a compiled pattern from the cache, compiling on first use.
/// Profile patterns are validated by tests; a broken pattern is a
/// programming error, so it panics rather than degrading silently.
fn compiled(pattern: &'static str) -> Regex {
    {
        let cache = PATTERN_CACHE.read().unwrap();
        if let Some(re) = cache.get(pattern) {
            return re.clone();
        }
    }
    let re = Regex::new(pattern)
        .unwrap_or_else(|e| panic!("invalid profile pattern {:?}: {}", pattern, e));
    PATTERN_CACHE.write().unwrap().insert(pattern, re.clone());
    re
}

/// Extract a best-effort structure from raw text. Always succeeds.
pub fn extract(text: &str, language: &str) -> ParseResult {
    let profile = profile_for(language);
    let lines: Vec<&str> = text.lines().collect();
    let kinds = classify_lines(text, profile);

    let mut result = ParseResult::empty(language, Backend::Heuristic);
    let mut functions = Vec::new();
    let mut classes: Vec<ClassInfo> = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        if kinds.get(idx) != Some(&LineKind::Code) {
            continue;
        }
        let line_number = idx + 1;

        if let Some(mut func) = match_function(line, line_number, profile) {
            func.line_end = find_block_end(&lines, idx, profile)
                .unwrap_or(func.line_start);
            func.decorators = collect_decorators(&lines, idx, language);
            if profile.indent_based {
                func.docstring = find_docstring(&lines, idx, func.line_end);
            }
            func.complexity =
                span_complexity(&lines, &kinds, idx, func.line_end, profile);
            functions.push(func);
            continue;
        }

        if let Some(mut class) = match_class(line, line_number, profile) {
            class.line_end = find_block_end(&lines, idx, profile)
                .unwrap_or(class.line_start);
            if profile.indent_based {
                class.docstring = find_docstring(&lines, idx, class.line_end);
            }
            classes.push(class);
            continue;
        }

        for pattern in profile.import_patterns {
            if let Some(caps) = compiled(pattern).captures(line) {
                let raw_module = caps
                    .name("mod")
                    .map(|m| m.as_str().trim())
                    .unwrap_or_default();
                let names = caps
                    .name("names")
                    .map(|m| split_names(m.as_str()))
                    .unwrap_or_default();
                // `import a, b` declares one module per segment.
                for module in raw_module.split(',') {
                    let module = module.trim();
                    if !module.is_empty() {
                        result.imports.push(ImportInfo {
                            module: module.to_string(),
                            names: names.clone(),
                            line_number,
                        });
                    }
                }
                break;
            }
        }

        // Module scope only: skip indented assignments.
        if !line.starts_with(|c: char| c.is_whitespace()) {
            for pattern in profile.variable_patterns {
                if let Some(caps) = compiled(pattern).captures(line) {
                    let mut var =
                        VariableInfo::new(&caps["name"], line_number);
                    var.type_annotation = caps
                        .name("type")
                        .map(|m| m.as_str().trim().to_string());
                    result.variables.push(var);
                    break;
                }
            }
        }
    }

    attach_methods(&mut functions, &mut classes, &lines, profile);
    if profile.indent_based {
        collect_python_attributes(&mut classes, &lines);
    }

    result.functions = functions;
    result.classes = classes;
    result.complexity = file_complexity(&lines, &kinds, profile);
    result
}

/// Try every function pattern against a line.
fn match_function(
    line: &str,
    line_number: usize,
    profile: &LanguageProfile,
) -> Option<FunctionInfo> {
    for pattern in profile.function_patterns {
        if let Some(caps) = compiled(pattern).captures(line) {
            let mut func = FunctionInfo::new(&caps["name"], line_number);
            func.parameters = caps
                .name("params")
                .map(|m| clean_params(m.as_str(), profile.param_style))
                .unwrap_or_default();
            func.is_async = caps.name("async").is_some()
                || line.trim_start().starts_with("async ");
            func.is_method = caps.name("recv").is_some();
            func.return_type = caps
                .name("ret")
                .map(|m| m.as_str().trim().to_string())
                .filter(|s| !s.is_empty());
            return Some(func);
        }
    }
    None
}

fn match_class(
    line: &str,
    line_number: usize,
    profile: &LanguageProfile,
) -> Option<ClassInfo> {
    for pattern in profile.class_patterns {
        if let Some(caps) = compiled(pattern).captures(line) {
            let mut class = ClassInfo::new(&caps["name"], line_number);
            class.base_classes = caps
                .name("bases")
                .map(|m| split_names(m.as_str()))
                .unwrap_or_default();
            return Some(class);
        }
    }
    None
}

/// Locate the last line of the block starting at `start`. For brace
/// languages this balances `{`/`}` forward from the signature; for
/// indentation languages it runs to the last line indented deeper than the
/// signature. Returns None when no end can be determined, which callers
/// must record as `line_end == line_start` ("unknown end").
fn find_block_end(
    lines: &[&str],
    start: usize,
    profile: &LanguageProfile,
) -> Option<usize> {
    if profile.indent_based {
        let base = indent_width(lines[start]);
        let mut last = None;
        for (offset, line) in lines.iter().enumerate().skip(start + 1) {
            if line.trim().is_empty() {
                continue;
            }
            if indent_width(line) <= base {
                break;
            }
            last = Some(offset + 1);
        }
        return last;
    }

    let mut balance = 0i32;
    let mut started = false;
    for (offset, line) in lines.iter().enumerate().skip(start) {
        // Without an opening brace on the signature line or an Allman-style
        // brace directly below, treat the signature as a declaration.
        if !started && offset > start && !line.trim_start().starts_with('{') {
            return None;
        }
        for ch in line.chars() {
            match ch {
                '{' => {
                    balance += 1;
                    started = true;
                }
                '}' => {
                    balance -= 1;
                    if started && balance == 0 {
                        return Some(offset + 1);
                    }
                }
                _ => {}
            }
        }
    }
    None
}

fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

/// Gather decorator/attribute lines directly above a signature.
fn collect_decorators(lines: &[&str], sig_idx: usize, language: &str) -> Vec<String> {
    let mut decorators = Vec::new();
    let mut idx = sig_idx;
    while idx > 0 {
        idx -= 1;
        let trimmed = lines[idx].trim();
        if let Some(rest) = trimmed.strip_prefix('@') {
            decorators.push(rest.to_string());
        } else if language == "rust" {
            if let Some(rest) =
                trimmed.strip_prefix("#[").and_then(|r| r.strip_suffix(']'))
            {
                decorators.push(rest.to_string());
            } else {
                break;
            }
        } else {
            break;
        }
    }
    decorators.reverse();
    decorators
}

/// Pull a python-style docstring from the first statement of a block.
fn find_docstring(lines: &[&str], sig_idx: usize, end: usize) -> Option<String> {
    let mut idx = sig_idx + 1;
    while idx < end.min(lines.len()) {
        let trimmed = lines[idx].trim();
        if trimmed.is_empty() {
            idx += 1;
            continue;
        }
        for quote in ["\"\"\"", "'''"] {
            if let Some(rest) = trimmed.strip_prefix(quote) {
                let text = match rest.find(quote) {
                    Some(pos) => &rest[..pos],
                    None => rest,
                };
                let text = text.trim();
                if text.is_empty() {
                    return None;
                }
                return Some(text.to_string());
            }
        }
        return None;
    }
    None
}

/// Assign extracted functions to the class whose range contains them.
fn attach_methods(
    functions: &mut Vec<FunctionInfo>,
    classes: &mut [ClassInfo],
    lines: &[&str],
    profile: &LanguageProfile,
) {
    if classes.is_empty() {
        return;
    }
    let mut remaining = Vec::new();
    'outer: for mut func in functions.drain(..) {
        for class in classes.iter_mut() {
            let inside = func.line_start > class.line_start
                && func.line_start <= class.line_end;
            if inside {
                if profile.indent_based {
                    let class_indent = indent_width(lines[class.line_start - 1]);
                    let func_indent = indent_width(lines[func.line_start - 1]);
                    if func_indent <= class_indent {
                        continue;
                    }
                }
                func.is_method = true;
                class.methods.push(func);
                continue 'outer;
            }
        }
        remaining.push(func);
    }
    *functions = remaining;
}

/// Collect `self.<attr> = ...` assignment targets within python classes.
fn collect_python_attributes(classes: &mut [ClassInfo], lines: &[&str]) {
    let attr_re = compiled(r"self\.(?P<attr>\w+)\s*=[^=]");
    for class in classes.iter_mut() {
        let mut seen = std::collections::HashSet::new();
        let end = class.line_end.min(lines.len());
        for line in &lines[class.line_start..end] {
            for caps in attr_re.captures_iter(line) {
                let attr = caps["attr"].to_string();
                if seen.insert(attr.clone()) {
                    class.attributes.push(attr);
                }
            }
        }
    }
}

/// Count decision points on a single code line. Each keyword's
/// multiplicity is capped at 3 to keep minified or generated lines from
/// dominating the score.
fn line_decision_points(line: &str, profile: &LanguageProfile) -> u32 {
    let mut count = 0u32;
    for keyword in profile.decision_keywords {
        count += word_occurrences(line, keyword).min(3) as u32;
    }
    for op in profile.decision_operators {
        count += (line.matches(op).count()).min(3) as u32;
    }
    count
}

/// Occurrences of `word` bounded by non-identifier characters.
fn word_occurrences(line: &str, word: &str) -> usize {
    let bytes = line.as_bytes();
    let mut count = 0;
    for (pos, _) in line.match_indices(word) {
        let before_ok = pos == 0 || {
            let c = bytes[pos - 1] as char;
            !c.is_ascii_alphanumeric() && c != '_'
        };
        let after = pos + word.len();
        let after_ok = after >= bytes.len() || {
            let c = bytes[after] as char;
            !c.is_ascii_alphanumeric() && c != '_'
        };
        if before_ok && after_ok {
            count += 1;
        }
    }
    count
}

/// File-level cyclomatic complexity: 1 + decision points over code lines.
fn file_complexity(lines: &[&str], kinds: &[LineKind], profile: &LanguageProfile) -> u32 {
    let mut complexity = 1u32;
    for (idx, line) in lines.iter().enumerate() {
        if kinds.get(idx) == Some(&LineKind::Code) {
            complexity += line_decision_points(line, profile);
        }
    }
    complexity
}

/// Function-scoped cyclomatic complexity over `[start, end]` (0-based
/// start index, 1-based inclusive end line).
fn span_complexity(
    lines: &[&str],
    kinds: &[LineKind],
    start: usize,
    end: usize,
    profile: &LanguageProfile,
) -> u32 {
    let mut complexity = 1u32;
    let end = end.min(lines.len());
    for idx in start..end {
        if kinds.get(idx) == Some(&LineKind::Code) {
            complexity += line_decision_points(lines[idx], profile);
        }
    }
    complexity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_function_extraction() {
        let src = "def f(x):\n    if x:\n        return 1\n    return 0\n";
        let result = extract(src, "python");
        assert_eq!(result.functions.len(), 1);
        let f = &result.functions[0];
        assert_eq!(f.name, "f");
        assert_eq!(f.parameters, vec!["x"]);
        assert_eq!(f.line_start, 1);
        assert_eq!(f.line_end, 4);
        assert_eq!(f.complexity, 2);
        assert_eq!(result.complexity, 2);
    }

    #[test]
    fn test_python_class_with_methods() {
        let src = r#"class Parser(Base):
    """Parses things."""

    def __init__(self, path):
        self.path = path
        self.cache = {}

    async def run(self):
        return await self.step()

def standalone():
    pass
"#;
        let result = extract(src, "python");
        assert_eq!(result.classes.len(), 1);
        let class = &result.classes[0];
        assert_eq!(class.name, "Parser");
        assert_eq!(class.base_classes, vec!["Base"]);
        assert_eq!(class.docstring.as_deref(), Some("Parses things."));
        assert_eq!(class.methods.len(), 2);
        assert_eq!(class.methods[0].name, "__init__");
        assert_eq!(class.methods[0].parameters, vec!["path"]);
        assert!(class.methods[0].is_method);
        assert!(class.methods[1].is_async);
        assert_eq!(class.attributes, vec!["path", "cache"]);
        assert_eq!(result.functions.len(), 1);
        assert_eq!(result.functions[0].name, "standalone");
    }

    #[test]
    fn test_python_decorators_and_imports() {
        let src = "import os\nfrom typing import List, Optional\n\n@staticmethod\n@app.route('/x')\ndef handler():\n    pass\n";
        let result = extract(src, "python");
        assert_eq!(result.imports.len(), 2);
        assert_eq!(result.imports[0].module, "os");
        assert_eq!(result.imports[1].module, "typing");
        assert_eq!(result.imports[1].names, vec!["List", "Optional"]);
        assert_eq!(
            result.functions[0].decorators,
            vec!["staticmethod", "app.route('/x')"]
        );
    }

    #[test]
    fn test_rust_extraction() {
        let src = r#"use std::collections::HashMap;

const MAX_DEPTH: usize = 8;

#[derive(Debug)]
pub struct Scanner;

pub fn scan(input: &str, limit: usize) -> usize {
    if input.is_empty() || limit == 0 {
        return 0;
    }
    input.len()
}
"#;
        let result = extract(src, "rust");
        assert_eq!(result.imports.len(), 1);
        assert_eq!(result.imports[0].module, "std::collections::HashMap");
        assert_eq!(result.variables.len(), 1);
        assert!(result.variables[0].is_constant);
        assert_eq!(result.classes[0].name, "Scanner");
        let f = &result.functions[0];
        assert_eq!(f.name, "scan");
        assert_eq!(f.parameters, vec!["input", "limit"]);
        assert_eq!(f.return_type.as_deref(), Some("usize"));
        // 1 base + 1 if + 1 ||
        assert_eq!(f.complexity, 3);
    }

    #[test]
    fn test_go_method_receiver() {
        let src = "func (s *Server) Handle(req Request) error {\n\tif req.Valid() {\n\t\treturn nil\n\t}\n\treturn errInvalid\n}\n";
        let result = extract(src, "go");
        assert_eq!(result.functions.len(), 1);
        assert!(result.functions[0].is_method);
        assert_eq!(result.functions[0].parameters, vec!["req"]);
        assert_eq!(result.functions[0].line_end, 6);
    }

    #[test]
    fn test_unknown_language_still_counts() {
        let src = "function greet(name)\n  if name then print(name) end\nend\n";
        let result = extract(src, "unknown");
        assert_eq!(result.backend_used, Backend::Heuristic);
        assert_eq!(result.functions.len(), 1);
        assert_eq!(result.functions[0].name, "greet");
        assert!(result.complexity >= 2);
    }

    #[test]
    fn test_commented_signatures_ignored() {
        let src = "# def ghost():\n#     pass\ndef real():\n    pass\n";
        let result = extract(src, "python");
        assert_eq!(result.functions.len(), 1);
        assert_eq!(result.functions[0].name, "real");
    }

    #[test]
    fn test_keyword_cap_per_line() {
        let line = "if a: pass if b: pass if c: pass if d: pass if e: pass";
        let points = line_decision_points(line, profile_for("python"));
        assert_eq!(points, 3);
    }

    #[test]
    fn test_word_boundaries() {
        assert_eq!(word_occurrences("iffy if gift", "if"), 1);
        assert_eq!(word_occurrences("for formats", "for"), 1);
        assert_eq!(word_occurrences("end_if if_start", "if"), 0);
    }

    #[test]
    fn test_malformed_input_never_panics() {
        for garbage in ["def def def ((((", "{{{{{{", "\u{0000}\u{FFFD}", ")"] {
            let result = extract(garbage, "python");
            assert!(result.complexity >= 1);
        }
    }
}

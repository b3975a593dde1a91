//! Grammar extraction tier: generic tree-sitter extraction driven by a
//! per-language [`GrammarSpec`].
//!
//! One spec per language supplies the declaration/import queries and the
//! node-kind tables for decision counting; everything else here is
//! language-agnostic. A tree containing ERROR nodes still yields the
//! structure of its valid regions; the caller records the syntax error as
//! a diagnostic instead of discarding the partial result. The tree handle
//! never outlives this module's extraction call.

use std::collections::HashMap;

use anyhow::Context;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Parser, Query, QueryCursor};

use crate::result::{
    Backend, ClassInfo, FunctionInfo, ImportInfo, ParseResult, VariableInfo,
};

/// Configuration for one language's grammar-backed extraction.
///
/// Queries use fixed capture names: `@function`/`@method` + `@name` in
/// `function_query`, `@class` + `@name` in `class_query`, `@import` +
/// `@module` + `@iname` in `import_query`, `@variable` + `@name` +
/// optional `@type` in `variable_query`.
pub struct GrammarSpec {
    pub language_id: &'static str,
    pub language: fn() -> Language,
    pub function_query: &'static str,
    pub class_query: &'static str,
    pub import_query: &'static str,
    /// Empty when the language has no module-level variable extraction.
    pub variable_query: &'static str,
    /// Node kinds that each add one decision point.
    pub decision_kinds: &'static [&'static str],
    /// Operator token kinds that make a binary/boolean node a decision.
    pub boolean_operators: &'static [&'static str],
    /// Child kinds of a class node that hold its ancestry list.
    pub bases_kinds: &'static [&'static str],
    /// Whether the first body statement may be a doc string (python).
    pub has_docstrings: bool,
}

/// Parse with the language grammar and extract the unified structure.
///
/// Fails only when the grammar cannot load or produces no tree at all;
/// partial trees succeed with a diagnostic recorded in `parse_errors`.
pub fn extract(text: &str, spec: &GrammarSpec) -> anyhow::Result<ParseResult> {
    let language = (spec.language)();
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .with_context(|| format!("loading grammar for {}", spec.language_id))?;
    let tree = parser
        .parse(text, None)
        .with_context(|| format!("parsing {} source", spec.language_id))?;
    let root = tree.root_node();
    let source = text.as_bytes();

    let mut result = ParseResult::empty(spec.language_id, Backend::Grammar);
    if root.has_error() {
        result.parse_errors.push(format!(
            "{}: syntax errors present, extracted partial structure",
            spec.language_id
        ));
    }

    let mut functions = extract_functions(root, source, spec, &language)?;
    let mut classes = extract_classes(root, source, spec, &language)?;
    attach_methods(&mut functions, &mut classes);
    result.functions = functions;
    result.classes = classes;
    result.imports = extract_imports(root, source, spec, &language)?;
    result.variables = extract_variables(root, source, spec, &language)?;
    result.complexity = 1 + count_decisions(root, spec);
    Ok(result)
}

fn extract_functions(
    root: Node,
    source: &[u8],
    spec: &GrammarSpec,
    language: &Language,
) -> anyhow::Result<Vec<FunctionInfo>> {
    let query = Query::new(language, spec.function_query)
        .with_context(|| format!("{} function query", spec.language_id))?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, root, source);

    let mut functions = Vec::new();
    let mut seen = std::collections::HashSet::new();

    while let Some(m) = matches.next() {
        let mut name = String::new();
        let mut def_node = None;
        let mut is_method = false;

        for capture in m.captures {
            match query.capture_names()[capture.index as usize] {
                "name" => name = node_text(capture.node, source).to_string(),
                "function" => def_node = Some(capture.node),
                "method" => {
                    def_node = Some(capture.node);
                    is_method = true;
                }
                _ => {}
            }
        }

        let node = match def_node {
            Some(n) if !name.is_empty() => n,
            _ => continue,
        };
        if !seen.insert((node.start_byte(), name.clone())) {
            continue;
        }

        let mut func = FunctionInfo::new(&name, node.start_position().row + 1);
        func.line_end = node.end_position().row + 1;
        func.is_method = is_method;
        func.is_async = has_child_kind(node, "async", 2);
        func.parameters = extract_parameters(node, source);
        func.decorators = collect_decorators(node, source);
        func.return_type = extract_return_type(node, source);
        if spec.has_docstrings {
            func.docstring = extract_docstring(node, source);
        }
        func.complexity = 1 + count_decisions(node, spec);
        functions.push(func);
    }

    functions.sort_by_key(|f| (f.line_start, f.name.clone()));
    Ok(functions)
}

fn extract_classes(
    root: Node,
    source: &[u8],
    spec: &GrammarSpec,
    language: &Language,
) -> anyhow::Result<Vec<ClassInfo>> {
    let query = Query::new(language, spec.class_query)
        .with_context(|| format!("{} class query", spec.language_id))?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, root, source);

    let mut classes = Vec::new();
    let mut seen = std::collections::HashSet::new();

    while let Some(m) = matches.next() {
        let mut name = String::new();
        let mut def_node = None;

        for capture in m.captures {
            match query.capture_names()[capture.index as usize] {
                "name" => name = node_text(capture.node, source).to_string(),
                "class" => def_node = Some(capture.node),
                _ => {}
            }
        }

        let node = match def_node {
            Some(n) if !name.is_empty() => n,
            _ => continue,
        };
        if !seen.insert((node.start_byte(), name.clone())) {
            continue;
        }

        let mut class = ClassInfo::new(&name, node.start_position().row + 1);
        class.line_end = node.end_position().row + 1;
        class.base_classes = extract_bases(node, source, spec);
        if spec.has_docstrings {
            class.docstring = extract_docstring(node, source);
            class.attributes = instance_attributes(node, source);
        }
        classes.push(class);
    }

    classes.sort_by_key(|c| (c.line_start, c.name.clone()));
    Ok(classes)
}

/// Move functions whose range falls inside a class into that class.
/// This replaces per-language method queries: ancestry is the same test
/// in every grammar.
fn attach_methods(functions: &mut Vec<FunctionInfo>, classes: &mut [ClassInfo]) {
    if classes.is_empty() {
        return;
    }
    let mut remaining = Vec::new();
    'outer: for mut func in functions.drain(..) {
        // Innermost enclosing class wins.
        let mut best: Option<&mut ClassInfo> = None;
        for class in classes.iter_mut() {
            if func.line_start > class.line_start && func.line_end <= class.line_end
            {
                let tighter = match &best {
                    Some(b) => class.line_start > b.line_start,
                    None => true,
                };
                if tighter {
                    best = Some(class);
                }
            }
        }
        if let Some(class) = best {
            func.is_method = true;
            class.methods.push(func);
            continue 'outer;
        }
        remaining.push(func);
    }
    *functions = remaining;
}

fn extract_imports(
    root: Node,
    source: &[u8],
    spec: &GrammarSpec,
    language: &Language,
) -> anyhow::Result<Vec<ImportInfo>> {
    let query = Query::new(language, spec.import_query)
        .with_context(|| format!("{} import query", spec.language_id))?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, root, source);

    // Multiple matches share a statement when a query binds one imported
    // name at a time; group them back together.
    let mut grouped: Vec<((String, usize), Vec<String>)> = Vec::new();
    let mut index: HashMap<(String, usize), usize> = HashMap::new();

    while let Some(m) = matches.next() {
        let mut module = String::new();
        let mut import_node = None;
        let mut names = Vec::new();

        for capture in m.captures {
            match query.capture_names()[capture.index as usize] {
                "module" => {
                    module = trim_quotes(node_text(capture.node, source));
                }
                "import" => import_node = Some(capture.node),
                "iname" => {
                    names.push(node_text(capture.node, source).to_string())
                }
                _ => {}
            }
        }

        let node = match import_node {
            Some(n) => n,
            None => continue,
        };
        if module.is_empty() {
            // Statement-level capture only: strip the leading keyword.
            module = node_text(node, source)
                .split_whitespace()
                .nth(1)
                .unwrap_or_default()
                .trim_end_matches(';')
                .to_string();
        }
        if module.is_empty() {
            continue;
        }

        // `use a::{B, C}` style scoped lists split into prefix + names.
        if let Some(brace) = module.find('{') {
            let inner = module[brace..]
                .trim_start_matches('{')
                .trim_end_matches('}');
            names.extend(
                inner
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty()),
            );
            module = module[..brace]
                .trim_end_matches("::")
                .trim_end_matches('.')
                .to_string();
        }

        let line = node.start_position().row + 1;
        let key = (module, line);
        match index.get(&key) {
            Some(&i) => grouped[i].1.extend(names),
            None => {
                index.insert(key.clone(), grouped.len());
                grouped.push((key, names));
            }
        }
    }

    let mut imports: Vec<ImportInfo> = grouped
        .into_iter()
        .map(|((module, line_number), names)| ImportInfo {
            module,
            names,
            line_number,
        })
        .collect();
    imports.sort_by_key(|i| i.line_number);
    Ok(imports)
}

fn extract_variables(
    root: Node,
    source: &[u8],
    spec: &GrammarSpec,
    language: &Language,
) -> anyhow::Result<Vec<VariableInfo>> {
    if spec.variable_query.is_empty() {
        return Ok(Vec::new());
    }
    let query = Query::new(language, spec.variable_query)
        .with_context(|| format!("{} variable query", spec.language_id))?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, root, source);

    let mut variables: Vec<VariableInfo> = Vec::new();

    while let Some(m) = matches.next() {
        let mut name = String::new();
        let mut line = 0;
        let mut type_annotation = None;

        for capture in m.captures {
            match query.capture_names()[capture.index as usize] {
                "name" => {
                    name = node_text(capture.node, source).to_string();
                    line = capture.node.start_position().row + 1;
                }
                "type" => {
                    type_annotation =
                        Some(node_text(capture.node, source).to_string());
                }
                _ => {}
            }
        }

        if name.is_empty() {
            continue;
        }
        // Typed and untyped patterns may both match one assignment; keep a
        // single entry and prefer the one that carries the annotation.
        if let Some(existing) = variables
            .iter_mut()
            .find(|v| v.name == name && v.line_number == line)
        {
            if existing.type_annotation.is_none() {
                existing.type_annotation = type_annotation;
            }
            continue;
        }
        let mut var = VariableInfo::new(&name, line);
        var.type_annotation = type_annotation;
        variables.push(var);
    }

    variables.sort_by_key(|v| v.line_number);
    Ok(variables)
}

/// Walk a subtree counting decision-point nodes and short-circuit
/// operators per the spec tables.
fn count_decisions(node: Node, spec: &GrammarSpec) -> u32 {
    let mut count = 0;
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        let kind = current.kind();
        if spec.decision_kinds.contains(&kind) {
            count += 1;
        }
        if kind == "binary_expression" || kind == "boolean_operator" {
            for i in 0..current.child_count() {
                if let Some(child) = current.child(i) {
                    if spec.boolean_operators.contains(&child.kind()) {
                        count += 1;
                        break;
                    }
                }
            }
        }
        for i in 0..current.child_count() {
            if let Some(child) = current.child(i) {
                stack.push(child);
            }
        }
    }
    count
}

fn node_text<'a>(node: Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

fn trim_quotes(text: &str) -> String {
    text.trim_matches(|c| matches!(c, '"' | '\'' | '`' | '<' | '>'))
        .to_string()
}

/// Whether a child of the given kind exists within `depth` levels,
/// anonymous nodes included (keywords like `async` are anonymous).
fn has_child_kind(node: Node, kind: &str, depth: usize) -> bool {
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            if child.kind() == kind {
                return true;
            }
            if depth > 1 && has_child_kind(child, kind, depth - 1) {
                return true;
            }
        }
    }
    false
}

const PARAMS_KINDS: &[&str] = &[
    "parameters",
    "formal_parameters",
    "parameter_list",
    "function_value_parameters",
];
const PARAM_NAME_KINDS: &[&str] =
    &["identifier", "simple_identifier", "field_identifier"];
const RECEIVER_NAMES: &[&str] = &["self", "cls", "this"];

/// Parameter names: find the parameter-list node, then the first plain
/// identifier within each named child. Receivers are dropped. The
/// `parameters` field is checked before any kind-based search so that a
/// Go method's receiver list is never mistaken for its parameters.
fn extract_parameters(node: Node, source: &[u8]) -> Vec<String> {
    let params_node = node
        .child_by_field_name("parameters")
        .or_else(|| {
            node.child_by_field_name("declarator")
                .and_then(|d| d.child_by_field_name("parameters"))
        })
        .or_else(|| find_descendant(node, PARAMS_KINDS, 3));

    let mut names = Vec::new();
    match params_node {
        Some(params) => {
            let mut cursor = params.walk();
            for child in params.named_children(&mut cursor) {
                push_param_name(child, source, &mut names);
            }
        }
        None => {
            // Swift-style grammars attach `parameter` nodes directly.
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                if child.kind() == "parameter" {
                    push_param_name(child, source, &mut names);
                }
            }
        }
    }
    names
}

fn push_param_name(child: Node, source: &[u8], names: &mut Vec<String>) {
    if let Some(ident) = first_identifier(child) {
        let text = node_text(ident, source);
        if !text.is_empty() && !RECEIVER_NAMES.contains(&text) {
            names.push(text.to_string());
        }
    }
}

fn find_descendant<'a>(
    node: Node<'a>,
    kinds: &[&str],
    depth: usize,
) -> Option<Node<'a>> {
    for i in 0..node.child_count() {
        let child = node.child(i)?;
        if kinds.contains(&child.kind()) {
            return Some(child);
        }
        if depth > 1 {
            if let Some(found) = find_descendant(child, kinds, depth - 1) {
                return Some(found);
            }
        }
    }
    None
}

fn first_identifier(node: Node) -> Option<Node> {
    if PARAM_NAME_KINDS.contains(&node.kind()) {
        return Some(node);
    }
    for i in 0..node.named_child_count() {
        if let Some(found) = first_identifier(node.named_child(i)?) {
            return Some(found);
        }
    }
    None
}

const DECORATOR_KINDS: &[&str] =
    &["decorator", "attribute_item", "annotation", "marker_annotation"];

/// Decorators/attributes: a `decorated_definition` parent (python),
/// preceding siblings (rust), or a `modifiers` child (java).
fn collect_decorators(node: Node, source: &[u8]) -> Vec<String> {
    let mut decorators = Vec::new();

    if let Some(parent) = node.parent() {
        if parent.kind() == "decorated_definition" {
            let mut cursor = parent.walk();
            for child in parent.named_children(&mut cursor) {
                if child.kind() == "decorator" {
                    decorators.push(clean_decorator(node_text(child, source)));
                }
            }
        }
    }

    let mut prev = node.prev_named_sibling();
    let mut preceding = Vec::new();
    while let Some(p) = prev {
        if DECORATOR_KINDS.contains(&p.kind()) {
            preceding.push(clean_decorator(node_text(p, source)));
            prev = p.prev_named_sibling();
        } else {
            break;
        }
    }
    preceding.reverse();
    decorators.extend(preceding);

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "modifiers" {
            let mut inner = child.walk();
            for m in child.named_children(&mut inner) {
                if DECORATOR_KINDS.contains(&m.kind()) {
                    decorators.push(clean_decorator(node_text(m, source)));
                }
            }
        }
    }

    decorators
}

fn clean_decorator(text: &str) -> String {
    text.trim()
        .trim_start_matches('@')
        .trim_start_matches("#[")
        .trim_end_matches(']')
        .to_string()
}

const RETURN_TYPE_FIELDS: &[&str] = &["return_type", "type", "result"];

fn extract_return_type(node: Node, source: &[u8]) -> Option<String> {
    for field in RETURN_TYPE_FIELDS {
        if let Some(ty) = node.child_by_field_name(field) {
            let text = node_text(ty, source)
                .trim_start_matches(':')
                .trim_start_matches("->")
                .trim();
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }
    None
}

/// First statement of the body, when it is a bare string (python).
fn extract_docstring(node: Node, source: &[u8]) -> Option<String> {
    let body = node.child_by_field_name("body")?;
    let first = body.named_child(0)?;
    if first.kind() != "expression_statement" {
        return None;
    }
    let string_node = first.named_child(0)?;
    if string_node.kind() != "string" {
        return None;
    }
    let raw = node_text(string_node, source);
    let cleaned = raw
        .trim_matches(|c| matches!(c, '"' | '\''))
        .trim()
        .to_string();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Ordered `self.<attr> = ...` assignment targets within a class body.
fn instance_attributes(node: Node, source: &[u8]) -> Vec<String> {
    let text = node_text(node, source);
    let mut attrs = Vec::new();
    let mut seen = std::collections::HashSet::new();
    for (pos, _) in text.match_indices("self.") {
        let rest = &text[pos + 5..];
        let ident: String = rest
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect();
        if ident.is_empty() {
            continue;
        }
        let after = rest[ident.len()..].trim_start();
        if after.starts_with('=')
            && !after.starts_with("==")
            && seen.insert(ident.clone())
        {
            attrs.push(ident);
        }
    }
    attrs
}

fn extract_bases(node: Node, source: &[u8], spec: &GrammarSpec) -> Vec<String> {
    let mut bases = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if !spec.bases_kinds.contains(&child.kind()) {
            continue;
        }
        collect_base_names(child, source, &mut bases);
    }
    bases
}

fn collect_base_names(node: Node, source: &[u8], out: &mut Vec<String>) {
    let kind = node.kind();
    if kind.ends_with("identifier") || kind == "dotted_name" || kind == "attribute"
    {
        let text = node_text(node, source);
        if !text.is_empty() && !out.iter().any(|b| b == text) {
            out.push(text.to_string());
        }
        return;
    }
    for i in 0..node.named_child_count() {
        if let Some(child) = node.named_child(i) {
            collect_base_names(child, source, out);
        }
    }
}

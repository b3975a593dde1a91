//! Native extraction tier: the host language parsed with its own
//! first-party front-end.
//!
//! Only Rust source qualifies (the self-hosting case). `syn` gives exact
//! structure where tree-sitter gives a concrete syntax tree, so this tier
//! slots between the grammar and heuristic tiers in fidelity when no
//! grammar is loaded. Parse failures are returned to the caller, which
//! degrades to the heuristic tier.

use anyhow::Context;
use syn::visit::{self, Visit};
use syn::{BinOp, Expr, FnArg, ImplItem, Item, Pat, ReturnType};

use crate::result::{
    Backend, ClassInfo, FunctionInfo, ImportInfo, ParseResult, VariableInfo,
};

/// Parse Rust source with `syn` and extract the unified structure.
pub fn extract(text: &str) -> anyhow::Result<ParseResult> {
    let ast = syn::parse_file(text).context("syn parse failed")?;
    let lines: Vec<&str> = text.lines().collect();

    let mut result = ParseResult::empty("rust", Backend::Native);
    collect_items(&ast.items, &lines, &mut result);
    result.complexity = file_complexity(&ast);
    Ok(result)
}

fn collect_items(items: &[Item], lines: &[&str], result: &mut ParseResult) {
    for item in items {
        match item {
            Item::Fn(func) => {
                result.functions.push(function_info(
                    &func.sig,
                    &func.attrs,
                    &func.block,
                    lines,
                    false,
                ));
            }
            Item::Struct(s) => {
                let mut class =
                    ClassInfo::new(s.ident.to_string(), span_line(s.ident.span()));
                class.line_end = match &s.fields {
                    syn::Fields::Named(f) => {
                        span_end_line(f.brace_token.span.close())
                    }
                    _ => class.line_start,
                };
                class.attributes = s
                    .fields
                    .iter()
                    .filter_map(|f| f.ident.as_ref().map(|i| i.to_string()))
                    .collect();
                class.docstring = doc_comment(&s.attrs);
                result.classes.push(class);
            }
            Item::Enum(e) => {
                let mut class =
                    ClassInfo::new(e.ident.to_string(), span_line(e.ident.span()));
                class.line_end = span_end_line(e.brace_token.span.close());
                class.attributes =
                    e.variants.iter().map(|v| v.ident.to_string()).collect();
                class.docstring = doc_comment(&e.attrs);
                result.classes.push(class);
            }
            Item::Trait(t) => {
                let mut class =
                    ClassInfo::new(t.ident.to_string(), span_line(t.ident.span()));
                class.line_end = span_end_line(t.brace_token.span.close());
                class.base_classes = t
                    .supertraits
                    .iter()
                    .filter_map(|b| match b {
                        syn::TypeParamBound::Trait(tb) => {
                            Some(path_string(&tb.path))
                        }
                        _ => None,
                    })
                    .collect();
                class.docstring = doc_comment(&t.attrs);
                result.classes.push(class);
            }
            Item::Impl(imp) => {
                let target = impl_target(imp);
                let class_idx = target.as_deref().and_then(|t| {
                    result.classes.iter().position(|c| c.name == t)
                });
                for impl_item in &imp.items {
                    if let ImplItem::Fn(method) = impl_item {
                        let info = function_info(
                            &method.sig,
                            &method.attrs,
                            &method.block,
                            lines,
                            true,
                        );
                        match class_idx {
                            Some(i) => result.classes[i].methods.push(info),
                            None => result.functions.push(info),
                        }
                    }
                }
            }
            Item::Use(u) => {
                let mut prefix = Vec::new();
                let mut imports = Vec::new();
                flatten_use_tree(
                    &u.tree,
                    &mut prefix,
                    span_line(u.use_token.span),
                    &mut imports,
                );
                result.imports.extend(imports);
            }
            Item::Const(c) => {
                let line = span_line(c.ident.span());
                let mut var = VariableInfo::new(c.ident.to_string(), line);
                var.type_annotation = annotation_from_line(lines, line);
                result.variables.push(var);
            }
            Item::Static(s) => {
                let line = span_line(s.ident.span());
                let mut var = VariableInfo::new(s.ident.to_string(), line);
                var.type_annotation = annotation_from_line(lines, line);
                result.variables.push(var);
            }
            Item::Mod(m) => {
                if let Some((_, items)) = &m.content {
                    collect_items(items, lines, result);
                }
            }
            _ => {}
        }
    }
}

fn function_info(
    sig: &syn::Signature,
    attrs: &[syn::Attribute],
    block: &syn::Block,
    lines: &[&str],
    is_method: bool,
) -> FunctionInfo {
    let line_start = span_line(sig.fn_token.span);
    let mut func = FunctionInfo::new(sig.ident.to_string(), line_start);
    func.line_end = span_end_line(block.brace_token.span.close());
    func.is_async = sig.asyncness.is_some();
    func.is_method = is_method;
    func.parameters = sig
        .inputs
        .iter()
        .filter_map(|arg| match arg {
            FnArg::Receiver(_) => None,
            FnArg::Typed(pat) => match &*pat.pat {
                Pat::Ident(ident) => Some(ident.ident.to_string()),
                _ => None,
            },
        })
        .collect();
    func.decorators = attrs
        .iter()
        .filter(|a| !a.path().is_ident("doc"))
        .map(|a| path_string(a.path()))
        .collect();
    func.docstring = doc_comment(attrs);
    if matches!(sig.output, ReturnType::Type(..)) {
        func.return_type = return_type_from_source(
            lines,
            line_start,
            span_line(block.brace_token.span.open()),
        );
    }
    func.complexity = block_complexity(block);
    func
}

/// The simple name of an impl's self type, when it is a plain path.
fn impl_target(imp: &syn::ItemImpl) -> Option<String> {
    match &*imp.self_ty {
        syn::Type::Path(p) => {
            p.path.segments.last().map(|s| s.ident.to_string())
        }
        _ => None,
    }
}

fn path_string(path: &syn::Path) -> String {
    path.segments
        .iter()
        .map(|s| s.ident.to_string())
        .collect::<Vec<_>>()
        .join("::")
}

/// Collect `#[doc = "..."]` lines into one docstring.
fn doc_comment(attrs: &[syn::Attribute]) -> Option<String> {
    let mut parts = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("doc") {
            continue;
        }
        if let syn::Meta::NameValue(nv) = &attr.meta {
            if let Expr::Lit(lit) = &nv.value {
                if let syn::Lit::Str(s) = &lit.lit {
                    parts.push(s.value().trim().to_string());
                }
            }
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n"))
    }
}

/// Flatten a use tree into (module, names) entries, one per leaf group.
fn flatten_use_tree(
    tree: &syn::UseTree,
    prefix: &mut Vec<String>,
    line: usize,
    out: &mut Vec<ImportInfo>,
) {
    match tree {
        syn::UseTree::Path(p) => {
            prefix.push(p.ident.to_string());
            flatten_use_tree(&p.tree, prefix, line, out);
            prefix.pop();
        }
        syn::UseTree::Name(n) => {
            let mut segments = prefix.clone();
            segments.push(n.ident.to_string());
            out.push(ImportInfo {
                module: segments.join("::"),
                names: Vec::new(),
                line_number: line,
            });
        }
        syn::UseTree::Rename(r) => {
            let mut segments = prefix.clone();
            segments.push(r.ident.to_string());
            out.push(ImportInfo {
                module: segments.join("::"),
                names: vec![r.rename.to_string()],
                line_number: line,
            });
        }
        syn::UseTree::Glob(_) => {
            out.push(ImportInfo {
                module: prefix.join("::"),
                names: vec!["*".to_string()],
                line_number: line,
            });
        }
        syn::UseTree::Group(g) => {
            let mut names = Vec::new();
            let mut nested = Vec::new();
            for item in &g.items {
                match item {
                    syn::UseTree::Name(n) => names.push(n.ident.to_string()),
                    other => flatten_use_tree(other, prefix, line, &mut nested),
                }
            }
            if !names.is_empty() {
                out.push(ImportInfo {
                    module: prefix.join("::"),
                    names,
                    line_number: line,
                });
            }
            out.extend(nested);
        }
    }
}

fn span_line(span: proc_macro2::Span) -> usize {
    span.start().line.max(1)
}

fn span_end_line(span: proc_macro2::Span) -> usize {
    span.end().line.max(1)
}

/// Recover the written return type from the signature's source lines.
/// `syn` types do not stringify without the quote machinery, and the
/// signature text is already at hand.
fn return_type_from_source(
    lines: &[&str],
    sig_line: usize,
    body_line: usize,
) -> Option<String> {
    let start = sig_line.saturating_sub(1);
    let end = body_line.min(lines.len());
    let sig_text = lines.get(start..end)?.join(" ");
    let after = sig_text.split("->").nth(1)?;
    let ty = after.split('{').next()?.split("where").next()?.trim();
    if ty.is_empty() {
        None
    } else {
        Some(ty.to_string())
    }
}

fn annotation_from_line(lines: &[&str], line: usize) -> Option<String> {
    let text = lines.get(line.saturating_sub(1))?;
    let after_colon = text.split_once(':')?.1;
    let ty = after_colon.split('=').next()?.trim();
    if ty.is_empty() {
        None
    } else {
        Some(ty.to_string())
    }
}

/// Counts decision points the same way the grammar tier counts node kinds:
/// branches, loops, match arms, and short-circuit operators.
struct DecisionCounter {
    count: u32,
}

impl<'ast> Visit<'ast> for DecisionCounter {
    fn visit_expr_if(&mut self, node: &'ast syn::ExprIf) {
        self.count += 1;
        visit::visit_expr_if(self, node);
    }

    fn visit_expr_for_loop(&mut self, node: &'ast syn::ExprForLoop) {
        self.count += 1;
        visit::visit_expr_for_loop(self, node);
    }

    fn visit_expr_while(&mut self, node: &'ast syn::ExprWhile) {
        self.count += 1;
        visit::visit_expr_while(self, node);
    }

    fn visit_expr_loop(&mut self, node: &'ast syn::ExprLoop) {
        self.count += 1;
        visit::visit_expr_loop(self, node);
    }

    fn visit_arm(&mut self, node: &'ast syn::Arm) {
        self.count += 1;
        visit::visit_arm(self, node);
    }

    fn visit_expr_binary(&mut self, node: &'ast syn::ExprBinary) {
        if matches!(node.op, BinOp::And(_) | BinOp::Or(_)) {
            self.count += 1;
        }
        visit::visit_expr_binary(self, node);
    }
}

fn block_complexity(block: &syn::Block) -> u32 {
    let mut counter = DecisionCounter { count: 0 };
    counter.visit_block(block);
    1 + counter.count
}

fn file_complexity(ast: &syn::File) -> u32 {
    let mut counter = DecisionCounter { count: 0 };
    counter.visit_file(ast);
    1 + counter.count
}

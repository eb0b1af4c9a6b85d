//! Wrap the bodies of async functions in `try`/`catch`.
//!
//! ```js
//! async function fetchData() {
//!   try {
//!     const data = await fetch("/api/data");
//!     return data;
//!   } catch (err) {
//!     console.error(err);
//!   }
//! }
//! ```
//!
//! A body that is empty, or that is already a single `try` statement, is left
//! alone, so running the transform twice changes nothing the second time.
//! Nested async functions are handled one nesting level per pass: the outer
//! bodies are wrapped first, then the file is parsed again.

use std::collections::HashSet;
use std::ops::Range;

use tree_sitter::Node;

use super::Transform;
use crate::config::TransformOptions;
use crate::error::CodemodResult;
use crate::syntax::{is_comment, Edits, FileInfo, SourceParser, SourceTree};

const FUNCTION_KINDS: &[&str] = &[
    "function_declaration",
    "function_expression",
    "generator_function_declaration",
    "generator_function",
    "arrow_function",
    "method_definition",
];

const DEFAULT_INDENT_UNIT: &str = "  ";

#[derive(Debug, Clone, Copy, Default)]
pub struct AddAsyncErrorHandling;

impl Transform for AddAsyncErrorHandling {
    fn name(&self) -> &'static str {
        "add-async-error-handling"
    }

    fn description(&self) -> &'static str {
        "Wrap async function bodies in try/catch"
    }

    fn transform(
        &self,
        file: &FileInfo,
        parser: &mut SourceParser,
        _options: &TransformOptions,
    ) -> CodemodResult<String> {
        let mut current = file.clone();
        let mut wrapped = 0;

        loop {
            let tree = parser.parse(&current)?;
            let bodies = outermost_unwrapped_bodies(&tree);
            if bodies.is_empty() {
                break;
            }

            let mut edits = Edits::new();
            for body in &bodies {
                edits.replace(*body, wrap_body(&tree, *body));
            }
            wrapped += bodies.len();
            current = FileInfo::new(file.path.clone(), tree.print(&edits)?);
        }

        if wrapped > 0 {
            log::info!(
                "{}: wrapped {} async function body(ies)",
                file.path.display(),
                wrapped
            );
        }
        Ok(current.source)
    }
}

/// Bodies still needing a `try`, skipping those nested inside another one.
fn outermost_unwrapped_bodies(tree: &SourceTree) -> Vec<Node<'_>> {
    let bodies: Vec<Node<'_>> = tree
        .find_where(is_async_function)
        .into_iter()
        .filter_map(|function| function.child_by_field_name("body"))
        .filter(|body| body.kind() == "statement_block" && needs_wrapping(*body))
        .collect();
    let ids: HashSet<usize> = bodies.iter().map(|b| b.id()).collect();

    bodies
        .into_iter()
        .filter(|body| {
            let mut current = body.parent();
            while let Some(node) = current {
                if ids.contains(&node.id()) {
                    return false;
                }
                current = node.parent();
            }
            true
        })
        .collect()
}

fn is_async_function(node: Node<'_>) -> bool {
    if !FUNCTION_KINDS.contains(&node.kind()) {
        return false;
    }
    let mut cursor = node.walk();
    let is_async = node
        .children(&mut cursor)
        .take_while(|child| child.kind() != "statement_block")
        .any(|child| child.kind() == "async");
    is_async
}

fn needs_wrapping(body: Node<'_>) -> bool {
    let mut cursor = body.walk();
    let statements: Vec<Node<'_>> = body
        .named_children(&mut cursor)
        .filter(|n| !is_comment(n))
        .collect();

    match statements.as_slice() {
        [] => false,
        [only] => only.kind() != "try_statement",
        _ => true,
    }
}

/// Render the replacement for a `statement_block`.
fn wrap_body(tree: &SourceTree, body: Node<'_>) -> String {
    let source = tree.source();

    let mut cursor = body.walk();
    let children: Vec<Node<'_>> = body.named_children(&mut cursor).collect();
    let (Some(first), Some(last)) = (children.first(), children.last()) else {
        return tree.text(body).to_string();
    };

    let base = closing_indent(source, body);
    let inner = match own_line_indent(source, first.start_byte()) {
        Some(indent) if indent.len() > base.len() => indent,
        _ => format!("{base}{DEFAULT_INDENT_UNIT}"),
    };
    let unit = inner
        .strip_prefix(base.as_str())
        .filter(|u| !u.is_empty())
        .unwrap_or(DEFAULT_INDENT_UNIT)
        .to_string();

    let templates = template_ranges(body);
    let statements = indent_following_lines(
        source,
        first.start_byte()..last.end_byte(),
        &unit,
        &templates,
    );

    format!(
        "{{\n{inner}try {{\n{inner}{unit}{statements}\n{inner}}} catch (err) {{\n{inner}{unit}console.error(err);\n{inner}}}\n{base}}}"
    )
}

/// Indentation of the wrapped body's closing brace.
///
/// Normally the indentation of the line the body opens on. A method or
/// object property written mid-line (`{ async m() { ... } }`) closes under
/// its own first column instead, since the enclosing object closes on the
/// same line.
fn closing_indent(source: &str, body: Node<'_>) -> String {
    let indent = line_indent(source, body.start_byte());
    let anchor = body.parent().and_then(|function| match function.parent() {
        Some(pair) if pair.kind() == "pair" => Some(pair),
        _ if function.kind() == "method_definition" => Some(function),
        _ => None,
    });
    let Some(anchor) = anchor else {
        return indent;
    };
    if own_line_indent(source, anchor.start_byte()).is_some() {
        return indent;
    }

    let line_start = source[..anchor.start_byte()].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = source[line_start..anchor.start_byte()].chars().count();
    let padding = " ".repeat(column.saturating_sub(indent.chars().count()));
    format!("{indent}{padding}")
}

/// Leading whitespace of the line containing `at`.
fn line_indent(source: &str, at: usize) -> String {
    let line_start = source[..at].rfind('\n').map(|i| i + 1).unwrap_or(0);
    source[line_start..]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect()
}

/// Indentation before `at` if nothing else precedes it on its line.
fn own_line_indent(source: &str, at: usize) -> Option<String> {
    let line_start = source[..at].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let prefix = &source[line_start..at];
    prefix
        .chars()
        .all(|c| c == ' ' || c == '\t')
        .then(|| prefix.to_string())
}

/// Byte ranges of template strings, whose line contents must not change.
fn template_ranges(body: Node<'_>) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut stack = vec![body];
    while let Some(node) = stack.pop() {
        if node.kind() == "template_string" {
            ranges.push(node.byte_range());
            continue;
        }
        let mut cursor = node.walk();
        stack.extend(node.children(&mut cursor));
    }
    ranges
}

/// Copy `range`, adding `unit` in front of every non-blank line after the
/// first one unless that line starts inside a template string.
fn indent_following_lines(
    source: &str,
    range: Range<usize>,
    unit: &str,
    templates: &[Range<usize>],
) -> String {
    let mut output = String::with_capacity(range.len() + unit.len() * 8);
    let mut offset = range.start;

    for (index, line) in source[range.clone()].split('\n').enumerate() {
        if index > 0 {
            output.push('\n');
            let in_template = templates
                .iter()
                .any(|t| t.start < offset && offset < t.end);
            if !line.trim().is_empty() && !in_template {
                output.push_str(unit);
            }
        }
        output.push_str(line);
        offset += line.len() + 1;
    }

    output
}

//! Strip `console.log(...)` calls.
//!
//! Which `console` methods count is configured through
//! [`TransformOptions::console_methods`]. How a call disappears depends on
//! where it sits:
//!
//! - the whole expression of a statement in a block: the statement is removed
//! - the body of an unbraced `if`/loop: the statement becomes `{}`
//! - the concise body of an arrow function: the call becomes `{}`
//! - anywhere else its value could be observed: the call becomes `void 0`

use std::collections::HashSet;

use tree_sitter::Node;

use super::Transform;
use crate::config::TransformOptions;
use crate::error::CodemodResult;
use crate::syntax::{is_field_of_parent, Edits, FileInfo, SourceParser, SourceTree};

/// Parents in which a statement can be dropped without changing the meaning
/// of its neighbours.
const STATEMENT_LIST_KINDS: &[&str] = &[
    "program",
    "statement_block",
    "switch_case",
    "switch_default",
    "class_static_block",
];

/// The remove-console-log transform.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveConsoleLog;

impl Transform for RemoveConsoleLog {
    fn name(&self) -> &'static str {
        "remove-console-log"
    }

    fn description(&self) -> &'static str {
        "Remove console.log calls"
    }

    fn transform(
        &self,
        file: &FileInfo,
        parser: &mut SourceParser,
        options: &TransformOptions,
    ) -> CodemodResult<String> {
        let tree = parser.parse(file)?;
        let calls = find_console_calls(&tree, options);
        if calls.is_empty() {
            return Ok(file.source.clone());
        }

        let mut edits = Edits::new();
        for call in &calls {
            remove_call(&tree, *call, &mut edits);
        }

        log::info!(
            "{}: removed {} console call(s)",
            file.path.display(),
            calls.len()
        );
        tree.print(&edits)
    }
}

/// Matching calls, excluding calls nested in another matching call.
fn find_console_calls<'t>(tree: &'t SourceTree, options: &TransformOptions) -> Vec<Node<'t>> {
    let calls = tree.find_where(|node| is_console_call(tree, node, options));
    let ids: HashSet<usize> = calls.iter().map(|c| c.id()).collect();

    calls
        .into_iter()
        .filter(|call| {
            let mut current = call.parent();
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

/// `console.<method>(...)` where the method is configured for removal.
fn is_console_call(tree: &SourceTree, node: Node<'_>, options: &TransformOptions) -> bool {
    if node.kind() != "call_expression" {
        return false;
    }
    let Some(callee) = node
        .child_by_field_name("function")
        .filter(|f| f.kind() == "member_expression")
    else {
        return false;
    };

    let object = callee.child_by_field_name("object");
    let property = callee.child_by_field_name("property");
    match (object, property) {
        (Some(object), Some(property)) => {
            object.kind() == "identifier"
                && tree.text(object) == "console"
                && options.strips_console_method(tree.text(property))
        }
        _ => false,
    }
}

fn remove_call(tree: &SourceTree, call: Node<'_>, edits: &mut Edits) {
    let Some(parent) = call.parent() else {
        return;
    };

    match parent.kind() {
        "expression_statement" => {
            let in_statement_list = parent
                .parent()
                .is_some_and(|p| STATEMENT_LIST_KINDS.contains(&p.kind()));
            if in_statement_list {
                edits.remove_statement(tree, parent);
            } else {
                edits.replace(parent, "{}");
            }
        }
        "arrow_function" if is_field_of_parent(call, "body") => edits.replace(call, "{}"),
        _ => edits.replace(call, "void 0"),
    }
}

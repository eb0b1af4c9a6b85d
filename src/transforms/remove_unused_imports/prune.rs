//! Removing dead bindings from import statements.

use std::collections::HashSet;
use std::ops::Range;

use tree_sitter::Node;

use super::bindings::{ImportBinding, ImportDeclaration};
use crate::syntax::{is_comment, Edits, SourceTree};

/// What the pruner did to one import statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneOutcome {
    /// Every binding is live (or exempt); the statement is unchanged.
    Untouched,
    /// Some bindings were dropped; the import clause was rewritten.
    Rewritten,
    /// No binding survived; the statement was removed.
    Removed,
}

/// Remove `dead` bindings from `declaration`, deleting the whole statement
/// when nothing survives.
pub fn prune_declaration(
    tree: &SourceTree,
    declaration: &ImportDeclaration<'_>,
    dead: &[ImportBinding<'_>],
    edits: &mut Edits,
) -> PruneOutcome {
    let Some(clause) = declaration.clause else {
        return PruneOutcome::Untouched;
    };
    if dead.is_empty() {
        return PruneOutcome::Untouched;
    }

    let dead_ids: HashSet<usize> = dead.iter().map(|b| b.specifier.id()).collect();

    match render_clause(tree, clause, &dead_ids) {
        Some(text) => {
            edits.replace(clause, text);
            PruneOutcome::Rewritten
        }
        None => {
            edits.remove_statement(tree, declaration.statement);
            PruneOutcome::Removed
        }
    }
}

/// Re-render an import clause without the dead specifiers.
///
/// Surviving elements keep their original text. Returns `None` when no
/// element survives.
fn render_clause(tree: &SourceTree, clause: Node<'_>, dead: &HashSet<usize>) -> Option<String> {
    let mut parts = Vec::new();
    let mut cursor = clause.walk();

    for child in clause.named_children(&mut cursor) {
        match child.kind() {
            "identifier" | "namespace_import" => {
                if !dead.contains(&child.id()) {
                    parts.push(tree.text(child).to_string());
                }
            }
            "named_imports" => {
                if let Some(named) = render_named_imports(tree, child, dead) {
                    parts.push(named);
                }
            }
            _ => {}
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// Re-render `{ ... }` keeping only live specifiers.
///
/// The list is cut from the original text: each specifier owns the span from
/// its first token (comment lines above it included) to the first token of
/// the next one, so surviving specifiers keep their commas, comments and
/// layout. Returns `None` when no specifier survives.
fn render_named_imports(tree: &SourceTree, node: Node<'_>, dead: &HashSet<usize>) -> Option<String> {
    let source = tree.source();
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    let positions: Vec<usize> = children
        .iter()
        .enumerate()
        .filter(|(_, n)| n.kind() == "import_specifier")
        .map(|(i, _)| i)
        .collect();

    let survivors: Vec<usize> = positions
        .iter()
        .copied()
        .filter(|&i| !dead.contains(&children[i].id()))
        .collect();
    if survivors.is_empty() {
        return None;
    }
    if survivors.len() == positions.len() {
        return Some(tree.text(node).to_string());
    }

    let starts: Vec<usize> = positions
        .iter()
        .map(|&i| specifier_start(source, &children, i))
        .collect();

    let last = *positions.last()?;
    let last_comma = comma_after(&children, last);
    let mut tail_start = last_comma.map_or(children[last].end_byte(), |c| children[c].end_byte());
    if let Some(comment) = children
        .get(last_comma.unwrap_or(last) + 1)
        .filter(|n| is_comment(n) && n.start_position().row == children[last].end_position().row)
    {
        tail_start = comment.end_byte();
    }
    let trailing_comma = last_comma.is_some();

    let region = |index: usize| -> Range<usize> {
        let end = starts.get(index + 1).copied().unwrap_or(tail_start);
        starts[index]..end
    };

    let mut rendered = String::from(&source[node.start_byte()..starts[0]]);
    for (n, &child) in survivors.iter().enumerate() {
        let index = positions.iter().position(|&p| p == child)?;
        let span = region(index);
        let is_new_last = n + 1 == survivors.len() && child != last;
        if !is_new_last {
            rendered.push_str(&source[span]);
            continue;
        }

        // This specifier now closes the list: drop its separator whitespace
        // and, unless the list used a trailing comma, its comma.
        let text = source[span.clone()].trim_end();
        match comma_after(&children, child).filter(|_| !trailing_comma) {
            Some(comma) => {
                let comma = children[comma].byte_range();
                let comma = comma.start - span.start..comma.end - span.start;
                rendered.push_str(&text[..comma.start]);
                rendered.push_str(&text[comma.end..]);
            }
            None => rendered.push_str(text),
        }
    }
    rendered.push_str(&source[tail_start..node.end_byte()]);

    Some(rendered)
}

/// Index of the `,` token directly after the child at `index`.
fn comma_after(children: &[Node<'_>], index: usize) -> Option<usize> {
    children
        .get(index + 1)
        .filter(|n| n.kind() == ",")
        .map(|_| index + 1)
}

/// Where the span owned by the specifier at `index` begins.
///
/// Comments on their own lines directly above the specifier belong to it. A
/// specifier or comment that starts its line owns the line's indentation.
fn specifier_start(source: &str, children: &[Node<'_>], index: usize) -> usize {
    let mut head = index;
    while head >= 2
        && is_comment(&children[head - 1])
        && children[head - 1].start_position().row != children[head - 2].end_position().row
    {
        head -= 1;
    }

    let at = children[head].start_byte();
    let line_start = source[..at].rfind('\n').map(|i| i + 1).unwrap_or(0);
    if source[line_start..at].chars().all(|c| c == ' ' || c == '\t') {
        line_start
    } else {
        at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{FileInfo, SourceParser};
    use crate::transforms::remove_unused_imports::bindings::import_declarations;

    /// Prune the bindings named in `dead` from every import of `source`.
    fn prune(source: &str, dead: &[&str]) -> (String, Vec<PruneOutcome>) {
        let mut parser = SourceParser::new().unwrap();
        let tree = parser.parse(&FileInfo::new("a.ts", source)).unwrap();
        let mut edits = Edits::new();
        let mut outcomes = Vec::new();
        for declaration in import_declarations(&tree) {
            let dead_bindings: Vec<_> = declaration
                .bindings
                .iter()
                .filter(|b| dead.contains(&b.local))
                .copied()
                .collect();
            outcomes.push(prune_declaration(&tree, &declaration, &dead_bindings, &mut edits));
        }
        (tree.print(&edits).unwrap(), outcomes)
    }

    #[test]
    fn test_remove_one_named_specifier() {
        let (output, outcomes) = prune("import { A, B } from \"m\";\nA();\n", &["B"]);
        assert_eq!(output, "import { A } from \"m\";\nA();\n");
        assert_eq!(outcomes, vec![PruneOutcome::Rewritten]);
    }

    #[test]
    fn test_remove_all_specifiers_removes_statement() {
        let (output, outcomes) = prune("import { A, B } from \"m\";\nfoo();\n", &["A", "B"]);
        assert_eq!(output, "foo();\n");
        assert_eq!(outcomes, vec![PruneOutcome::Removed]);
    }

    #[test]
    fn test_remove_default_keeps_named() {
        let (output, _) = prune("import React, { useState } from 'react';\n", &["React"]);
        assert_eq!(output, "import { useState } from 'react';\n");
    }

    #[test]
    fn test_remove_named_keeps_default() {
        let (output, _) = prune("import React, { useState } from 'react';\n", &["useState"]);
        assert_eq!(output, "import React from 'react';\n");
    }

    #[test]
    fn test_remove_namespace_keeps_default() {
        let (output, _) = prune("import def, * as ns from 'm';\n", &["ns"]);
        assert_eq!(output, "import def from 'm';\n");
    }

    #[test]
    fn test_compact_braces_stay_compact() {
        let (output, _) = prune("import {a, b, c} from 'm';\n", &["b"]);
        assert_eq!(output, "import {a, c} from 'm';\n");
    }

    #[test]
    fn test_multiline_list_stays_multiline() {
        let source = "import {\n  alpha,\n  beta,\n  gamma,\n} from 'm';\n";
        let (output, _) = prune(source, &["beta"]);
        assert_eq!(output, "import {\n  alpha,\n  gamma,\n} from 'm';\n");
    }

    #[test]
    fn test_multiline_list_without_trailing_comma() {
        let source = "import {\n  alpha,\n  beta\n} from 'm';\n";
        let (output, _) = prune(source, &["beta"]);
        assert_eq!(output, "import {\n  alpha\n} from 'm';\n");
    }

    #[test]
    fn test_aliased_specifier_keeps_alias() {
        let (output, _) = prune("import { a as x, b as y } from 'm';\n", &["y"]);
        assert_eq!(output, "import { a as x } from 'm';\n");
    }

    #[test]
    fn test_type_only_import_keeps_keyword() {
        let (output, _) = prune("import type { A, B } from './types';\n", &["A"]);
        assert_eq!(output, "import type { B } from './types';\n");
    }

    #[test]
    fn test_comment_on_surviving_specifier_kept() {
        let source = "import {\n  a, // keep\n  b,\n} from 'm';\na();\n";
        let (output, _) = prune(source, &["b"]);
        assert_eq!(output, "import {\n  a, // keep\n} from 'm';\na();\n");
    }

    #[test]
    fn test_comment_on_removed_specifier_goes_with_it() {
        let source = "import {\n  a, // old helper\n  b,\n} from 'm';\n";
        let (output, _) = prune(source, &["a"]);
        assert_eq!(output, "import {\n  b,\n} from 'm';\n");
    }

    #[test]
    fn test_comment_line_above_specifier_follows_it() {
        let source = "import {\n  a,\n  // about b\n  b,\n  c,\n} from 'm';\n";
        let (output, _) = prune(source, &["a", "c"]);
        assert_eq!(output, "import {\n  // about b\n  b,\n} from 'm';\n");
    }

    #[test]
    fn test_last_specifier_removed_without_trailing_comma() {
        let (output, _) = prune("import { a, b } from 'm';\n", &["b"]);
        assert_eq!(output, "import { a } from 'm';\n");

        let (output, _) = prune("import { a, b, } from 'm';\n", &["b"]);
        assert_eq!(output, "import { a, } from 'm';\n");
    }

    #[test]
    fn test_nothing_dead_is_untouched() {
        let source = "import { A } from 'm';\n";
        let (output, outcomes) = prune(source, &[]);
        assert_eq!(output, source);
        assert_eq!(outcomes, vec![PruneOutcome::Untouched]);
    }
}

//! Pending rewrites of a source file and the splice printer that applies them.
//!
//! Tree-sitter has no printer, so printing a modified tree means splicing
//! replacement text into the original source. Regions no edit touches are
//! copied byte-for-byte, which keeps the author's formatting intact.

use std::ops::Range;

use tree_sitter::Node;

use super::tree::SourceTree;
use crate::error::{CodemodError, CodemodResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditKind {
    /// Replace exactly the given byte range.
    Splice,
    /// Remove a whole statement, widened to full lines when it owns them.
    Statement,
}

#[derive(Debug, Clone)]
struct Edit {
    start: usize,
    end: usize,
    text: String,
    kind: EditKind,
}

/// Collection of edits against one [`SourceTree`].
#[derive(Debug, Default, Clone)]
pub struct Edits {
    edits: Vec<Edit>,
}

impl Edits {
    /// Create an empty edit set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no edit has been recorded.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Number of recorded edits.
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Delete exactly the bytes covered by a node.
    pub fn remove(&mut self, node: Node<'_>) {
        self.replace_range(node.byte_range(), "");
    }

    /// Replace the bytes covered by a node.
    pub fn replace(&mut self, node: Node<'_>, text: impl Into<String>) {
        self.replace_range(node.byte_range(), text);
    }

    /// Replace an arbitrary byte range.
    pub fn replace_range(&mut self, range: Range<usize>, text: impl Into<String>) {
        self.edits.push(Edit {
            start: range.start,
            end: range.end,
            text: text.into(),
            kind: EditKind::Splice,
        });
    }

    /// Insert text at a byte offset.
    pub fn insert(&mut self, at: usize, text: impl Into<String>) {
        self.replace_range(at..at, text);
    }

    /// Remove a statement together with the comments attached to it.
    ///
    /// The removed span runs from the first leading comment to the end of a
    /// trailing same-line comment. When printed, the span grows to whole lines
    /// if the statement is alone on its lines, and blank lines left behind at
    /// the edges of the removal are collapsed.
    pub fn remove_statement(&mut self, tree: &SourceTree, statement: Node<'_>) {
        let start = tree
            .leading_comments(statement)
            .first()
            .map(|c| c.start_byte())
            .unwrap_or_else(|| statement.start_byte());
        let end = tree
            .trailing_comment(statement)
            .map(|c| c.end_byte())
            .unwrap_or_else(|| statement.end_byte());

        self.edits.push(Edit {
            start,
            end,
            text: String::new(),
            kind: EditKind::Statement,
        });
    }

    /// Apply all edits to `source`.
    pub(crate) fn apply(&self, source: &str) -> CodemodResult<String> {
        let mut edits = self.edits.clone();
        edits.sort_by_key(|e| (e.start, e.end));

        let edits = merge_adjacent_statements(source, edits);
        let edits: Vec<Edit> = edits
            .into_iter()
            .map(|edit| match edit.kind {
                EditKind::Statement => widen_statement(source, edit),
                EditKind::Splice => edit,
            })
            .collect();

        let mut output = String::with_capacity(source.len());
        let mut cursor = 0;
        for edit in &edits {
            if edit.start < cursor {
                return Err(CodemodError::OverlappingEdits {
                    first_end: cursor,
                    second_start: edit.start,
                });
            }
            output.push_str(&source[cursor..edit.start]);
            output.push_str(&edit.text);
            cursor = edit.end;
        }
        output.push_str(&source[cursor..]);

        Ok(output)
    }
}

fn is_horizontal_space(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r'
}

fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

/// Merge statement removals that are separated only by whitespace.
fn merge_adjacent_statements(source: &str, edits: Vec<Edit>) -> Vec<Edit> {
    let mut merged: Vec<Edit> = Vec::with_capacity(edits.len());
    for edit in edits {
        if let Some(last) = merged.last_mut() {
            let both_statements =
                last.kind == EditKind::Statement && edit.kind == EditKind::Statement;
            if both_statements
                && (edit.start <= last.end || is_blank(&source[last.end..edit.start]))
            {
                last.end = last.end.max(edit.end);
                continue;
            }
        }
        merged.push(edit);
    }
    merged
}

fn line_start(source: &str, at: usize) -> usize {
    source[..at].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

/// Offset just past the newline ending the line that contains `at`,
/// or the end of the source.
fn next_line_start(source: &str, at: usize) -> usize {
    source[at..]
        .find('\n')
        .map(|i| at + i + 1)
        .unwrap_or(source.len())
}

/// Widen a statement removal so it does not leave stray whitespace behind.
fn widen_statement(source: &str, mut edit: Edit) -> Edit {
    let start_of_line = line_start(source, edit.start);
    let owns_line_start = source[start_of_line..edit.start]
        .chars()
        .all(is_horizontal_space);

    let after = source[edit.end..]
        .find(|c: char| !is_horizontal_space(c))
        .map(|i| edit.end + i)
        .unwrap_or(source.len());
    let owns_line_end = after == source.len() || source[after..].starts_with('\n');

    match (owns_line_start, owns_line_end) {
        (true, true) => {
            edit.start = start_of_line;
            edit.end = next_line_start(source, after);
            collapse_blank_lines(source, &mut edit);
        }
        (false, true) => {
            // `foo(); bar();` removing `bar();`: drop the space before it.
            edit.start = source[..edit.start].trim_end_matches(is_horizontal_space).len();
            edit.end = after;
        }
        (_, false) => {
            edit.end = after;
        }
    }
    edit
}

/// After removing whole lines, avoid leaving a doubled blank line, a blank
/// first line, or a blank last line.
fn collapse_blank_lines(source: &str, edit: &mut Edit) {
    let before = &source[..edit.start];
    let preceded_by_blank =
        edit.start == 0 || before.ends_with("\n\n") || before.ends_with("\n\r\n");

    if edit.end == source.len() {
        while edit.start > 0 {
            let previous = line_start(source, edit.start - 1);
            if !is_blank(&source[previous..edit.start]) {
                break;
            }
            edit.start = previous;
        }
    } else if preceded_by_blank {
        while edit.end < source.len() {
            let next = next_line_start(source, edit.end);
            if !is_blank(&source[edit.end..next]) || !source[edit.end..next].ends_with('\n') {
                break;
            }
            edit.end = next;
        }
    }
}

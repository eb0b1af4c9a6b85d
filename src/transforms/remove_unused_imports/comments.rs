//! Keeping file-header comments when the first statement is pruned.
//!
//! Comments belong to the statement that follows them, so removing the first
//! statement would also remove a license header or directive comment at the
//! top of the file. The record captured here is used to put those comments
//! back in front of whichever statement comes first after pruning.

use std::collections::HashSet;
use std::ops::Range;

use crate::syntax::{Edits, SourceTree};

/// Comments attached to the first top-level statement, captured before pruning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadingComments {
    statement_id: usize,
    range: Range<usize>,
}

impl LeadingComments {
    /// Capture the first statement's leading comments.
    ///
    /// Returns `None` when the file has no statement or the first statement
    /// carries no comments.
    pub fn capture(tree: &SourceTree) -> Option<Self> {
        let first = tree.first_statement()?;
        let comments = tree.leading_comments(first);
        let start = comments.first()?.start_byte();
        // Runs to the start of the statement's line: line endings and a blank
        // line after the header are part of the capture.
        let end = line_start_if_indented(tree.source(), first.start_byte())
            .max(comments.last()?.end_byte());

        Some(Self {
            statement_id: first.id(),
            range: start..end,
        })
    }

    /// Text of the captured comments as written, with the line breaks that
    /// separate them from the statement.
    pub fn text<'a>(&self, tree: &'a SourceTree) -> &'a str {
        &tree.source()[self.range.clone()]
    }

    /// Re-attach the comments if the first statement was removed.
    ///
    /// `removed` holds the ids of statements removed by the pruner. The
    /// comments are inserted ahead of the new first statement's own leading
    /// comments. Returns true if an insertion was made.
    pub fn restore(&self, tree: &SourceTree, removed: &HashSet<usize>, edits: &mut Edits) -> bool {
        if !removed.contains(&self.statement_id) {
            return false;
        }

        let new_first = tree
            .statements()
            .into_iter()
            .find(|s| !removed.contains(&s.id()));

        let text = self.text(tree).to_string();
        match new_first {
            Some(statement) if statement.id() == self.statement_id => false,
            Some(statement) => {
                let anchor = tree
                    .leading_comments(statement)
                    .first()
                    .map(|c| c.start_byte())
                    .unwrap_or_else(|| statement.start_byte());
                edits.insert(line_start_if_indented(tree.source(), anchor), text);
                true
            }
            None => {
                // Every statement is gone; keep the header as the whole file.
                edits.insert(tree.source().len(), text);
                true
            }
        }
    }
}

/// Start of the line containing `at` if only indentation precedes it.
fn line_start_if_indented(source: &str, at: usize) -> usize {
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

    fn parse(source: &str) -> SourceTree {
        let mut parser = SourceParser::new().unwrap();
        parser.parse(&FileInfo::new("a.js", source)).unwrap()
    }

    #[test]
    fn test_capture_none_without_comments() {
        let tree = parse("import a from 'a';\n");
        assert_eq!(LeadingComments::capture(&tree), None);
    }

    #[test]
    fn test_capture_spans_all_header_comments() {
        let tree = parse("// one\n\n/* two */\nimport a from 'a';\n");
        let captured = LeadingComments::capture(&tree).unwrap();
        assert_eq!(captured.text(&tree), "// one\n\n/* two */\n");
    }

    #[test]
    fn test_restore_moves_comments_to_new_first_statement() {
        let source = "// header\nimport a from 'a';\n// about foo\nfoo();\n";
        let tree = parse(source);
        let captured = LeadingComments::capture(&tree).unwrap();
        let first = tree.first_statement().unwrap();

        let mut edits = Edits::new();
        edits.remove_statement(&tree, first);
        let removed: HashSet<usize> = [first.id()].into_iter().collect();
        assert!(captured.restore(&tree, &removed, &mut edits));

        assert_eq!(
            tree.print(&edits).unwrap(),
            "// header\n// about foo\nfoo();\n"
        );
    }

    #[test]
    fn test_restore_noop_when_first_statement_survives() {
        let tree = parse("// header\nimport a from 'a';\nimport b from 'b';\n");
        let captured = LeadingComments::capture(&tree).unwrap();
        let second = tree.statements()[1];

        let mut edits = Edits::new();
        edits.remove_statement(&tree, second);
        let removed: HashSet<usize> = [second.id()].into_iter().collect();
        assert!(!captured.restore(&tree, &removed, &mut edits));
        assert_eq!(edits.len(), 1);
    }

    #[test]
    fn test_restore_keeps_crlf_line_endings() {
        let source = "// h\r\nimport { x } from 'y';\r\nfoo();\r\n";
        let tree = parse(source);
        let captured = LeadingComments::capture(&tree).unwrap();
        let first = tree.first_statement().unwrap();

        let mut edits = Edits::new();
        edits.remove_statement(&tree, first);
        let removed: HashSet<usize> = [first.id()].into_iter().collect();
        captured.restore(&tree, &removed, &mut edits);

        assert_eq!(tree.print(&edits).unwrap(), "// h\r\nfoo();\r\n");
    }

    #[test]
    fn test_restore_keeps_blank_line_after_header() {
        let source = "// License\n\nimport { x } from 'y';\n\nfoo();\n";
        let tree = parse(source);
        let captured = LeadingComments::capture(&tree).unwrap();
        let first = tree.first_statement().unwrap();

        let mut edits = Edits::new();
        edits.remove_statement(&tree, first);
        let removed: HashSet<usize> = [first.id()].into_iter().collect();
        captured.restore(&tree, &removed, &mut edits);

        assert_eq!(tree.print(&edits).unwrap(), "// License\n\nfoo();\n");
    }

    #[test]
    fn test_restore_when_file_becomes_empty() {
        let tree = parse("// header\nimport a from 'a';\n");
        let captured = LeadingComments::capture(&tree).unwrap();
        let first = tree.first_statement().unwrap();

        let mut edits = Edits::new();
        edits.remove_statement(&tree, first);
        let removed: HashSet<usize> = [first.id()].into_iter().collect();
        captured.restore(&tree, &removed, &mut edits);

        assert_eq!(tree.print(&edits).unwrap(), "// header\n");
    }
}

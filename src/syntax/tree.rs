//! Parsing source files into tree-sitter trees and querying them.

use std::fs;
use std::path::{Path, PathBuf};

use tree_sitter::{Node, Parser, Tree, TreeCursor};

use super::dialect::Dialect;
use super::edits::Edits;
use crate::error::{CodemodError, CodemodResult};

/// A source file handed to a transform: where it lives and what it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Path of the file. Only its extension is used to pick the dialect.
    pub path: PathBuf,
    /// Full UTF-8 source text.
    pub source: String,
}

impl FileInfo {
    /// Create a FileInfo from a path and in-memory source.
    pub fn new(path: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Read a file from disk.
    pub fn read(path: &Path) -> CodemodResult<Self> {
        let source = fs::read_to_string(path)?;
        Ok(Self::new(path, source))
    }

    /// Determine the dialect from the file extension.
    pub fn dialect(&self) -> CodemodResult<Dialect> {
        Dialect::from_path(&self.path).ok_or_else(|| {
            let ext = self
                .path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("");
            CodemodError::UnsupportedFileType(ext.to_string())
        })
    }
}

/// Parser front-end holding one tree-sitter parser per grammar.
///
/// Creating grammars is not free, so a single `SourceParser` is meant to be
/// reused for every file of a run.
pub struct SourceParser {
    js_parser: Parser,
    ts_parser: Parser,
    tsx_parser: Parser,
}

impl SourceParser {
    /// Create a new SourceParser.
    pub fn new() -> CodemodResult<Self> {
        Ok(Self {
            js_parser: Self::parser_for(Dialect::JavaScript)?,
            ts_parser: Self::parser_for(Dialect::TypeScript)?,
            tsx_parser: Self::parser_for(Dialect::Tsx)?,
        })
    }

    fn parser_for(dialect: Dialect) -> CodemodResult<Parser> {
        let mut parser = Parser::new();
        parser
            .set_language(&dialect.tree_sitter_language())
            .map_err(|_| CodemodError::LanguageInit)?;
        Ok(parser)
    }

    /// Parse a file into a [`SourceTree`].
    ///
    /// Tree-sitter recovers from syntax errors by inserting error nodes.
    /// Rewriting around those would corrupt the file, so any error node is
    /// reported as [`CodemodError::Syntax`] instead.
    pub fn parse(&mut self, file: &FileInfo) -> CodemodResult<SourceTree> {
        let dialect = file.dialect()?;
        let path = file.path.display().to_string();

        log::debug!(
            "Parsing {} as {} ({} bytes)",
            path,
            dialect,
            file.source.len()
        );

        let parser = match dialect {
            Dialect::JavaScript | Dialect::Jsx => &mut self.js_parser,
            Dialect::TypeScript => &mut self.ts_parser,
            Dialect::Tsx => &mut self.tsx_parser,
        };

        let tree = parser
            .parse(&file.source, None)
            .ok_or_else(|| CodemodError::ParseFailed { path: path.clone() })?;

        if tree.root_node().has_error() {
            let (line, column) = first_error_position(&tree);
            return Err(CodemodError::Syntax { path, line, column });
        }

        Ok(SourceTree {
            path: file.path.clone(),
            dialect,
            source: file.source.clone(),
            tree,
        })
    }
}

/// 1-based position of the first error or missing node in the tree.
fn first_error_position(tree: &Tree) -> (usize, usize) {
    let mut cursor = tree.walk();
    let mut found = Vec::new();
    visit_node(&mut cursor, &mut |n: Node<'_>| n.is_error() || n.is_missing(), &mut found);
    let point = found
        .first()
        .map(|n| n.start_position())
        .unwrap_or_else(|| tree.root_node().start_position());
    (point.row + 1, point.column + 1)
}

/// A parsed source file.
pub struct SourceTree {
    path: PathBuf,
    dialect: Dialect,
    source: String,
    tree: Tree,
}

impl SourceTree {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The `program` node.
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text covered by a node.
    pub fn text<'a>(&'a self, node: Node<'_>) -> &'a str {
        self.source.get(node.byte_range()).unwrap_or("")
    }

    /// All nodes of the given kind, in document order.
    pub fn find(&self, kind: &str) -> Vec<Node<'_>> {
        self.find_where(|node| node.kind() == kind)
    }

    /// All nodes matching a predicate, in document order.
    pub fn find_where<'t, F>(&'t self, mut predicate: F) -> Vec<Node<'t>>
    where
        F: FnMut(Node<'t>) -> bool,
    {
        let mut nodes = Vec::new();
        let mut cursor = self.tree.walk();
        visit_node(&mut cursor, &mut predicate, &mut nodes);
        nodes
    }

    /// Top-level statements of the program, skipping comments and a
    /// leading `#!` line.
    pub fn statements(&self) -> Vec<Node<'_>> {
        let root = self.root();
        let mut cursor = root.walk();
        let statements = root
            .named_children(&mut cursor)
            .filter(|n| !is_comment(n) && n.kind() != "hash_bang_line")
            .collect();
        statements
    }

    /// The structurally first top-level statement, if any.
    pub fn first_statement(&self) -> Option<Node<'_>> {
        self.statements().into_iter().next()
    }

    /// Comments attached in front of a node.
    ///
    /// These are the comment siblings between the previous non-comment
    /// sibling and the node. A comment on the same line as the end of the
    /// previous sibling trails that sibling and is not included.
    pub fn leading_comments<'t>(&'t self, node: Node<'t>) -> Vec<Node<'t>> {
        let mut comments = Vec::new();
        let mut current = node.prev_sibling();
        while let Some(sibling) = current {
            if !is_comment(&sibling) {
                break;
            }
            comments.push(sibling);
            current = sibling.prev_sibling();
        }

        if let (Some(previous), Some(closest)) = (current, comments.last()) {
            if closest.start_position().row == previous.end_position().row {
                comments.pop();
            }
        }

        comments.reverse();
        comments
    }

    /// A comment starting on the line where the node ends, if any.
    pub fn trailing_comment<'t>(&'t self, node: Node<'t>) -> Option<Node<'t>> {
        node.next_sibling()
            .filter(|n| is_comment(n) && n.start_position().row == node.end_position().row)
    }

    /// Print the tree back to source with the given edits applied.
    pub fn print(&self, edits: &Edits) -> CodemodResult<String> {
        edits.apply(&self.source)
    }
}

/// Returns true if the node is a comment.
pub fn is_comment(node: &Node<'_>) -> bool {
    node.kind() == "comment"
}

/// Returns true if `ancestor` contains `node` (or is `node`).
pub fn is_within(node: Node<'_>, ancestor: Node<'_>) -> bool {
    let mut current = Some(node);
    while let Some(n) = current {
        if n.id() == ancestor.id() {
            return true;
        }
        current = n.parent();
    }
    false
}

/// Returns true if any ancestor of the node (or the node itself) has the given kind.
pub fn has_ancestor_kind(node: Node<'_>, kind: &str) -> bool {
    let mut current = Some(node);
    while let Some(n) = current {
        if n.kind() == kind {
            return true;
        }
        current = n.parent();
    }
    false
}

/// Returns true if the node is the given field of its parent.
pub fn is_field_of_parent(node: Node<'_>, field: &str) -> bool {
    node.parent()
        .and_then(|parent| parent.child_by_field_name(field))
        .is_some_and(|child| child.id() == node.id())
}

/// Recursively visit nodes, collecting the ones matching the predicate.
fn visit_node<'t, F>(cursor: &mut TreeCursor<'t>, predicate: &mut F, nodes: &mut Vec<Node<'t>>)
where
    F: FnMut(Node<'t>) -> bool,
{
    let node = cursor.node();
    if predicate(node) {
        nodes.push(node);
    }

    if cursor.goto_first_child() {
        loop {
            visit_node(cursor, predicate, nodes);
            if !cursor.goto_next_sibling() {
                break;
            }
        }
        cursor.goto_parent();
    }
}

//! Syntax layer wrapping tree-sitter.
//!
//! Transforms never parse or print anything themselves. They go through the
//! small surface exposed here:
//!
//! - [`SourceParser::parse`] turns a [`FileInfo`] into a [`SourceTree`]
//! - [`SourceTree::find`] / [`SourceTree::find_where`] select nodes
//! - [`Edits`] records removals, replacements and insertions
//! - [`SourceTree::print`] splices the edits back into the source
//!
//! # Example
//!
//! ```
//! use codemods::syntax::{Edits, FileInfo, SourceParser};
//!
//! let mut parser = SourceParser::new().unwrap();
//! let tree = parser
//!     .parse(&FileInfo::new("a.js", "var x = 1;\n"))
//!     .unwrap();
//!
//! let mut edits = Edits::new();
//! for declaration in tree.find("variable_declaration") {
//!     edits.replace(declaration.child(0).unwrap(), "let");
//! }
//! assert_eq!(tree.print(&edits).unwrap(), "let x = 1;\n");
//! ```

pub mod dialect;
pub mod edits;
pub mod tree;

pub use dialect::Dialect;
pub use edits::Edits;
pub use tree::{
    has_ancestor_kind, is_comment, is_field_of_parent, is_within, FileInfo, SourceParser,
    SourceTree,
};

//! Source dialects and their tree-sitter grammars.

use std::fmt;
use std::path::Path;

use tree_sitter::Language;

/// Language dialect of a source file, inferred from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    JavaScript,
    Jsx,
    TypeScript,
    Tsx,
}

impl Dialect {
    /// Determine the dialect from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" | "cjs" => Some(Dialect::JavaScript),
            "jsx" => Some(Dialect::Jsx),
            "ts" | "mts" | "cts" => Some(Dialect::TypeScript),
            "tsx" => Some(Dialect::Tsx),
            _ => None,
        }
    }

    /// Determine the dialect from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Returns true for dialects that carry static type annotations.
    pub fn is_typed(&self) -> bool {
        matches!(self, Dialect::TypeScript | Dialect::Tsx)
    }

    /// Get the tree-sitter grammar for this dialect.
    ///
    /// The JavaScript grammar parses JSX natively, so `.js` and `.jsx`
    /// share it. TypeScript needs the TSX variant to accept markup.
    pub fn tree_sitter_language(&self) -> Language {
        match self {
            Dialect::JavaScript | Dialect::Jsx => tree_sitter_javascript::LANGUAGE.into(),
            Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Dialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Dialect::JavaScript => "javascript",
            Dialect::Jsx => "jsx",
            Dialect::TypeScript => "typescript",
            Dialect::Tsx => "tsx",
        };
        write!(f, "{}", s)
    }
}

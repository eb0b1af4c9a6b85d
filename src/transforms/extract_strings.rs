//! Report every string literal in a file.
//!
//! Import sources and JSX attribute values are string literals too and are
//! reported like any other. The file itself is never modified.

use serde::Serialize;

use super::Transform;
use crate::config::TransformOptions;
use crate::error::CodemodResult;
use crate::syntax::{FileInfo, SourceParser, SourceTree};

/// A string literal found in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedString {
    /// Literal contents without the surrounding quotes, escapes as written.
    pub value: String,
    /// 1-based line of the opening quote.
    pub line: usize,
    /// 1-based column of the opening quote.
    pub column: usize,
}

/// All string literals of a parsed file, in document order.
pub fn extract_strings(tree: &SourceTree) -> Vec<ExtractedString> {
    tree.find("string")
        .into_iter()
        .map(|node| {
            let position = node.start_position();
            ExtractedString {
                value: unquote(tree.text(node)).to_string(),
                line: position.row + 1,
                column: position.column + 1,
            }
        })
        .collect()
}

fn unquote(text: &str) -> &str {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open @ ('"' | '\'')), Some(close)) if open == close => &text[1..text.len() - 1],
        _ => text,
    }
}

/// The extract-strings transform: logs each literal and returns the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractStrings;

impl Transform for ExtractStrings {
    fn name(&self) -> &'static str {
        "extract-strings"
    }

    fn description(&self) -> &'static str {
        "List string literals (read-only)"
    }

    fn transform(
        &self,
        file: &FileInfo,
        parser: &mut SourceParser,
        _options: &TransformOptions,
    ) -> CodemodResult<String> {
        let tree = parser.parse(file)?;
        for string in extract_strings(&tree) {
            log::info!(
                "{}:{}:{}: \"{}\"",
                file.path.display(),
                string.line,
                string.column,
                string.value
            );
        }
        Ok(file.source.clone())
    }
}

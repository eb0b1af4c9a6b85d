//! Rewrite `var` declarations as `let`.
//!
//! Only the keyword changes. Covers plain declarations and the `var` of
//! `for (var k in o)` / `for (var x of xs)` heads; classic `for (var i = 0; ...)`
//! loops hold an ordinary variable declaration and are covered by the first case.

use tree_sitter::Node;

use super::Transform;
use crate::config::TransformOptions;
use crate::error::CodemodResult;
use crate::syntax::{Edits, FileInfo, SourceParser, SourceTree};

#[derive(Debug, Clone, Copy, Default)]
pub struct VarToLet;

impl Transform for VarToLet {
    fn name(&self) -> &'static str {
        "var-to-let"
    }

    fn description(&self) -> &'static str {
        "Replace var declarations with let"
    }

    fn transform(
        &self,
        file: &FileInfo,
        parser: &mut SourceParser,
        _options: &TransformOptions,
    ) -> CodemodResult<String> {
        let tree = parser.parse(file)?;
        let mut edits = Edits::new();
        for keyword in var_keywords(&tree) {
            edits.replace(keyword, "let");
        }
        if edits.is_empty() {
            return Ok(file.source.clone());
        }

        log::info!(
            "{}: rewrote {} var declaration(s)",
            file.path.display(),
            edits.len()
        );
        tree.print(&edits)
    }
}

/// Every `var` keyword token that introduces a declaration.
fn var_keywords(tree: &SourceTree) -> Vec<Node<'_>> {
    tree.find_where(|node| {
        node.kind() == "var"
            && node.parent().is_some_and(|parent| match parent.kind() {
                "variable_declaration" => true,
                "for_in_statement" => parent
                    .child_by_field_name("kind")
                    .is_some_and(|kind| kind.id() == node.id()),
                _ => false,
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> String {
        let mut parser = SourceParser::new().unwrap();
        VarToLet
            .transform(
                &FileInfo::new("test.js", source),
                &mut parser,
                &TransformOptions::default(),
            )
            .unwrap()
    }

    #[test]
    fn test_declarations_rewritten() {
        assert_eq!(run("var a = 1;\nvar b, c = 2;\n"), "let a = 1;\nlet b, c = 2;\n");
    }

    #[test]
    fn test_nested_and_loop_declarations() {
        let source = "function f() {\n  var x = 1;\n  for (var i = 0; i < 3; i++) {}\n  for (var k in obj) {}\n  for (var v of list) {}\n}\n";
        assert_eq!(
            run(source),
            "function f() {\n  let x = 1;\n  for (let i = 0; i < 3; i++) {}\n  for (let k in obj) {}\n  for (let v of list) {}\n}\n"
        );
    }

    #[test]
    fn test_identifiers_and_strings_untouched() {
        let source = "const variable = 'var x';\n// var y\nlet z = variable;\n";
        assert_eq!(run(source), source);
    }
}

//! Interpreter directive (`#!/usr/bin/env node`) handling.
//!
//! The directive is lifted out of the tree before pruning and written back in
//! front of the printed output, so statement removals at the top of the file
//! can never swallow or displace it.

use std::ops::Range;

use crate::syntax::{Edits, SourceTree};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterDirective {
    value: String,
    range: Range<usize>,
}

impl InterpreterDirective {
    /// Find a leading `#!` line.
    pub fn find(tree: &SourceTree) -> Option<Self> {
        let root = tree.root();
        let node = root.child(0).filter(|n| n.kind() == "hash_bang_line")?;
        let text = tree.text(node);
        let value = text.strip_prefix("#!").unwrap_or(text).trim_end().to_string();

        Some(Self {
            value,
            range: node.byte_range(),
        })
    }

    /// The directive without its `#!` marker.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Remove the directive line (and its line break) from the output.
    pub fn strip(&self, tree: &SourceTree, edits: &mut Edits) {
        let source = tree.source();
        let end = source[self.range.end..]
            .find('\n')
            .map(|i| self.range.end + i + 1)
            .unwrap_or(source.len());
        edits.replace_range(self.range.start..end, "");
    }

    /// Put the directive back in front of printed output.
    pub fn prepend(&self, output: &str) -> String {
        format!("#!{}\n{}", self.value, output)
    }
}

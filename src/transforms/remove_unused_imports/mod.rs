//! Remove import bindings that are never used.
//!
//! For each import statement with bindings, every binding that is not exempt
//! and that the [`LivenessOracle`] reports dead is dropped. A statement left
//! with no bindings is removed entirely. Side-effect imports
//! (`import './polyfills';`) are never touched.
//!
//! Two fix-ups surround the pruning:
//!
//! - comments attached to the first statement are moved onto the new first
//!   statement if pruning removed it ([`LeadingComments`]);
//! - a `#!` line is lifted out before pruning and written back afterwards
//!   ([`InterpreterDirective`]).
//!
//! When nothing is pruned the input text is returned unchanged.

pub mod bindings;
pub mod comments;
pub mod directive;
pub mod liveness;
pub mod prune;

use std::collections::HashSet;

pub use bindings::{import_declarations, BindingKind, ImportBinding, ImportDeclaration};
pub use comments::LeadingComments;
pub use directive::InterpreterDirective;
pub use liveness::LivenessOracle;
pub use prune::{prune_declaration, PruneOutcome};

use super::Transform;
use crate::config::TransformOptions;
use crate::error::CodemodResult;
use crate::syntax::{Edits, FileInfo, SourceParser, SourceTree};

/// The remove-unused-imports transform.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveUnusedImports;

impl Transform for RemoveUnusedImports {
    fn name(&self) -> &'static str {
        "remove-unused-imports"
    }

    fn description(&self) -> &'static str {
        "Remove import bindings that are never referenced"
    }

    fn transform(
        &self,
        file: &FileInfo,
        parser: &mut SourceParser,
        options: &TransformOptions,
    ) -> CodemodResult<String> {
        let tree = parser.parse(file)?;
        let output = remove_unused_imports(&tree, options)?;
        Ok(output.unwrap_or_else(|| file.source.clone()))
    }
}

/// Prune unused imports from a parsed file.
///
/// Returns the rewritten source, or `None` if no binding was removed.
pub fn remove_unused_imports(
    tree: &SourceTree,
    options: &TransformOptions,
) -> CodemodResult<Option<String>> {
    let leading_comments = LeadingComments::capture(tree);

    let mut edits = Edits::new();
    let directive = InterpreterDirective::find(tree);
    if let Some(directive) = &directive {
        directive.strip(tree, &mut edits);
    }

    let oracle = LivenessOracle::new(tree);
    let mut removed_statements = HashSet::new();
    let mut was_modified = false;

    for declaration in import_declarations(tree) {
        if declaration.is_side_effect_only() {
            continue;
        }

        let dead: Vec<ImportBinding<'_>> = declaration
            .bindings
            .iter()
            .filter(|binding| is_removable(binding, &oracle, options))
            .copied()
            .collect();

        for binding in &dead {
            log::debug!(
                "{}: removing unused import '{}' from '{}'",
                tree.path().display(),
                binding.local,
                declaration.source
            );
        }

        match prune_declaration(tree, &declaration, &dead, &mut edits) {
            PruneOutcome::Untouched => {}
            PruneOutcome::Rewritten => was_modified = true,
            PruneOutcome::Removed => {
                was_modified = true;
                removed_statements.insert(declaration.statement.id());
            }
        }
    }

    if !was_modified {
        return Ok(None);
    }

    if let Some(comments) = &leading_comments {
        if comments.restore(tree, &removed_statements, &mut edits) {
            log::debug!(
                "{}: moved header comments onto the new first statement",
                tree.path().display()
            );
        }
    }

    let mut output = tree.print(&edits)?;
    if let Some(directive) = &directive {
        output = directive.prepend(&output);
    }

    Ok(Some(output))
}

/// Exempt names are checked before the oracle is consulted.
fn is_removable(
    binding: &ImportBinding<'_>,
    oracle: &LivenessOracle<'_>,
    options: &TransformOptions,
) -> bool {
    if options.is_exempt(binding.local) {
        return false;
    }
    !oracle.is_live(binding)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(path: &str, source: &str) -> String {
        run_with(path, source, &TransformOptions::default())
    }

    fn run_with(path: &str, source: &str, options: &TransformOptions) -> String {
        let mut parser = SourceParser::new().unwrap();
        RemoveUnusedImports
            .transform(&FileInfo::new(path, source), &mut parser, options)
            .unwrap()
    }

    #[test]
    fn test_unreferenced_import_removed() {
        let source = "import { User } from \"./types\";\nfunction f(){ console.log(1); }";
        assert_eq!(run("a.js", source), "function f(){ console.log(1); }");
    }

    #[test]
    fn test_type_reference_keeps_import() {
        let source = "import { User } from \"./types\";\nfunction f(u: User){}";
        assert_eq!(run("a.ts", source), source);
    }

    #[test]
    fn test_exempt_name_kept() {
        let source = "import React from \"react\";\nfunction f(){ return null; }";
        assert_eq!(run("a.js", source), source);
    }

    #[test]
    fn test_exemption_is_configurable() {
        let source = "import React from \"react\";\nfunction f(){ return null; }";
        let options = TransformOptions::from_json(r#"{"exempt_names": []}"#).unwrap();
        assert_eq!(run_with("a.js", source, &options), "function f(){ return null; }");

        let source = "import h from \"preact\";\nrender();\n";
        let options = TransformOptions::default().with_exempt_names(["h"]);
        assert_eq!(run_with("a.js", source, &options), source);
    }

    #[test]
    fn test_partial_prune() {
        let source = "import { A, B } from \"m\";\nA();";
        assert_eq!(run("a.js", source), "import { A } from \"m\";\nA();");
    }

    #[test]
    fn test_license_comment_moves_to_new_first_statement() {
        let source = "/**\n * License\n */\nimport { Unused } from \"./x\";\n\nfunction f() {}\n";
        assert_eq!(run("a.js", source), "/**\n * License\n */\nfunction f() {}\n");
    }

    #[test]
    fn test_header_comments_precede_existing_comments() {
        let source = "// header\nimport { Unused } from './x';\n// docs for f\nfunction f() {}\n";
        assert_eq!(
            run("a.js", source),
            "// header\n// docs for f\nfunction f() {}\n"
        );
    }

    #[test]
    fn test_first_statement_kept_leaves_comments_alone() {
        let source = "// header\nimport { used } from './a';\nimport { unused } from './b';\nused();\n";
        assert_eq!(
            run("a.js", source),
            "// header\nimport { used } from './a';\nused();\n"
        );
    }

    #[test]
    fn test_side_effect_import_untouched() {
        let source = "import './styles.css';\nimport { x } from 'y';\n";
        assert_eq!(run("a.js", source), "import './styles.css';\n");

        let source = "import './polyfills';\n";
        assert_eq!(run("a.js", source), source);
    }

    #[test]
    fn test_unchanged_file_is_byte_identical() {
        let source = "import {a}   from 'a'  ;\n\n\n\na( ) ;\r\n// trailing\n";
        assert_eq!(run("a.js", source), source);
    }

    #[test]
    fn test_idempotent() {
        let source = "import React, { useState, useMemo } from 'react';\nimport * as fs from 'fs';\nimport x from 'x';\n\nexport function App() {\n  const [s] = useState(0);\n  return <div>{s}</div>;\n}\n";
        let once = run("a.jsx", source);
        let twice = run("a.jsx", &once);
        assert_eq!(once, twice);
        assert_eq!(
            once,
            "import React, { useState } from 'react';\n\nexport function App() {\n  const [s] = useState(0);\n  return <div>{s}</div>;\n}\n"
        );
    }

    #[test]
    fn test_interpreter_directive_preserved() {
        let source = "#!/usr/bin/env node\nimport { unused } from './a';\nimport { run } from './b';\nrun();\n";
        assert_eq!(
            run("cli.js", source),
            "#!/usr/bin/env node\nimport { run } from './b';\nrun();\n"
        );
    }

    #[test]
    fn test_mentions_in_comments_and_strings_do_not_keep_import() {
        let source = "import { User } from './types';\n\n/**\n * @param {User} user\n */\nfunction printUser(user) {\n  console.log('User', `${user.name}`);\n}\n";
        assert_eq!(
            run("a.js", source),
            "/**\n * @param {User} user\n */\nfunction printUser(user) {\n  console.log('User', `${user.name}`);\n}\n"
        );
    }

    #[test]
    fn test_jsx_usage_keeps_import() {
        let source = "import Button from './Button';\nexport const App = () => <Button label=\"ok\" />;\n";
        assert_eq!(run("a.jsx", source), source);
    }

    #[test]
    fn test_generic_type_usage_in_tsx() {
        let source = "// @ts-nocheck\nimport { Component } from \"react\";\n\ninterface Props {\n  message: string;\n}\n\nclass MyComponent extends Component<Props> {\n  render() {\n    return <div>{this.props.message}</div>;\n  }\n}\n\nexport default MyComponent;\n";
        assert_eq!(run("a.tsx", source), source);
    }

    #[test]
    fn test_syntax_error_propagates() {
        let mut parser = SourceParser::new().unwrap();
        let result = RemoveUnusedImports.transform(
            &FileInfo::new("a.js", "import { from"),
            &mut parser,
            &TransformOptions::default(),
        );
        assert!(result.is_err());
    }
}

//! Enumerating the local bindings introduced by ES module import statements.

use tree_sitter::Node;

use crate::syntax::SourceTree;

/// The form a binding takes inside its import clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// `import foo from 'module'`
    Default,
    /// `import { foo } from 'module'` or `import { foo as bar } from 'module'`
    Named,
    /// `import * as foo from 'module'`
    Namespace,
}

/// A local name introduced by an import statement.
#[derive(Debug, Clone, Copy)]
pub struct ImportBinding<'t> {
    /// Name the binding is known by in this file.
    pub local: &'t str,
    pub kind: BindingKind,
    /// The identifier node declaring `local`.
    pub declaration: Node<'t>,
    /// The clause element that is dropped when the binding is pruned:
    /// the identifier, the `namespace_import` or the `import_specifier`.
    pub specifier: Node<'t>,
}

/// An import statement together with its bindings.
#[derive(Debug, Clone)]
pub struct ImportDeclaration<'t> {
    pub statement: Node<'t>,
    /// The `import_clause`, absent for side-effect imports.
    pub clause: Option<Node<'t>>,
    /// Module specifier without quotes.
    pub source: &'t str,
    /// Bindings in source order. Empty for side-effect imports.
    pub bindings: Vec<ImportBinding<'t>>,
}

impl ImportDeclaration<'_> {
    /// Returns true for `import 'module'` style statements.
    pub fn is_side_effect_only(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Collect every import statement of the file, in document order.
pub fn import_declarations(tree: &SourceTree) -> Vec<ImportDeclaration<'_>> {
    tree.find("import_statement")
        .into_iter()
        .map(|statement| parse_import_statement(tree, statement))
        .collect()
}

/// Parse one `import_statement` node.
pub fn parse_import_statement<'t>(tree: &'t SourceTree, statement: Node<'t>) -> ImportDeclaration<'t> {
    let mut clause = None;
    let mut source = "";

    let mut cursor = statement.walk();
    for child in statement.children(&mut cursor) {
        match child.kind() {
            "import_clause" => clause = Some(child),
            "string" => source = unquote(tree.text(child)),
            _ => {}
        }
    }

    let bindings = clause
        .map(|clause| enumerate_bindings(tree, clause))
        .unwrap_or_default();

    ImportDeclaration {
        statement,
        clause,
        source,
        bindings,
    }
}

/// Enumerate the bindings of an `import_clause` in source order.
pub fn enumerate_bindings<'t>(tree: &'t SourceTree, clause: Node<'t>) -> Vec<ImportBinding<'t>> {
    let mut bindings = Vec::new();
    let mut cursor = clause.walk();

    for child in clause.children(&mut cursor) {
        match child.kind() {
            "identifier" => bindings.push(ImportBinding {
                local: tree.text(child),
                kind: BindingKind::Default,
                declaration: child,
                specifier: child,
            }),
            "namespace_import" => {
                if let Some(name) = find_namespace_name(child) {
                    bindings.push(ImportBinding {
                        local: tree.text(name),
                        kind: BindingKind::Namespace,
                        declaration: name,
                        specifier: child,
                    });
                }
            }
            "named_imports" => parse_named_imports(tree, child, &mut bindings),
            _ => {}
        }
    }

    bindings
}

/// Find the local name in a namespace import (import * as NAME).
fn find_namespace_name(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let name = node
        .children(&mut cursor)
        .find(|child| child.kind() == "identifier");
    name
}

/// Parse named imports: { foo, bar as baz, default as qux }
fn parse_named_imports<'t>(
    tree: &'t SourceTree,
    node: Node<'t>,
    bindings: &mut Vec<ImportBinding<'t>>,
) {
    let mut cursor = node.walk();

    for specifier in node.children(&mut cursor) {
        if specifier.kind() != "import_specifier" {
            continue;
        }

        // `{ "string name" }` without an alias has no usable local name.
        let local = specifier
            .child_by_field_name("alias")
            .or_else(|| specifier.child_by_field_name("name"))
            .filter(|n| n.kind() == "identifier");

        match local {
            Some(declaration) => bindings.push(ImportBinding {
                local: tree.text(declaration),
                kind: BindingKind::Named,
                declaration,
                specifier,
            }),
            None => log::debug!(
                "Skipping import specifier without local name: {}",
                tree.text(specifier)
            ),
        }
    }
}

/// Strip surrounding quotes from a string literal.
fn unquote(text: &str) -> &str {
    text.trim_start_matches(['"', '\''])
        .trim_end_matches(['"', '\''])
}

//! Deciding whether an import binding is still used.
//!
//! This is a name-matching heuristic, not scope resolution. A binding is
//! live when any of three independent checks finds a use:
//!
//! 1. a value reference: an `identifier` (or shorthand property) with the
//!    same text that is not the declaration itself, not a member-property or
//!    object-key position, and not inside an import statement;
//! 2. a markup reference: a JSX element or attribute name;
//! 3. a type reference: a `type_identifier` in a typed dialect.
//!
//! Mentions inside comments, strings, template text or `eval` input are not
//! uses. Shadowing is not tracked: a local variable with the same name keeps
//! an unused import alive.

use std::collections::{HashMap, HashSet};

use tree_sitter::Node;

use super::bindings::ImportBinding;
use crate::syntax::{has_ancestor_kind, is_field_of_parent, SourceTree};

const REFERENCE_KINDS: &[&str] = &["identifier", "shorthand_property_identifier"];

const JSX_ELEMENT_KINDS: &[&str] = &[
    "jsx_opening_element",
    "jsx_closing_element",
    "jsx_self_closing_element",
];

/// Declarations whose `name` field is a `type_identifier` that introduces a
/// type rather than referring to one.
const TYPE_DECLARATION_KINDS: &[&str] = &[
    "interface_declaration",
    "type_alias_declaration",
    "class_declaration",
    "abstract_class_declaration",
    "type_parameter",
];

/// Answers liveness queries for the bindings of one file.
///
/// Candidate nodes are collected once per file so that each query is a
/// lookup rather than a tree walk.
pub struct LivenessOracle<'t> {
    references: HashMap<&'t str, Vec<Node<'t>>>,
    markup_names: HashSet<&'t str>,
    type_names: HashSet<&'t str>,
}

impl<'t> LivenessOracle<'t> {
    /// Index the reference candidates of a tree.
    pub fn new(tree: &'t SourceTree) -> Self {
        let mut references: HashMap<&'t str, Vec<Node<'t>>> = HashMap::new();
        for node in tree.find_where(|n| REFERENCE_KINDS.contains(&n.kind())) {
            references.entry(tree.text(node)).or_default().push(node);
        }

        let markup_names = collect_markup_names(tree);

        let type_names = if tree.dialect().is_typed() {
            collect_type_names(tree)
        } else {
            HashSet::new()
        };

        Self {
            references,
            markup_names,
            type_names,
        }
    }

    /// Returns true if the binding is used anywhere that should keep it.
    pub fn is_live(&self, binding: &ImportBinding<'t>) -> bool {
        self.is_referenced(binding)
            || self.is_used_in_markup(binding.local)
            || self.is_used_as_type(binding.local)
    }

    /// General reference check.
    pub fn is_referenced(&self, binding: &ImportBinding<'t>) -> bool {
        self.references
            .get(binding.local)
            .is_some_and(|nodes| {
                nodes
                    .iter()
                    .any(|node| is_value_reference(*node, binding.declaration))
            })
    }

    /// Markup (JSX tag or attribute) reference check.
    pub fn is_used_in_markup(&self, name: &str) -> bool {
        self.markup_names.contains(name)
    }

    /// Type-position reference check. Always false for untyped dialects.
    pub fn is_used_as_type(&self, name: &str) -> bool {
        self.type_names.contains(name)
    }
}

fn is_value_reference(node: Node<'_>, declaration: Node<'_>) -> bool {
    if node.id() == declaration.id() {
        return false;
    }
    if is_member_or_key(node) {
        return false;
    }
    !has_ancestor_kind(node, "import_statement")
}

/// Identifier in `obj.NAME`, `{ NAME: value }` or `{ NAME: pattern }` position.
fn is_member_or_key(node: Node<'_>) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    match parent.kind() {
        "member_expression" => is_field_of_parent(node, "property"),
        "pair" | "pair_pattern" => is_field_of_parent(node, "key"),
        _ => false,
    }
}

fn collect_markup_names<'t>(tree: &'t SourceTree) -> HashSet<&'t str> {
    let mut names = HashSet::new();

    for element in tree.find_where(|n| JSX_ELEMENT_KINDS.contains(&n.kind())) {
        if let Some(name) = element
            .child_by_field_name("name")
            .and_then(jsx_root_identifier)
        {
            names.insert(tree.text(name));
        }
    }

    for attribute in tree.find("jsx_attribute") {
        if let Some(name) = attribute
            .named_child(0)
            .filter(|n| n.kind() != "jsx_namespace_name")
        {
            names.insert(tree.text(name));
        }
    }

    names
}

/// The leftmost identifier of a JSX element name: `Foo` in `<Foo.Bar>`.
fn jsx_root_identifier(name: Node<'_>) -> Option<Node<'_>> {
    let mut current = name;
    loop {
        match current.kind() {
            "identifier" | "jsx_identifier" => return Some(current),
            "member_expression" | "nested_identifier" => {
                current = current
                    .child_by_field_name("object")
                    .or_else(|| current.named_child(0))?;
            }
            _ => return None,
        }
    }
}

fn collect_type_names<'t>(tree: &'t SourceTree) -> HashSet<&'t str> {
    tree.find("type_identifier")
        .into_iter()
        .filter(|node| !is_type_declaration_name(*node))
        .filter(|node| !has_ancestor_kind(*node, "import_statement"))
        .map(|node| tree.text(node))
        .collect()
}

fn is_type_declaration_name(node: Node<'_>) -> bool {
    node.parent()
        .is_some_and(|parent| TYPE_DECLARATION_KINDS.contains(&parent.kind()))
        && is_field_of_parent(node, "name")
}

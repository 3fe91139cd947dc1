//! Small tree-sitter helpers shared by the extraction modes.

use tree_sitter::Node;

pub(crate) fn node_text<'s>(node: &Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or_default()
}

pub(crate) fn field_text<'s>(node: &Node, field: &str, source: &'s str) -> Option<&'s str> {
    node.child_by_field_name(field)
        .map(|child| node_text(&child, source))
}

/// Check if a node has a (possibly anonymous) child of the given kind.
///
/// Useful for the `?`, `static`, `get` and `default` tokens.
pub(crate) fn has_child_kind(node: &Node, kind: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|child| child.kind() == kind);
    found
}

pub(crate) fn children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let nodes = node.children(&mut cursor).collect();
    nodes
}

pub(crate) fn named_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let nodes = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect();
    nodes
}

/// `public`, `private` or `protected`, when written.
pub(crate) fn accessibility<'s>(node: &Node, source: &'s str) -> Option<&'s str> {
    children(node)
        .into_iter()
        .find(|child| child.kind() == "accessibility_modifier")
        .map(|child| node_text(&child, source).trim())
}

pub(crate) fn is_hidden_member(node: &Node, source: &str) -> bool {
    matches!(accessibility(node, source), Some("private" | "protected"))
}

/// Text of a `type_annotation` without its leading colon.
pub(crate) fn annotation_text(annotation: &Node, source: &str) -> String {
    node_text(annotation, source)
        .trim()
        .trim_start_matches(':')
        .trim()
        .to_string()
}

pub(crate) fn type_of(node: &Node, source: &str) -> Option<String> {
    node.child_by_field_name("type")
        .map(|annotation| annotation_text(&annotation, source))
}

/// Pre-order walk over every node below (and including) `node`.
pub(crate) fn visit<'t, F: FnMut(Node<'t>)>(node: Node<'t>, visitor: &mut F) {
    visitor(node);
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit(child, visitor);
    }
}

/// A top-level statement with its `export` wrapper removed.
#[derive(Clone, Copy)]
pub(crate) struct TopLevel<'t> {
    pub node: Node<'t>,
    pub exported: bool,
    pub default_export: bool,
}

pub(crate) fn top_level_declarations<'t>(root: &Node<'t>) -> Vec<TopLevel<'t>> {
    let mut declarations = Vec::new();
    for child in named_children(root) {
        if child.kind() == "export_statement" {
            let inner = child
                .child_by_field_name("declaration")
                .or_else(|| child.child_by_field_name("value"));
            if let Some(inner) = inner {
                declarations.push(TopLevel {
                    node: inner,
                    exported: true,
                    default_export: has_child_kind(&child, "default"),
                });
            }
        } else {
            declarations.push(TopLevel {
                node: child,
                exported: false,
                default_export: false,
            });
        }
    }
    declarations
}

pub(crate) fn is_class_kind(kind: &str) -> bool {
    matches!(
        kind,
        "class_declaration" | "abstract_class_declaration" | "class"
    )
}

/// Drop `as`, `satisfies`, `!` and parenthesis wrappers around an expression.
pub(crate) fn unwrap_expression<'t>(node: Node<'t>) -> Node<'t> {
    let mut current = node;
    while matches!(
        current.kind(),
        "as_expression"
            | "satisfies_expression"
            | "parenthesized_expression"
            | "non_null_expression"
    ) {
        match current.named_child(0) {
            Some(inner) => current = inner,
            None => break,
        }
    }
    current
}

/// `Base<T>` → `Base`, `ns.Base` stays as written.
pub(crate) fn strip_type_arguments(name: &str) -> &str {
    name.split('<').next().unwrap_or(name).trim()
}

/// Name of the type an `extends` clause points at.
pub(crate) fn extends_target(declaration: &Node, source: &str) -> Option<String> {
    let mut target = None;
    let heritage = children(declaration)
        .into_iter()
        .filter(|child| !matches!(child.kind(), "class_body" | "object_type" | "interface_body"));
    for child in heritage {
        visit(child, &mut |node| {
            if target.is_some()
                || !matches!(node.kind(), "extends_clause" | "extends_type_clause")
            {
                return;
            }
            let value = node
                .child_by_field_name("value")
                .or_else(|| node.child_by_field_name("type"))
                .or_else(|| node.named_child(0));
            if let Some(value) = value {
                let name = strip_type_arguments(node_text(&value, source));
                if !name.is_empty() {
                    target = Some(name.to_string());
                }
            }
        });
    }
    target
}

/// Property keys may be identifiers or quoted strings.
pub(crate) fn property_key(node: &Node, source: &str) -> String {
    let text = node_text(node, source).trim();
    unquote(text).unwrap_or(text).to_string()
}

/// Contents of a single- or double-quoted literal.
pub(crate) fn unquote(text: &str) -> Option<&str> {
    let text = text.trim();
    if text.len() >= 2
        && ((text.starts_with('"') && text.ends_with('"'))
            || (text.starts_with('\'') && text.ends_with('\'')))
    {
        Some(&text[1..text.len() - 1])
    } else {
        None
    }
}

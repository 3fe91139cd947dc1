//! Compile-time evaluation of string expressions.
//!
//! Resolves the argument of a style registration (`DEFAULT_CLASS + "-rtl"`,
//! `` `${BASE}-item` ``) to the literal class name it produces.

use crate::syntax::*;
use std::collections::HashMap;
use tree_sitter::Node;

/// File-level string constants, keyed by their bare name.
#[derive(Debug, Default)]
pub(crate) struct StringConstants {
    values: HashMap<String, String>,
}

impl StringConstants {
    /// Collect `const` declarations, static class fields and string enum members.
    ///
    /// Declarations are evaluated in file order, so a constant may refer to any
    /// constant declared before it.
    pub(crate) fn collect(root: &Node, source: &str) -> Self {
        let mut constants = Self::default();

        for node in top_level_declarations(root).into_iter().map(|decl| decl.node) {
            match node.kind() {
                "lexical_declaration" if has_child_kind(&node, "const") => {
                    for declarator in named_children(&node) {
                        constants.absorb(&declarator, "name", "value", source);
                    }
                }
                "enum_declaration" => {
                    if let Some(body) = node.child_by_field_name("body") {
                        for member in named_children(&body) {
                            if member.kind() == "enum_assignment" {
                                constants.absorb(&member, "name", "value", source);
                            }
                        }
                    }
                }
                kind if is_class_kind(kind) => {
                    if let Some(body) = node.child_by_field_name("body") {
                        for member in named_children(&body) {
                            if has_child_kind(&member, "static") {
                                constants.absorb(&member, "name", "value", source);
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        constants
    }

    fn absorb(&mut self, holder: &Node, name_field: &str, value_field: &str, source: &str) {
        // Enum members carry their name as an unlabelled first child.
        let name = holder
            .child_by_field_name(name_field)
            .or_else(|| holder.named_child(0));
        let (Some(name), Some(value)) = (name, holder.child_by_field_name(value_field)) else {
            return;
        };
        if let Some(resolved) = self.evaluate(&value, source) {
            self.values
                .entry(property_key(&name, source))
                .or_insert(resolved);
        }
    }

    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Try to reduce an expression to a string. `None` when it is not static.
    pub(crate) fn evaluate(&self, expr: &Node, source: &str) -> Option<String> {
        let expr = unwrap_expression(*expr);
        let text = node_text(&expr, source).trim();

        match expr.kind() {
            "string" => unquote(text).map(unescape_string),
            "template_string" => self.evaluate_template(&expr, source),
            "number" => Some(text.to_string()),
            "identifier" => self.get(text).map(str::to_string),
            // Anchor.DEFAULT_CLASS, this.DEFAULT_CLASS, Classes.Primary
            "member_expression" => {
                let property = field_text(&expr, "property", source)?;
                self.get(property.trim()).map(str::to_string)
            }
            "binary_expression" => {
                if field_text(&expr, "operator", source)?.trim() != "+" {
                    return None;
                }
                let left = self.evaluate(&expr.child_by_field_name("left")?, source)?;
                let right = self.evaluate(&expr.child_by_field_name("right")?, source)?;
                Some(left + &right)
            }
            _ => None,
        }
    }

    fn evaluate_template(&self, template: &Node, source: &str) -> Option<String> {
        // Skip the backticks.
        let start = template.start_byte() + 1;
        let end = template.end_byte().checked_sub(1)?;
        let mut resolved = String::new();
        let mut cursor = start;

        for part in named_children(template) {
            if part.kind() != "template_substitution" {
                continue;
            }
            resolved.push_str(source.get(cursor..part.start_byte())?);
            let inner = part.named_child(0)?;
            resolved.push_str(&self.evaluate(&inner, source)?);
            cursor = part.end_byte();
        }
        resolved.push_str(source.get(cursor..end)?);

        Some(unescape_string(&resolved))
    }
}

fn unescape_string(s: &str) -> String {
    s.replace("\\\"", "\"")
        .replace("\\'", "'")
        .replace("\\`", "`")
        .replace("\\\\", "\\")
}

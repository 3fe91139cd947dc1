//! Property-bag extraction.
//!
//! A property file declares one class or interface (`AnchorProps extends
//! BaseProps`) whose fields are the component's attributes. Defaults come from
//! field initializers or from a `defaultProps`-style object elsewhere in the file.

use crate::syntax::*;
use crate::types::PropertyBag;
use crate::typescript::TypeScriptStructureParser;
use compdoc_common::{CompdocError, Facet, PropertyDescriptor, Result};
use std::collections::HashMap;
use tracing::debug;
use tree_sitter::Node;

impl TypeScriptStructureParser {
    /// Extract the property bag declared in `source`.
    pub fn extract_properties(&self, source: &str) -> Result<PropertyBag> {
        let tree = self.parse_tree(source)?;
        let root = tree.root_node();

        let candidates: Vec<Node> = top_level_declarations(&root)
            .into_iter()
            .map(|decl| decl.node)
            .filter(|node| is_class_kind(node.kind()) || node.kind() == "interface_declaration")
            .collect();

        let bag = candidates
            .iter()
            .find(|node| {
                field_text(node, "name", source)
                    .map(|name| name.ends_with("Props"))
                    .unwrap_or(false)
            })
            .or_else(|| candidates.first())
            .copied()
            .ok_or_else(|| CompdocError::unavailable(Facet::Properties))?;

        let name = field_text(&bag, "name", source)
            .unwrap_or("Anonymous")
            .to_string();
        let mut properties = self.collect_fields(&bag, source);

        let defaults = self.collect_default_initializers(&root, source);
        for prop in properties.iter_mut().filter(|p| p.default.is_none()) {
            if let Some(value) = defaults.get(&prop.name) {
                prop.default = Some(value.clone());
            }
        }

        let parent = extends_target(&bag, source);
        debug!(
            "Property bag {} declares {} properties (parent: {:?})",
            name,
            properties.len(),
            parent
        );

        Ok(PropertyBag {
            name,
            properties,
            parent,
        })
    }

    fn collect_fields(&self, bag: &Node, source: &str) -> Vec<PropertyDescriptor> {
        let mut properties: Vec<PropertyDescriptor> = Vec::new();
        let Some(body) = bag.child_by_field_name("body") else {
            return properties;
        };

        for member in named_children(&body) {
            if !matches!(
                member.kind(),
                "public_field_definition" | "field_definition" | "property_signature"
            ) {
                continue;
            }
            if is_hidden_member(&member, source) || has_child_kind(&member, "static") {
                continue;
            }

            let Some(name_node) = member.child_by_field_name("name") else {
                continue;
            };
            let name = property_key(&name_node, source);
            if name.starts_with('#') || properties.iter().any(|p| p.name == name) {
                continue;
            }

            let value = member.child_by_field_name("value").map(unwrap_expression);
            if value.map(|v| is_function_kind(v.kind())).unwrap_or(false) {
                continue;
            }

            let type_annotation = type_of(&member, source)
                .or_else(|| value.map(|v| literal_type(&v).to_string()))
                .unwrap_or_else(|| "any".to_string());

            properties.push(PropertyDescriptor {
                name,
                type_annotation,
                optional: has_child_kind(&member, "?"),
                default: member
                    .child_by_field_name("value")
                    .map(|v| node_text(&v, source).trim().to_string()),
                inherited: false,
                inherited_from: None,
            });
        }

        properties
    }

    /// Key → initializer text from every default-value object in the file.
    fn collect_default_initializers(&self, root: &Node, source: &str) -> HashMap<String, String> {
        let mut defaults = HashMap::new();

        for node in top_level_declarations(root).into_iter().map(|decl| decl.node) {
            match node.kind() {
                "lexical_declaration" | "variable_declaration" => {
                    for declarator in named_children(&node) {
                        if declarator.kind() != "variable_declarator" {
                            continue;
                        }
                        self.absorb_default_object(
                            &declarator,
                            "name",
                            "value",
                            source,
                            &mut defaults,
                        );
                    }
                }
                kind if is_class_kind(kind) => {
                    if let Some(body) = node.child_by_field_name("body") {
                        for member in named_children(&body) {
                            if has_child_kind(&member, "static") {
                                self.absorb_default_object(
                                    &member,
                                    "name",
                                    "value",
                                    source,
                                    &mut defaults,
                                );
                            }
                        }
                    }
                }
                "expression_statement" => {
                    // AnchorProps.defaults = { ... };
                    if let Some(assignment) = node.named_child(0) {
                        if assignment.kind() == "assignment_expression" {
                            self.absorb_default_object(
                                &assignment,
                                "left",
                                "right",
                                source,
                                &mut defaults,
                            );
                        }
                    }
                }
                _ => {}
            }
        }

        defaults
    }

    fn absorb_default_object(
        &self,
        holder: &Node,
        name_field: &str,
        value_field: &str,
        source: &str,
        defaults: &mut HashMap<String, String>,
    ) {
        let Some(name) = field_text(holder, name_field, source) else {
            return;
        };
        let name = name.rsplit('.').next().unwrap_or(name);
        if !name.to_lowercase().contains("default") {
            return;
        }
        let Some(value) = holder.child_by_field_name(value_field).map(unwrap_expression) else {
            return;
        };
        if value.kind() != "object" {
            return;
        }

        for pair in named_children(&value) {
            if pair.kind() != "pair" {
                continue;
            }
            let (Some(key), Some(initializer)) = (
                pair.child_by_field_name("key"),
                pair.child_by_field_name("value"),
            ) else {
                continue;
            };
            defaults
                .entry(property_key(&key, source))
                .or_insert_with(|| node_text(&initializer, source).trim().to_string());
        }
    }
}

pub(crate) fn is_function_kind(kind: &str) -> bool {
    matches!(
        kind,
        "arrow_function" | "function" | "function_expression" | "generator_function"
    )
}

/// Type of an unannotated field, inferred from its literal initializer.
fn literal_type(value: &Node) -> &'static str {
    match value.kind() {
        "string" | "template_string" => "string",
        "number" => "number",
        "true" | "false" => "boolean",
        "array" => "array",
        "object" => "object",
        "null" => "null",
        _ => "any",
    }
}

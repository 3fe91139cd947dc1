//! Public method extraction from the component class.

use crate::properties::is_function_kind;
use crate::syntax::*;
use crate::typescript::TypeScriptStructureParser;
use compdoc_common::{CompdocError, Facet, MethodDescriptor, MethodParameter, Result};
use tree_sitter::Node;

impl TypeScriptStructureParser {
    /// Extract the externally callable methods of the primary component class.
    pub fn extract_methods(&self, source: &str) -> Result<Vec<MethodDescriptor>> {
        let tree = self.parse_tree(source)?;
        let root = tree.root_node();

        let component = primary_component(&root, source)
            .ok_or_else(|| CompdocError::unavailable(Facet::Methods))?;
        let Some(body) = component.child_by_field_name("body") else {
            return Ok(Vec::new());
        };

        let mut methods: Vec<MethodDescriptor> = Vec::new();
        for member in named_children(&body) {
            let Some(method) = self.method_from_member(&member, source) else {
                continue;
            };
            // Overload signatures repeat the name; the first declaration wins.
            if methods.iter().all(|m| m.name != method.name) {
                methods.push(method);
            }
        }

        Ok(methods)
    }

    fn method_from_member(&self, member: &Node, source: &str) -> Option<MethodDescriptor> {
        let callable = match member.kind() {
            "method_definition" | "method_signature" => {
                if has_child_kind(member, "get") || has_child_kind(member, "set") {
                    return None;
                }
                *member
            }
            "public_field_definition" | "field_definition" => {
                let value = unwrap_expression(member.child_by_field_name("value")?);
                if !is_function_kind(value.kind()) {
                    return None;
                }
                value
            }
            _ => return None,
        };

        if is_hidden_member(member, source) {
            return None;
        }
        let name = property_key(&member.child_by_field_name("name")?, source);
        if name.starts_with('#') || self.conventions.is_internal_method(&name) {
            return None;
        }

        let parameters = callable.child_by_field_name("parameters")?;
        let return_type = callable
            .child_by_field_name("return_type")
            .map(|annotation| annotation_text(&annotation, source))?;

        Some(MethodDescriptor {
            name,
            parameters: extract_parameters(&parameters, source),
            return_type,
        })
    }
}

/// Default-exported class, else the first exported non-props class, else the first class.
fn primary_component<'t>(root: &Node<'t>, source: &str) -> Option<Node<'t>> {
    let classes: Vec<TopLevel> = top_level_declarations(root)
        .into_iter()
        .filter(|decl| is_class_kind(decl.node.kind()))
        .collect();
    let is_props = |node: &Node| {
        field_text(node, "name", source)
            .map(|name| name.ends_with("Props"))
            .unwrap_or(false)
    };

    classes
        .iter()
        .find(|decl| decl.default_export)
        .or_else(|| classes.iter().find(|decl| decl.exported && !is_props(&decl.node)))
        .or_else(|| classes.iter().find(|decl| !is_props(&decl.node)))
        .or_else(|| classes.first())
        .map(|decl| decl.node)
}

fn extract_parameters(parameters: &Node, source: &str) -> Vec<MethodParameter> {
    named_children(parameters)
        .into_iter()
        .filter(|param| matches!(param.kind(), "required_parameter" | "optional_parameter"))
        .filter_map(|param| {
            let pattern = param.child_by_field_name("pattern")?;
            let name = node_text(&pattern, source).trim().to_string();
            if name == "this" {
                return None;
            }
            let optional = param.kind() == "optional_parameter"
                || param.child_by_field_name("value").is_some();
            Some(MethodParameter {
                name,
                type_annotation: type_of(&param, source).unwrap_or_else(|| "any".to_string()),
                optional,
            })
        })
        .collect()
}

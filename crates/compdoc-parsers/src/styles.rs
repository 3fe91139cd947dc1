//! Style-class extraction.
//!
//! A component source names its default class in a constant and registers
//! further classes through calls such as `this.addStyle(DEFAULT_CLASS + "-rtl")`.

use crate::static_eval::StringConstants;
use crate::syntax::*;
use crate::typescript::TypeScriptStructureParser;
use compdoc_common::{CompdocError, Facet, Result, StyleDescriptor};
use tracing::debug;
use tree_sitter::Node;

impl TypeScriptStructureParser {
    /// Extract the default style class and every statically resolvable registration.
    pub fn extract_styles(&self, source: &str) -> Result<Vec<StyleDescriptor>> {
        let tree = self.parse_tree(source)?;
        let root = tree.root_node();
        let constants = StringConstants::collect(&root, source);

        let default_class = constants
            .get(&self.conventions.default_class_constant)
            .map(str::to_string);

        let mut registered = Vec::new();
        visit(root, &mut |node| {
            let Some(argument) = self.registration_argument(&node, source) else {
                return;
            };
            match constants.evaluate(&argument, source) {
                Some(class_name) => registered.push(class_name),
                None => debug!(
                    "Skipping style registration with non-static argument: {}",
                    node_text(&argument, source)
                ),
            }
        });

        assemble_styles(default_class, registered)
    }

    /// First argument of a call to a configured style registrar.
    fn registration_argument<'t>(&self, node: &Node<'t>, source: &str) -> Option<Node<'t>> {
        if node.kind() != "call_expression" {
            return None;
        }
        let callee = node.child_by_field_name("function")?;
        let callee_name = match callee.kind() {
            "identifier" => node_text(&callee, source),
            "member_expression" => field_text(&callee, "property", source)?,
            _ => return None,
        };
        if !self.conventions.is_style_registrar(callee_name.trim()) {
            return None;
        }
        let arguments = node.child_by_field_name("arguments")?;
        named_children(&arguments).into_iter().next()
    }
}

/// Default first, then de-duplicated registrations in first-seen order.
fn assemble_styles(
    default_class: Option<String>,
    registered: Vec<String>,
) -> Result<Vec<StyleDescriptor>> {
    let registered: Vec<String> = registered
        .into_iter()
        .filter(|class_name| !class_name.trim().is_empty())
        .collect();

    let default_class = default_class
        .or_else(|| registered.first().cloned())
        .ok_or_else(|| CompdocError::unavailable(Facet::Styles))?;

    let mut styles = vec![StyleDescriptor::default_class(default_class.as_str())];
    for class_name in registered {
        if styles.iter().any(|s| s.class_name == class_name) {
            continue;
        }
        styles.push(StyleDescriptor::new(class_name));
    }

    Ok(styles)
}

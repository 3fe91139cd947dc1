use crate::config::ExclusionConfig;
use compdoc_common::ConcreteDocument;
use std::collections::HashMap;
use tracing::debug;

/// Removes configured members from an assembled document.
///
/// Applying the policy twice leaves the document unchanged.
pub struct FilterPolicy<'c> {
    exclusions: &'c ExclusionConfig,
}

impl<'c> FilterPolicy<'c> {
    pub fn new(exclusions: &'c ExclusionConfig) -> Self {
        Self { exclusions }
    }

    pub fn apply(&self, doc: &mut ConcreteDocument) {
        let component = doc.component_name.as_str();
        let props = &self.exclusions.props;
        let methods = &self.exclusions.methods;
        let styles = &self.exclusions.styles;

        let before = (
            doc.facets.props.len(),
            doc.facets.methods.len(),
            doc.facets.styles.len(),
        );

        doc.facets.props.retain(|prop| {
            !(contains(&props.global, &prop.name)
                || (prop.inherited && contains(&props.inherited, &prop.name))
                || overridden(&props.overrides, component, &prop.name))
        });
        doc.facets.methods.retain(|method| {
            !(contains(&methods.global, &method.name)
                || overridden(&methods.overrides, component, &method.name))
        });
        doc.facets.styles.retain(|style| {
            !(contains(&styles.global, &style.class_name)
                || overridden(&styles.overrides, component, &style.class_name))
        });

        debug!(
            "Filtered {}: {} props, {} methods, {} styles removed",
            component,
            before.0 - doc.facets.props.len(),
            before.1 - doc.facets.methods.len(),
            before.2 - doc.facets.styles.len()
        );
    }
}

fn contains(list: &[String], name: &str) -> bool {
    list.iter().any(|entry| entry == name)
}

fn overridden(overrides: &HashMap<String, Vec<String>>, component: &str, name: &str) -> bool {
    overrides
        .get(component)
        .map(|names| contains(names, name))
        .unwrap_or(false)
}

use compdoc_common::PropertyDescriptor;
use serde::{Deserialize, Serialize};

/// The property-bag declaration found in one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyBag {
    /// Declared name of the bag (`AnchorProps`).
    pub name: String,
    pub properties: Vec<PropertyDescriptor>,
    /// Parent type named in the `extends` clause, type arguments stripped.
    pub parent: Option<String>,
}

/// Library-specific names the parser looks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParserConventions {
    /// Lifecycle hooks and internal helpers never reported as methods.
    pub internal_methods: Vec<String>,
    /// Constant holding the component's default style class.
    pub default_class_constant: String,
    /// Functions or methods whose first argument registers a style class.
    pub style_registrars: Vec<String>,
    /// Methods whose calls in compiled output emit an event.
    pub event_emitters: Vec<String>,
}

impl Default for ParserConventions {
    fn default() -> Self {
        Self {
            internal_methods: vec![
                "constructor".to_string(),
                "render".to_string(),
                "connectedCallback".to_string(),
                "disconnectedCallback".to_string(),
                "attributeChangedCallback".to_string(),
                "componentDidMount".to_string(),
                "componentDidUpdate".to_string(),
                "componentWillUnmount".to_string(),
                "shouldComponentUpdate".to_string(),
                "firstUpdated".to_string(),
                "updated".to_string(),
                "willUpdate".to_string(),
            ],
            default_class_constant: "DEFAULT_CLASS".to_string(),
            style_registrars: vec!["addStyle".to_string()],
            event_emitters: vec!["emit".to_string(), "fireEvent".to_string()],
        }
    }
}

impl ParserConventions {
    pub fn is_internal_method(&self, name: &str) -> bool {
        self.internal_methods.iter().any(|m| m == name)
    }

    pub fn is_style_registrar(&self, name: &str) -> bool {
        self.style_registrars.iter().any(|r| r == name)
    }

    pub fn is_event_emitter(&self, name: &str) -> bool {
        self.event_emitters.iter().any(|e| e == name)
    }
}

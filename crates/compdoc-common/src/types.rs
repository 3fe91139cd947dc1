use serde::{Deserialize, Serialize, Serializer};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Type tag carried by every event; events are always callables.
pub const CALLABLE_EVENT_TYPE: &str = "function";

/// Description attached to the component's default style class.
pub const DEFAULT_STYLE_DESCRIPTION: &str = "Default style class";

/// Recovered-source mapping emitted next to a build artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMapArtifact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub sources_content: Vec<Option<String>>,
}

/// One configurable attribute of a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub type_annotation: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default)]
    pub inherited: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherited_from: Option<String>,
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<String>, type_annotation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_annotation: type_annotation.into(),
            optional: false,
            default: None,
            inherited: false,
            inherited_from: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Tag the property as contributed by the ancestor type `origin`.
    pub fn inherit_from(mut self, origin: &str) -> Self {
        self.inherited = true;
        self.inherited_from = Some(origin.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_annotation: String,
    #[serde(default)]
    pub optional: bool,
}

/// An externally callable member of the component class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDescriptor {
    pub name: String,
    pub parameters: Vec<MethodParameter>,
    pub return_type: String,
}

/// Where an event description was inferred from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventSource {
    Property,
    CallSite,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub event_type: String,
    /// Rendered parameter list without the surrounding parentheses.
    pub parameters: String,
    pub source: EventSource,
}

impl EventDescriptor {
    pub fn new(
        name: impl Into<String>,
        parameters: impl Into<String>,
        source: EventSource,
    ) -> Self {
        Self {
            name: name.into(),
            event_type: CALLABLE_EVENT_TYPE.to_string(),
            parameters: parameters.into(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDescriptor {
    pub class_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl StyleDescriptor {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            description: None,
        }
    }

    pub fn default_class(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            description: Some(DEFAULT_STYLE_DESCRIPTION.to_string()),
        }
    }

    pub fn is_default(&self) -> bool {
        self.description.as_deref() == Some(DEFAULT_STYLE_DESCRIPTION)
    }
}

/// The four member lists an alias shares with its source component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentFacets {
    pub props: Vec<PropertyDescriptor>,
    pub methods: Vec<MethodDescriptor>,
    pub events: Vec<EventDescriptor>,
    pub styles: Vec<StyleDescriptor>,
}

/// A component whose facets were extracted from its own artifacts.
#[derive(Debug, Clone, PartialEq)]
pub struct ConcreteDocument {
    pub component_name: String,
    pub location: PathBuf,
    pub category: String,
    pub facets: ComponentFacets,
    pub base_class: Option<String>,
    pub children: Vec<ComponentDocument>,
}

impl ConcreteDocument {
    pub fn new(
        component_name: impl Into<String>,
        location: impl Into<PathBuf>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            component_name: component_name.into(),
            location: location.into(),
            category: category.into(),
            facets: ComponentFacets::default(),
            base_class: None,
            children: Vec::new(),
        }
    }
}

/// Another component's facets published under a different name.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasDocument {
    pub component_name: String,
    pub description: String,
    pub source: Arc<ConcreteDocument>,
}

impl AliasDocument {
    pub fn new(component_name: impl Into<String>, source: Arc<ConcreteDocument>) -> Self {
        let component_name = component_name.into();
        let description = format!(
            "{} is an alias of {} and shares its properties, methods, events and styles.",
            component_name, source.component_name
        );
        Self {
            component_name,
            description,
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComponentDocument {
    Concrete(ConcreteDocument),
    Alias(AliasDocument),
}

impl ComponentDocument {
    pub fn name(&self) -> &str {
        match self {
            ComponentDocument::Concrete(doc) => &doc.component_name,
            ComponentDocument::Alias(alias) => &alias.component_name,
        }
    }

    pub fn facets(&self) -> &ComponentFacets {
        match self {
            ComponentDocument::Concrete(doc) => &doc.facets,
            ComponentDocument::Alias(alias) => &alias.source.facets,
        }
    }

    pub fn props(&self) -> &[PropertyDescriptor] {
        &self.facets().props
    }

    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.facets().methods
    }

    pub fn events(&self) -> &[EventDescriptor] {
        &self.facets().events
    }

    pub fn styles(&self) -> &[StyleDescriptor] {
        &self.facets().styles
    }

    fn concrete(&self) -> &ConcreteDocument {
        match self {
            ComponentDocument::Concrete(doc) => doc,
            ComponentDocument::Alias(alias) => &alias.source,
        }
    }

    pub fn location(&self) -> &Path {
        &self.concrete().location
    }

    pub fn category(&self) -> &str {
        &self.concrete().category
    }

    pub fn base_class(&self) -> Option<&str> {
        self.concrete().base_class.as_deref()
    }

    /// Nested child documents. Aliases project facets only, never children.
    pub fn children(&self) -> &[ComponentDocument] {
        match self {
            ComponentDocument::Concrete(doc) => &doc.children,
            ComponentDocument::Alias(_) => &[],
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            ComponentDocument::Concrete(_) => None,
            ComponentDocument::Alias(alias) => Some(&alias.description),
        }
    }

    pub fn alias_of(&self) -> Option<&str> {
        match self {
            ComponentDocument::Concrete(_) => None,
            ComponentDocument::Alias(alias) => Some(&alias.source.component_name),
        }
    }

    pub fn is_alias(&self) -> bool {
        matches!(self, ComponentDocument::Alias(_))
    }

    fn record(&self) -> DocumentRecord<'_> {
        let facets = self.facets();
        DocumentRecord {
            component_name: self.name(),
            location: self.location(),
            category: self.category(),
            props: &facets.props,
            methods: &facets.methods,
            events: &facets.events,
            styles: &facets.styles,
            base_class: self.base_class(),
            children: self.children(),
            description: self.description(),
            alias_of: self.alias_of(),
        }
    }
}

/// Flat serialized shape shared by concrete and alias documents.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentRecord<'a> {
    component_name: &'a str,
    location: &'a Path,
    category: &'a str,
    props: &'a [PropertyDescriptor],
    methods: &'a [MethodDescriptor],
    events: &'a [EventDescriptor],
    styles: &'a [StyleDescriptor],
    #[serde(skip_serializing_if = "Option::is_none")]
    base_class: Option<&'a str>,
    #[serde(skip_serializing_if = "is_empty_slice")]
    children: &'a [ComponentDocument],
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alias_of: Option<&'a str>,
}

fn is_empty_slice<T>(items: &&[T]) -> bool {
    items.is_empty()
}

impl Serialize for ComponentDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.record().serialize(serializer)
    }
}

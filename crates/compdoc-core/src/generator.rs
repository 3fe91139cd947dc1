//! Per-run generation context.
//!
//! A `Generator` assembles one document per candidate: properties with their
//! inherited chain, methods, styles, synthesized events, then the exclusion
//! policy, then configured children. One bad source never stops the run.

use crate::config::GeneratorConfig;
use crate::discovery::discover_components;
use crate::events::synthesize_events;
use crate::filter::FilterPolicy;
use crate::inheritance::{ArtifactIndex, InheritanceResolver, RootPropertyCache};
use crate::source_map;
use crate::types::{Candidate, CandidateKind};
use compdoc_common::{
    AliasDocument, CompdocError, ComponentDocument, ConcreteDocument, EventDescriptor, Facet,
    PropertyDescriptor, Result, StyleDescriptor,
};
use compdoc_parsers::{events_from_properties, TypeScriptStructureParser};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn, Level};

pub struct Generator {
    library_root: PathBuf,
    config: GeneratorConfig,
    parser: TypeScriptStructureParser,
    artifacts: ArtifactIndex,
    root_cache: RootPropertyCache,
    generated: HashMap<String, Arc<ConcreteDocument>>,
}

impl Generator {
    pub fn new(library_root: impl Into<PathBuf>, config: GeneratorConfig) -> Self {
        let library_root = library_root.into();
        Self {
            parser: TypeScriptStructureParser::with_conventions(config.conventions.clone()),
            artifacts: ArtifactIndex::new(&library_root, &config),
            root_cache: RootPropertyCache::new(),
            generated: HashMap::new(),
            library_root,
            config,
        }
    }

    /// Seed the root type's properties instead of loading them from the library.
    pub fn with_root_properties(mut self, properties: Vec<PropertyDescriptor>) -> Self {
        let root_type = self.config.inheritance.root_type.clone();
        self.root_cache.seed(&root_type, properties);
        self
    }

    pub fn discover(&self) -> Vec<Candidate> {
        discover_components(&self.library_root, &self.config)
    }

    /// Generate every candidate in discovery order; aliases come last.
    pub fn generate_all(&mut self) -> Vec<ComponentDocument> {
        let start = Instant::now();
        let candidates = self.discover();
        let (components, aliases): (Vec<&Candidate>, Vec<&Candidate>) =
            candidates.iter().partition(|c| !c.is_alias());

        let docs: Vec<ComponentDocument> = components
            .into_iter()
            .chain(aliases)
            .map(|candidate| self.generate(candidate))
            .collect();

        info!(
            "Generated {} documents in {}ms",
            docs.len(),
            start.elapsed().as_millis()
        );
        docs
    }

    pub fn generate(&mut self, candidate: &Candidate) -> ComponentDocument {
        match &candidate.kind {
            CandidateKind::Component => {
                let doc = self.generate_component(
                    &candidate.name,
                    &candidate.location,
                    &candidate.category,
                );
                let doc = Arc::new(doc);
                self.generated.insert(candidate.name.clone(), Arc::clone(&doc));
                ComponentDocument::Concrete(doc.as_ref().clone())
            }
            CandidateKind::Alias { source } => {
                let source_doc = match self.generated.get(source) {
                    Some(doc) => Arc::clone(doc),
                    None => {
                        debug!("Generating alias source {} for {}", source, candidate.name);
                        let doc = Arc::new(self.generate_component(
                            source,
                            &candidate.location,
                            &candidate.category,
                        ));
                        self.generated.insert(source.clone(), Arc::clone(&doc));
                        doc
                    }
                };
                ComponentDocument::Alias(AliasDocument::new(candidate.name.as_str(), source_doc))
            }
        }
    }

    /// Assemble the concrete document for the component in `dir`.
    ///
    /// Artifacts are looked up as `<dir>/<name><suffix>`.
    pub fn generate_component(
        &mut self,
        name: &str,
        dir: &Path,
        category: &str,
    ) -> ConcreteDocument {
        let mut path = Vec::new();
        self.generate_on_path(name, dir, category, &mut path)
    }

    fn generate_on_path(
        &mut self,
        name: &str,
        dir: &Path,
        category: &str,
        path: &mut Vec<PathBuf>,
    ) -> ConcreteDocument {
        debug!("Generating {} from {:?}", name, dir);
        path.push(canonical(dir));

        let mut doc = ConcreteDocument::new(name, dir, category);

        let (props, base_class) = self.collect_properties(name, dir);
        doc.facets.props = props;
        doc.base_class = base_class;

        let component_artifact = self.config.naming.component_artifact(dir, name);
        let component_source = match source_map::primary_source_text(&component_artifact) {
            Ok(source) => Some(source),
            Err(err) => {
                report_absent(name, &err);
                None
            }
        };
        if let Some(source) = &component_source {
            doc.facets.methods =
                facet_or_empty(name, Facet::Methods, self.parser.extract_methods(source));
        }
        doc.facets.styles = self.collect_styles(name, dir, component_source.as_deref());

        doc.facets.events = synthesize_events(
            events_from_properties(&doc.facets.props),
            self.call_site_events(name, dir),
        );

        FilterPolicy::new(&self.config.exclusions).apply(&mut doc);

        let children = self.config.children_of(name).to_vec();
        for child in children {
            let child_dir = dir.join(&child.path);
            if !child_dir.is_dir() {
                warn!("{}", CompdocError::MissingChild { path: child_dir });
                continue;
            }
            if path.contains(&canonical(&child_dir)) {
                warn!(
                    "Child {} of {} re-enters {:?}, skipping",
                    child.name, name, child_dir
                );
                continue;
            }
            let child_doc = self.generate_on_path(&child.name, &child_dir, category, path);
            doc.children.push(ComponentDocument::Concrete(child_doc));
        }

        path.pop();
        info!(
            "{}: {} props, {} methods, {} events, {} styles, {} children",
            name,
            doc.facets.props.len(),
            doc.facets.methods.len(),
            doc.facets.events.len(),
            doc.facets.styles.len(),
            doc.children.len()
        );
        doc
    }

    /// Own and inherited properties plus the declared base type.
    fn collect_properties(
        &mut self,
        name: &str,
        dir: &Path,
    ) -> (Vec<PropertyDescriptor>, Option<String>) {
        let artifact = self.config.naming.props_artifact(dir, name);
        let bag = source_map::primary_source_text(&artifact)
            .and_then(|source| self.parser.extract_properties(&source));
        let bag = match bag {
            Ok(bag) => bag,
            Err(err) => {
                report_absent(name, &err);
                return (Vec::new(), None);
            }
        };
        if tracing::enabled!(Level::DEBUG) {
            if let Ok(original) = source_map::primary_source_name(&artifact) {
                debug!("{}: properties declared in {}", name, original);
            }
        }

        let mut resolver = InheritanceResolver {
            parser: &self.parser,
            settings: &self.config.inheritance,
            artifacts: &self.artifacts,
            root_cache: &mut self.root_cache,
        };
        (resolver.collect(&bag), bag.parent)
    }

    /// Styles from the style-registration artifact, else from the component source.
    fn collect_styles(
        &self,
        name: &str,
        dir: &Path,
        component_source: Option<&str>,
    ) -> Vec<StyleDescriptor> {
        let artifact = self.config.naming.styles_artifact(dir, name);
        match source_map::primary_source_text(&artifact) {
            Ok(source) => match self.parser.extract_styles(&source) {
                Ok(styles) => return styles,
                Err(err) => debug!("{}: {}, trying component source", name, err),
            },
            Err(err) => debug!("{}: {}", name, err),
        }

        match component_source {
            Some(source) => {
                facet_or_empty(name, Facet::Styles, self.parser.extract_styles(source))
            }
            None => Vec::new(),
        }
    }

    fn call_site_events(&self, name: &str, dir: &Path) -> Vec<EventDescriptor> {
        let compiled = self.config.naming.compiled_output(dir, name);
        match fs::read_to_string(&compiled) {
            Ok(content) => facet_or_empty(
                name,
                Facet::Events,
                self.parser.events_from_call_sites(&content),
            ),
            Err(err) => {
                debug!("No compiled output for {} at {:?}: {}", name, compiled, err);
                Vec::new()
            }
        }
    }
}

fn facet_or_empty<T>(component: &str, facet: Facet, result: Result<Vec<T>>) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(err) => {
            if err.is_absent() {
                debug!("{}: no {} found", component, facet);
            } else {
                warn!("{}: {} extraction failed: {}", component, facet, err);
            }
            Vec::new()
        }
    }
}

fn report_absent(component: &str, err: &CompdocError) {
    if err.is_absent() {
        debug!("{}: {}", component, err);
    } else {
        warn!("{}: {}", component, err);
    }
}

fn canonical(dir: &Path) -> PathBuf {
    fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf())
}

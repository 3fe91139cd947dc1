//! Property inheritance.
//!
//! A property bag's `extends` chain is followed across artifacts until the
//! configured root type. Ancestor artifacts are located by deriving file stems
//! from the type name (`UiButtonProps` → `uibuttonprops`, `ui-button-props`,
//! `buttonprops`, `button-props`).

use crate::config::{GeneratorConfig, InheritanceConfig};
use crate::discovery::walk_library;
use crate::source_map;
use compdoc_common::{CompdocError, PropertyDescriptor, Result};
use compdoc_parsers::{PropertyBag, TypeScriptStructureParser};
use regex::Regex;
use std::cell::OnceCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info, warn};

static LOWER_TO_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());
static ACRONYM_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").unwrap());

/// One way of turning a type name into an artifact file stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StemStrategy {
    Lowercase,
    Kebab,
    PrefixStrippedLowercase,
    PrefixStrippedKebab,
}

impl StemStrategy {
    /// Strategies in the order they are tried.
    pub const ALL: [StemStrategy; 4] = [
        StemStrategy::Lowercase,
        StemStrategy::Kebab,
        StemStrategy::PrefixStrippedLowercase,
        StemStrategy::PrefixStrippedKebab,
    ];

    pub fn apply(self, type_name: &str, prefixes: &[String]) -> Option<String> {
        match self {
            StemStrategy::Lowercase => Some(type_name.to_lowercase()),
            StemStrategy::Kebab => Some(to_kebab(type_name)),
            StemStrategy::PrefixStrippedLowercase => {
                strip_prefix(type_name, prefixes).map(str::to_lowercase)
            }
            StemStrategy::PrefixStrippedKebab => strip_prefix(type_name, prefixes).map(to_kebab),
        }
    }
}

/// Every distinct stem for `type_name`, in strategy order.
pub fn candidate_stems(type_name: &str, prefixes: &[String]) -> Vec<String> {
    let mut stems: Vec<String> = Vec::new();
    for stem in StemStrategy::ALL
        .iter()
        .filter_map(|strategy| strategy.apply(type_name, prefixes))
    {
        if !stem.is_empty() && !stems.contains(&stem) {
            stems.push(stem);
        }
    }
    stems
}

pub fn to_kebab(name: &str) -> String {
    let spaced = ACRONYM_BOUNDARY.replace_all(name, "$1-$2");
    LOWER_TO_UPPER
        .replace_all(&spaced, "$1-$2")
        .to_lowercase()
}

fn strip_prefix<'n>(type_name: &'n str, prefixes: &[String]) -> Option<&'n str> {
    prefixes
        .iter()
        .filter_map(|prefix| type_name.strip_prefix(prefix.as_str()))
        .find(|rest| !rest.is_empty())
}

/// Artifact files under the configured search roots, indexed by file name on
/// first use.
#[derive(Debug)]
pub struct ArtifactIndex {
    search_roots: Vec<PathBuf>,
    ignored_directories: Vec<String>,
    extension: String,
    files: OnceCell<HashMap<String, PathBuf>>,
}

impl ArtifactIndex {
    pub fn new(library_root: &Path, config: &GeneratorConfig) -> Self {
        Self {
            search_roots: config
                .inheritance
                .search_roots
                .iter()
                .map(|root| library_root.join(root))
                .collect(),
            ignored_directories: config.ignored_directories.clone(),
            extension: config.naming.artifact_extension.clone(),
            files: OnceCell::new(),
        }
    }

    /// First artifact named `<stem><extension>`, searching roots in order.
    pub fn find(&self, stem: &str) -> Option<&Path> {
        let file_name = format!("{}{}", stem, self.extension);
        self.files().get(&file_name).map(PathBuf::as_path)
    }

    fn files(&self) -> &HashMap<String, PathBuf> {
        self.files.get_or_init(|| {
            let mut files = HashMap::new();
            for root in &self.search_roots {
                if !root.is_dir() {
                    debug!("Search root {:?} does not exist", root);
                    continue;
                }
                for entry in walk_library(root, &self.ignored_directories) {
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    let name = entry.file_name().to_string_lossy().to_string();
                    if name.ends_with(&self.extension) {
                        files.entry(name).or_insert_with(|| entry.path().to_path_buf());
                    }
                }
            }
            debug!("Indexed {} ancestor artifacts", files.len());
            files
        })
    }
}

/// Properties of the root base type, loaded at most once per run.
#[derive(Debug, Default)]
pub struct RootPropertyCache {
    properties: Option<Vec<PropertyDescriptor>>,
}

impl RootPropertyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the cache. Properties are tagged with `root_type` as origin.
    pub fn seed(&mut self, root_type: &str, properties: Vec<PropertyDescriptor>) {
        self.properties = Some(
            properties
                .into_iter()
                .map(|p| p.inherit_from(root_type))
                .collect(),
        );
    }

    #[cfg(test)]
    fn get(&self) -> Option<&[PropertyDescriptor]> {
        self.properties.as_deref()
    }

    pub fn get_or_load<F>(&mut self, load: F) -> &[PropertyDescriptor]
    where
        F: FnOnce() -> Vec<PropertyDescriptor>,
    {
        self.properties.get_or_insert_with(load)
    }
}

/// Follows `extends` chains for one run.
pub struct InheritanceResolver<'g> {
    pub parser: &'g TypeScriptStructureParser,
    pub settings: &'g InheritanceConfig,
    pub artifacts: &'g ArtifactIndex,
    pub root_cache: &'g mut RootPropertyCache,
}

impl InheritanceResolver<'_> {
    /// Own properties followed by every inherited property not shadowed by a
    /// nearer declaration.
    pub fn collect(&mut self, bag: &PropertyBag) -> Vec<PropertyDescriptor> {
        let mut properties = bag.properties.clone();
        for inherited in self.resolve(bag.parent.as_deref()) {
            if properties.iter().any(|p| p.name == inherited.name) {
                debug!(
                    "{} from {:?} is shadowed by a nearer declaration",
                    inherited.name, inherited.inherited_from
                );
                continue;
            }
            properties.push(inherited);
        }
        properties
    }

    /// Inherited properties starting at `parent`, nearer ancestors first.
    pub fn resolve(&mut self, parent: Option<&str>) -> Vec<PropertyDescriptor> {
        let mut inherited = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut current = parent.map(str::to_string);

        while let Some(type_name) = current.take() {
            if !visited.insert(type_name.clone()) {
                warn!("Inheritance cycle at {}, truncating chain", type_name);
                break;
            }

            if type_name == self.settings.root_type {
                inherited.extend(self.root_properties().iter().cloned());
                break;
            }

            let bag = match self.load_ancestor(&type_name) {
                Ok(bag) => bag,
                Err(err) => {
                    warn!("{}", err);
                    break;
                }
            };
            inherited.extend(
                bag.properties
                    .into_iter()
                    .map(|p| p.inherit_from(&type_name)),
            );
            current = bag.parent;
        }

        inherited
    }

    fn locate(&self, type_name: &str) -> Option<&Path> {
        candidate_stems(type_name, &self.settings.prefixes)
            .iter()
            .find_map(|stem| self.artifacts.find(stem))
    }

    fn load_ancestor(&self, type_name: &str) -> Result<PropertyBag> {
        let artifact = self
            .locate(type_name)
            .ok_or_else(|| CompdocError::UnresolvedAncestor {
                type_name: type_name.to_string(),
            })?;
        debug!("Resolved {} to {:?}", type_name, artifact);
        let source = source_map::primary_source_text(artifact)?;
        self.parser.extract_properties(&source)
    }

    fn root_properties(&mut self) -> &[PropertyDescriptor] {
        let parser = self.parser;
        let settings = self.settings;
        let artifacts = self.artifacts;
        self.root_cache.get_or_load(|| {
            RootLoader {
                parser,
                settings,
                artifacts,
            }
            .load()
        })
    }
}

struct RootLoader<'g> {
    parser: &'g TypeScriptStructureParser,
    settings: &'g InheritanceConfig,
    artifacts: &'g ArtifactIndex,
}

impl RootLoader<'_> {
    fn load(&self) -> Vec<PropertyDescriptor> {
        let root_type = &self.settings.root_type;
        let artifact = candidate_stems(root_type, &self.settings.prefixes)
            .iter()
            .find_map(|stem| self.artifacts.find(stem));
        let Some(artifact) = artifact else {
            warn!(
                "{}",
                CompdocError::UnresolvedAncestor {
                    type_name: root_type.clone()
                }
            );
            return Vec::new();
        };

        match source_map::primary_source_text(artifact)
            .and_then(|source| self.parser.extract_properties(&source))
        {
            Ok(bag) => {
                info!("Loaded {} root properties from {:?}", bag.properties.len(), artifact);
                bag.properties
                    .into_iter()
                    .map(|p| p.inherit_from(root_type))
                    .collect()
            }
            Err(err) => {
                warn!("Cannot load root type {}: {}", root_type, err);
                Vec::new()
            }
        }
    }
}

//! Generator configuration.
//!
//! Every field has a default, so a partial JSON file (or none at all) yields a
//! usable configuration.

use anyhow::{Context, Result};
use compdoc_common::CompdocError;
use compdoc_parsers::ParserConventions;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Allow-list of component directory names.
    pub components: Vec<String>,
    /// Keep every discovered component regardless of the allow-list.
    pub include_all: bool,
    /// Component name to its ordered child entries.
    pub children: HashMap<String, Vec<ChildEntry>>,
    /// Alias name to source component name.
    pub aliases: BTreeMap<String, String>,
    pub exclusions: ExclusionConfig,
    pub inheritance: InheritanceConfig,
    pub naming: NamingConfig,
    pub conventions: ParserConventions,
    /// Extra directory names skipped during every walk.
    pub ignored_directories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildEntry {
    pub name: String,
    /// Directory relative to the parent component's directory.
    pub path: PathBuf,
}

impl ChildEntry {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusionConfig {
    pub props: PropertyExclusions,
    pub methods: MemberExclusions,
    pub styles: MemberExclusions,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyExclusions {
    /// Dropped from every component.
    pub global: Vec<String>,
    /// Dropped only when inherited.
    pub inherited: Vec<String>,
    /// Component name to names dropped from that component.
    pub overrides: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberExclusions {
    pub global: Vec<String>,
    pub overrides: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InheritanceConfig {
    /// Base type every property chain ends at.
    pub root_type: String,
    /// Organizational prefixes stripped when locating ancestor artifacts.
    pub prefixes: Vec<String>,
    /// Library subdirectories searched for ancestor artifacts, in order.
    /// Relative entries are resolved against the library root.
    pub search_roots: Vec<PathBuf>,
}

impl Default for InheritanceConfig {
    fn default() -> Self {
        Self {
            root_type: "BaseProps".to_string(),
            prefixes: Vec::new(),
            search_roots: vec![PathBuf::from("components"), PathBuf::from("base")],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NamingConfig {
    /// Property artifact name after the directory name (`anchor-props.js.map`).
    pub props_suffix: String,
    /// Component artifact name after the directory name (`anchor.js.map`).
    pub component_suffix: String,
    /// Style-registration artifact name after the directory name
    /// (`anchor.styles.js.map`). Styles fall back to the component artifact.
    pub styles_suffix: String,
    /// Compiled output name after the directory name (`anchor.js`).
    pub compiled_suffix: String,
    /// Extension appended to a stem when searching for ancestor artifacts.
    pub artifact_extension: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            props_suffix: "-props.js.map".to_string(),
            component_suffix: ".js.map".to_string(),
            styles_suffix: ".styles.js.map".to_string(),
            compiled_suffix: ".js".to_string(),
            artifact_extension: ".js.map".to_string(),
        }
    }
}

impl NamingConfig {
    pub fn props_artifact(&self, dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{}{}", name, self.props_suffix))
    }

    pub fn component_artifact(&self, dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{}{}", name, self.component_suffix))
    }

    pub fn styles_artifact(&self, dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{}{}", name, self.styles_suffix))
    }

    pub fn compiled_output(&self, dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{}{}", name, self.compiled_suffix))
    }
}

/// Directories never descended into.
pub const DEPENDENCY_DIRECTORIES: &[&str] = &["node_modules", "bower_components", "jspm_packages"];

/// Hidden, dependency-manager and explicitly ignored directories.
pub fn is_ignored_directory(name: &str, extra: &[String]) -> bool {
    name.starts_with('.')
        || DEPENDENCY_DIRECTORIES.contains(&name)
        || extra.iter().any(|d| d == name)
}

impl GeneratorConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_json(&content).with_context(|| format!("Invalid config file {:?}", path))
    }

    pub fn from_json(content: &str) -> compdoc_common::Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make every lookup miss.
    pub fn validate(&self) -> compdoc_common::Result<()> {
        if self.inheritance.root_type.trim().is_empty() {
            return Err(CompdocError::Config("inheritance.rootType is empty".to_string()));
        }
        let naming = [
            ("propsSuffix", &self.naming.props_suffix),
            ("componentSuffix", &self.naming.component_suffix),
            ("stylesSuffix", &self.naming.styles_suffix),
            ("compiledSuffix", &self.naming.compiled_suffix),
            ("artifactExtension", &self.naming.artifact_extension),
        ];
        if let Some((field, _)) = naming.iter().find(|(_, value)| value.is_empty()) {
            return Err(CompdocError::Config(format!("naming.{} is empty", field)));
        }
        if self.naming.props_suffix == self.naming.component_suffix {
            return Err(CompdocError::Config(
                "naming.propsSuffix and naming.componentSuffix must differ".to_string(),
            ));
        }
        if self.naming.styles_suffix == self.naming.props_suffix
            || self.naming.styles_suffix == self.naming.component_suffix
        {
            return Err(CompdocError::Config(
                "naming.stylesSuffix must differ from the other suffixes".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_ignored_directory(&self, name: &str) -> bool {
        is_ignored_directory(name, &self.ignored_directories)
    }

    pub fn children_of(&self, component: &str) -> &[ChildEntry] {
        self.children
            .get(component)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = GeneratorConfig::from_json("{}").unwrap();
        assert!(config.components.is_empty());
        assert!(!config.include_all);
        assert_eq!(config.inheritance.root_type, "BaseProps");
        assert_eq!(config.naming.props_suffix, "-props.js.map");
        assert_eq!(config.conventions.default_class_constant, "DEFAULT_CLASS");
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{
            "components": ["anchor", "button"],
            "aliases": { "link": "anchor" },
            "children": { "tabs": [{ "name": "tab", "path": "tab" }] },
            "exclusions": {
                "props": { "global": ["style"], "inherited": ["id"], "overrides": { "anchor": ["href"] } },
                "methods": { "global": ["destroy"] }
            },
            "inheritance": { "rootType": "UiBaseProps", "prefixes": ["Ui"] },
            "conventions": { "eventEmitters": ["dispatch"] },
            "ignoredDirectories": ["dist"]
        }"#;
        let config = GeneratorConfig::from_json(json).unwrap();

        assert_eq!(config.components, vec!["anchor", "button"]);
        assert_eq!(config.aliases.get("link").map(String::as_str), Some("anchor"));
        assert_eq!(config.children_of("tabs"), &[ChildEntry::new("tab", "tab")]);
        assert!(config.children_of("anchor").is_empty());
        assert_eq!(config.exclusions.props.inherited, vec!["id"]);
        assert_eq!(config.exclusions.methods.global, vec!["destroy"]);
        assert!(config.exclusions.styles.global.is_empty());
        assert_eq!(config.inheritance.root_type, "UiBaseProps");
        assert_eq!(config.inheritance.search_roots.len(), 2);
        assert_eq!(config.conventions.event_emitters, vec!["dispatch"]);
        assert_eq!(config.conventions.style_registrars, vec!["addStyle"]);
        assert!(config.is_ignored_directory("dist"));
        assert!(config.is_ignored_directory("node_modules"));
        assert!(config.is_ignored_directory(".cache"));
        assert!(!config.is_ignored_directory("anchor"));
    }

    #[test]
    fn test_from_file_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = GeneratorConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
        assert!(matches!(
            err.downcast_ref::<CompdocError>(),
            Some(CompdocError::Json(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_naming() {
        let err =
            GeneratorConfig::from_json(r#"{ "naming": { "compiledSuffix": "" } }"#).unwrap_err();
        assert!(err.to_string().contains("naming.compiledSuffix is empty"));

        let err =
            GeneratorConfig::from_json(r#"{ "inheritance": { "rootType": " " } }"#).unwrap_err();
        assert!(err.to_string().contains("rootType"));

        let err = GeneratorConfig::from_json(r#"{ "naming": { "stylesSuffix": ".js.map" } }"#)
            .unwrap_err();
        assert!(err.to_string().contains("stylesSuffix"));
    }

    #[test]
    fn test_styles_artifact_path() {
        let naming = NamingConfig::default();
        let dir = Path::new("/lib/components/navigation/anchor");
        assert_eq!(
            naming.styles_artifact(dir, "anchor"),
            dir.join("anchor.styles.js.map")
        );
    }
}

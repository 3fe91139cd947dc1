//! Component discovery under `<library>/components/<group>/<component>`.

use crate::config::{is_ignored_directory, GeneratorConfig};
use crate::types::Candidate;
use std::path::{Component, Path};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Sorted walk that never enters hidden, dependency or ignored directories.
pub(crate) fn walk_library<'a>(
    root: &Path,
    ignored: &'a [String],
) -> impl Iterator<Item = DirEntry> + 'a {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !is_ignored_directory(&entry.file_name().to_string_lossy(), ignored)
        })
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("Error walking directory: {}", err);
                None
            }
        })
}

/// Check whether `dir` holds a property or component artifact named after it.
pub fn is_component_dir(dir: &Path, config: &GeneratorConfig) -> bool {
    let Some(name) = dir.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    config.naming.props_artifact(dir, name).is_file()
        || config.naming.component_artifact(dir, name).is_file()
}

/// Find every allow-listed component, then append configured aliases.
pub fn discover_components(library_root: &Path, config: &GeneratorConfig) -> Vec<Candidate> {
    let components_dir = library_root.join("components");
    if !components_dir.is_dir() {
        warn!("No components directory under {:?}", library_root);
        return Vec::new();
    }

    let mut candidates: Vec<Candidate> = Vec::new();
    for entry in walk_library(&components_dir, &config.ignored_directories) {
        // components/<group>/<component>
        if entry.depth() < 2 || !entry.file_type().is_dir() {
            continue;
        }
        let dir = entry.path();
        if !is_component_dir(dir, config) {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        if !config.include_all && !config.components.contains(&name) {
            debug!("Component {} is not in the allow-list", name);
            continue;
        }
        if candidates.iter().any(|c| c.name == name) {
            warn!("Duplicate component {} at {:?}, keeping the first", name, dir);
            continue;
        }

        let category = group_of(dir, &components_dir).unwrap_or_default();
        debug!("Discovered {} in {}", name, category);
        candidates.push(Candidate::component(name, dir, category));
    }

    let component_count = candidates.len();
    for (alias, source) in &config.aliases {
        match candidates[..component_count].iter().find(|c| &c.name == source) {
            Some(source) => {
                let alias = Candidate::alias_of(alias.as_str(), source);
                candidates.push(alias);
            }
            None => debug!("Alias {} skipped: source {} was not discovered", alias, source),
        }
    }

    info!(
        "Discovered {} components and {} aliases",
        component_count,
        candidates.len() - component_count
    );
    candidates
}

fn group_of(dir: &Path, components_dir: &Path) -> Option<String> {
    match dir.strip_prefix(components_dir).ok()?.components().next()? {
        Component::Normal(group) => Some(group.to_string_lossy().to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "{}").unwrap();
    }

    fn library() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(root, "components/navigation/anchor/anchor-props.js.map");
        touch(root, "components/navigation/anchor/anchor.js.map");
        touch(root, "components/inputs/button/button.js.map");
        touch(root, "components/inputs/tabs/tabs-props.js.map");
        touch(root, "components/inputs/tabs/tab/tab-props.js.map");
        touch(root, "components/inputs/empty/readme.md");
        touch(root, "components/inputs/node_modules/dep/dep.js.map");
        touch(root, "components/.cache/hidden/hidden.js.map");
        dir
    }

    fn names(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_allow_list_is_strict() {
        let lib = library();
        let config = GeneratorConfig {
            components: vec!["anchor".to_string(), "tab".to_string(), "missing".to_string()],
            ..GeneratorConfig::default()
        };
        let candidates = discover_components(lib.path(), &config);

        assert_eq!(names(&candidates), vec!["tab", "anchor"]);
        assert_eq!(candidates[1].category, "navigation");
        assert_eq!(candidates[0].category, "inputs");
    }

    #[test]
    fn test_include_all_skips_hidden_and_dependency_dirs() {
        let lib = library();
        let config = GeneratorConfig {
            include_all: true,
            ..GeneratorConfig::default()
        };
        let candidates = discover_components(lib.path(), &config);

        assert_eq!(names(&candidates), vec!["button", "tabs", "tab", "anchor"]);
        assert!(candidates.iter().all(|c| !c.is_alias()));
    }

    #[test]
    fn test_directory_without_artifacts_is_never_a_candidate() {
        let lib = library();
        let config = GeneratorConfig {
            include_all: true,
            ..GeneratorConfig::default()
        };
        let candidates = discover_components(lib.path(), &config);

        assert!(!names(&candidates).contains(&"empty"));
        assert!(!is_component_dir(&lib.path().join("components/inputs/empty"), &config));
    }

    #[test]
    fn test_aliases_follow_discovered_sources() {
        let lib = library();
        let mut config = GeneratorConfig {
            components: vec!["anchor".to_string()],
            ..GeneratorConfig::default()
        };
        config.aliases.insert("link".to_string(), "anchor".to_string());
        config.aliases.insert("pill".to_string(), "button".to_string());

        let candidates = discover_components(lib.path(), &config);

        assert_eq!(names(&candidates), vec!["anchor", "link"]);
        assert!(candidates[1].is_alias());
        assert_eq!(candidates[1].location, candidates[0].location);
        assert_eq!(candidates[1].category, "navigation");
    }
}

//! Optional narrative text attached to a component's document.

use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Supplies hand-written prose keyed by component name. The text is opaque.
pub trait ProseSource {
    fn prose_for(&self, component: &str) -> Option<String>;
}

/// Reads `<dir>/<component>.md`.
pub struct DirectoryProse {
    dir: PathBuf,
}

impl DirectoryProse {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ProseSource for DirectoryProse {
    fn prose_for(&self, component: &str) -> Option<String> {
        let path = self.dir.join(format!("{}.md", component));
        match fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(err) => {
                debug!("No prose for {} at {:?}: {}", component, path, err);
                None
            }
        }
    }
}

pub struct NoProse;

impl ProseSource for NoProse {
    fn prose_for(&self, _component: &str) -> Option<String> {
        None
    }
}

//! Recovers original source text from source-map artifacts.
//!
//! Every failure is reported as `CompdocError::NotFound` so callers can skip
//! the source and keep going.

use compdoc_common::{CompdocError, Result, SourceMapArtifact};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

pub fn load_artifact(path: &Path) -> Result<SourceMapArtifact> {
    let content = fs::read_to_string(path).map_err(|e| {
        debug!("Cannot read artifact {:?}: {}", path, e);
        CompdocError::not_found(path, format!("unreadable artifact ({})", e))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        warn!("Artifact {:?} is not valid JSON: {}", path, e);
        CompdocError::not_found(path, format!("malformed artifact ({})", e))
    })
}

/// Embedded source text at `index`.
pub fn source_text(path: &Path, index: usize) -> Result<String> {
    let artifact = load_artifact(path)?;
    if artifact.sources_content.is_empty() {
        debug!("Artifact {:?} embeds no source content", path);
        return Err(CompdocError::not_found(path, "no embedded source content"));
    }

    match artifact.sources_content.into_iter().nth(index) {
        Some(Some(text)) => Ok(text),
        Some(None) => {
            debug!("Artifact {:?} has a null source at index {}", path, index);
            Err(CompdocError::not_found(path, format!("source {} is null", index)))
        }
        None => {
            warn!("Artifact {:?} has no source at index {}", path, index);
            Err(CompdocError::not_found(path, format!("source index {} out of range", index)))
        }
    }
}

/// Declared source path at `index`.
pub fn source_name(path: &Path, index: usize) -> Result<String> {
    let artifact = load_artifact(path)?;
    artifact.sources.into_iter().nth(index).ok_or_else(|| {
        debug!("Artifact {:?} names no source at index {}", path, index);
        CompdocError::not_found(path, format!("source index {} out of range", index))
    })
}

pub fn primary_source_text(path: &Path) -> Result<String> {
    source_text(path, 0)
}

pub fn primary_source_name(path: &Path) -> Result<String> {
    source_name(path, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_primary_source() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "anchor.js.map",
            r#"{"version":3,"sources":["../src/anchor.ts","x.ts"],"sourcesContent":["export class Anchor {}",null]}"#,
        );

        assert_eq!(primary_source_text(&path).unwrap(), "export class Anchor {}");
        assert_eq!(primary_source_name(&path).unwrap(), "../src/anchor.ts");
        assert_eq!(source_name(&path, 1).unwrap(), "x.ts");
    }

    #[test]
    fn test_failures_are_not_found() {
        let dir = TempDir::new().unwrap();
        let malformed = write(&dir, "bad.js.map", "{ sources: ");
        let empty = write(&dir, "empty.js.map", r#"{"sources":["a.ts"]}"#);
        let nulls = write(&dir, "null.js.map", r#"{"sources":["a.ts"],"sourcesContent":[null]}"#);
        let missing = dir.path().join("missing.js.map");

        for err in [
            primary_source_text(&malformed).unwrap_err(),
            primary_source_text(&empty).unwrap_err(),
            primary_source_text(&nulls).unwrap_err(),
            source_text(&nulls, 3).unwrap_err(),
            primary_source_text(&missing).unwrap_err(),
            source_name(&empty, 1).unwrap_err(),
        ] {
            assert!(matches!(err, CompdocError::NotFound { .. }), "{:?}", err);
        }
    }
}

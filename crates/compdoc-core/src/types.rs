use serde::Serialize;
use std::path::PathBuf;

/// A component directory selected for generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub name: String,
    pub location: PathBuf,
    /// Group directory the component lives under.
    pub category: String,
    pub kind: CandidateKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CandidateKind {
    Component,
    /// Published under `name` with the facets of `source`.
    Alias { source: String },
}

impl Candidate {
    pub fn component(
        name: impl Into<String>,
        location: impl Into<PathBuf>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            category: category.into(),
            kind: CandidateKind::Component,
        }
    }

    /// An alias shares the source candidate's location and category.
    pub fn alias_of(name: impl Into<String>, source: &Candidate) -> Self {
        Self {
            name: name.into(),
            location: source.location.clone(),
            category: source.category.clone(),
            kind: CandidateKind::Alias {
                source: source.name.clone(),
            },
        }
    }

    pub fn is_alias(&self) -> bool {
        matches!(self.kind, CandidateKind::Alias { .. })
    }
}

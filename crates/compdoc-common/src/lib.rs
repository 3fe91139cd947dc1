use std::fmt;
use std::path::PathBuf;

pub mod types;

pub use types::*;

/// The member list a structural extraction was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Properties,
    Methods,
    Styles,
    Events,
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Facet::Properties => "property",
            Facet::Methods => "method",
            Facet::Styles => "style",
            Facet::Events => "event",
        };
        f.write_str(name)
    }
}

/// Common error types.
///
/// Every extraction variant is recoverable: callers log it and carry on with an
/// empty facet, a truncated chain, or a missing child.
#[derive(thiserror::Error, Debug)]
pub enum CompdocError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no {facet} declaration found")]
    Unavailable { facet: Facet },

    #[error("no source in {}: {reason}", .path.display())]
    NotFound { path: PathBuf, reason: String },

    #[error("could not resolve ancestor type {type_name}")]
    UnresolvedAncestor { type_name: String },

    #[error("child component path missing: {}", .path.display())]
    MissingChild { path: PathBuf },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CompdocError {
    pub fn unavailable(facet: Facet) -> Self {
        CompdocError::Unavailable { facet }
    }

    pub fn not_found(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        CompdocError::NotFound {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for the outcomes that mean "nothing to extract here" rather than a broken input.
    pub fn is_absent(&self) -> bool {
        matches!(
            self,
            CompdocError::Unavailable { .. } | CompdocError::NotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CompdocError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_subject() {
        let err = CompdocError::not_found("lib/anchor.js.map", "index 3 out of range");
        assert_eq!(
            err.to_string(),
            "no source in lib/anchor.js.map: index 3 out of range"
        );

        let err = CompdocError::unavailable(Facet::Styles);
        assert_eq!(err.to_string(), "no style declaration found");
        assert!(err.is_absent());

        let err = CompdocError::UnresolvedAncestor {
            type_name: "WidgetProps".to_string(),
        };
        assert!(!err.is_absent());
    }
}

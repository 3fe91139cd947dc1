use crate::types::ParserConventions;
use compdoc_common::{CompdocError, Result};
use tree_sitter::{Parser, Tree};

/// Structural parser for recovered TypeScript sources and compiled JavaScript.
///
/// Each extraction mode is independent; a file that lacks the shape a mode
/// looks for yields `CompdocError::Unavailable` for that mode only.
pub struct TypeScriptStructureParser {
    pub(crate) conventions: ParserConventions,
}

impl TypeScriptStructureParser {
    pub fn new() -> Self {
        Self::with_conventions(ParserConventions::default())
    }

    pub fn with_conventions(conventions: ParserConventions) -> Self {
        Self { conventions }
    }

    /// Parse a source blob. Compiled JavaScript goes through the same grammar.
    pub(crate) fn parse_tree(&self, content: &str) -> Result<Tree> {
        let mut parser = Parser::new();
        parser
            .set_language(tree_sitter_typescript::language_typescript())
            .map_err(|e| CompdocError::Parse(format!("Failed to set TypeScript language: {}", e)))?;

        parser
            .parse(content, None)
            .ok_or_else(|| CompdocError::Parse("Failed to parse TypeScript content".to_string()))
    }
}

impl Default for TypeScriptStructureParser {
    fn default() -> Self {
        Self::new()
    }
}

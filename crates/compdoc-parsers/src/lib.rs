//! Structural extraction from recovered TypeScript sources.

mod events;
mod methods;
mod properties;
mod static_eval;
mod styles;
mod syntax;
pub mod types;
pub mod typescript;

pub use events::events_from_properties;
pub use types::{ParserConventions, PropertyBag};
pub use typescript::TypeScriptStructureParser;

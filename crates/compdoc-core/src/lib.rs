pub mod config;
pub mod discovery;
pub mod events;
pub mod filter;
pub mod generator;
pub mod inheritance;
pub mod prose;
pub mod source_map;
pub mod types;
pub mod writer;

pub use config::{ChildEntry, GeneratorConfig};
pub use discovery::discover_components;
pub use events::synthesize_events;
pub use filter::FilterPolicy;
pub use generator::Generator;
pub use inheritance::{candidate_stems, RootPropertyCache, StemStrategy};
pub use prose::{DirectoryProse, NoProse, ProseSource};
pub use types::{Candidate, CandidateKind};
pub use writer::{render, write_documents, OutputFormat};

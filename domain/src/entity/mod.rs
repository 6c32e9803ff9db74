//! Knowledge base entities and their canonical identifiers.

pub mod identifier;
pub mod knowledge_base;

pub use identifier::{EntityIdentifier, PROPERTY_NAMESPACE};
pub use knowledge_base::{KnowledgeBase, WIKIDATA_DOMAIN};

//! Infrastructure layer for wikiprov
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the Wikibase revision source, the SPARQL
//! query executor, and configuration file loading.

pub mod config;
pub mod sparql;
pub mod wikibase;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileProvenanceConfig, FileQueryConfig,
    FileWikibaseConfig,
};
pub use sparql::{DEFAULT_QUERY_ENDPOINT, HttpQueryExecutor};
pub use wikibase::{
    WikibaseClientError, WikibaseEndpoints, WikibaseRevisionSource, default_user_agent,
};

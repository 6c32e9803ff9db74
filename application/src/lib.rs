//! Application layer for wikiprov
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::PoolParams;
pub use ports::{
    progress::{NoProgress, ProvenanceProgress},
    query_executor::{QueryError, QueryExecutor},
    revision_source::RevisionSource,
};
pub use use_cases::attach_provenance::{
    AttachProvenanceError, AttachProvenanceInput, AttachProvenanceUseCase,
};
pub use use_cases::extract_identifiers::{ExtractError, extract_identifiers};
pub use use_cases::fetch_provenance::ProvenancePool;
pub use use_cases::lookup_provenance::{LookupError, LookupProvenanceUseCase};
pub use use_cases::query_with_provenance::{
    QueryWithProvenanceError, QueryWithProvenanceInput, QueryWithProvenanceUseCase,
};

//! Domain layer for wikiprov
//!
//! This crate contains the value objects of the provenance pipeline.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Entities
//!
//! A [`KnowledgeBase`] names the Wikibase instance whose IRIs we accept.
//! An [`EntityIdentifier`] is the canonical id (`Q42`, `Property:P31`)
//! derived from such an IRI; equal entities give equal identifiers.
//!
//! ## Provenance
//!
//! A [`ProvenanceRecord`] summarizes a record's revision history. A
//! [`ProvenanceEnvelope`] carries query results with those records attached.

pub mod core;
pub mod entity;
pub mod provenance;
pub mod query;

// Re-export commonly used types
pub use core::error::DomainError;
pub use entity::{EntityIdentifier, KnowledgeBase, PROPERTY_NAMESPACE, WIKIDATA_DOMAIN};
pub use provenance::{
    ProvenanceEnvelope, ProvenanceError, ProvenanceRecord, RevisionEntry, build_permalink,
};
pub use query::{BindingKind, BindingValue, Bindings, QueryBinding, QueryResults};

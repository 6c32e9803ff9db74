//! Provenance records and the envelope that carries them.
//!
//! - [`record::ProvenanceRecord`]: normalized revision metadata for one record
//! - [`revision::RevisionEntry`]: one edit in a record's history
//! - [`error::ProvenanceError`]: why a single record could not be fetched
//! - [`envelope::ProvenanceEnvelope`]: query results plus attached provenance
//! - [`permalink::build_permalink`]: deterministic revision permalinks

pub mod envelope;
pub mod error;
pub mod permalink;
pub mod record;
pub mod revision;

pub use envelope::ProvenanceEnvelope;
pub use error::ProvenanceError;
pub use permalink::build_permalink;
pub use record::ProvenanceRecord;
pub use revision::RevisionEntry;

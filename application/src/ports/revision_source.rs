//! Revision source port
//!
//! Defines the interface for fetching a record's revision history.

use async_trait::async_trait;
use wikiprov_domain::{EntityIdentifier, ProvenanceRecord};

/// Source of revision-history provenance for knowledge base records
///
/// One call issues one remote lookup. Implementations never fail: transport,
/// status and decoding problems are reported through
/// [`ProvenanceRecord::error`] so a bad identifier cannot disturb its
/// neighbours in a batch. Implementations (adapters) live in the
/// infrastructure layer.
#[async_trait]
pub trait RevisionSource: Send + Sync {
    /// Fetch provenance for `id`, including up to `history_depth` revisions
    async fn fetch_provenance(
        &self,
        id: &EntityIdentifier,
        history_depth: usize,
    ) -> ProvenanceRecord;
}

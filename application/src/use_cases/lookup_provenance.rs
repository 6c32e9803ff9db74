//! Lookup Provenance use case
//!
//! Provenance for a single record named by the user.

use crate::config::PoolParams;
use crate::ports::revision_source::RevisionSource;
use crate::use_cases::fetch_provenance::ProvenancePool;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use wikiprov_domain::{
    DomainError, EntityIdentifier, KnowledgeBase, ProvenanceError, ProvenanceRecord,
};

/// Errors that can occur during a single lookup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(#[from] DomainError),

    #[error("Could not fetch provenance for {id}: {source}")]
    Fetch {
        id: EntityIdentifier,
        source: ProvenanceError,
    },
}

/// Use case for looking up one record's provenance
pub struct LookupProvenanceUseCase<S: RevisionSource + 'static> {
    source: Arc<S>,
    knowledge_base: KnowledgeBase,
}

impl<S: RevisionSource + 'static> LookupProvenanceUseCase<S> {
    pub fn new(source: Arc<S>, knowledge_base: KnowledgeBase) -> Self {
        Self {
            source,
            knowledge_base,
        }
    }

    /// Look up `identifier` (a QID, PID or entity IRI).
    ///
    /// Unlike batch attachment, a failed lookup is returned as an error.
    pub async fn execute(
        &self,
        identifier: &str,
        params: PoolParams,
    ) -> Result<ProvenanceRecord, LookupError> {
        let id = EntityIdentifier::parse(identifier, &self.knowledge_base)?;
        info!("Looking up provenance for {}", id);

        let pool = ProvenancePool::new(Arc::clone(&self.source), params.with_concurrency(1));
        let mut record = pool
            .run(std::slice::from_ref(&id))
            .await
            .pop()
            .unwrap_or_else(|| {
                ProvenanceRecord::failure(ProvenanceError::WorkerFailed(
                    "no record returned".to_string(),
                ))
            });

        match record.error.take() {
            Some(source) => Err(LookupError::Fetch { id, source }),
            None => Ok(record),
        }
    }
}

//! Attach Provenance use case
//!
//! Orchestrates identifier extraction, the worker pool and reassembly of
//! the query results into a [`ProvenanceEnvelope`].

use crate::config::PoolParams;
use crate::ports::progress::{NoProgress, ProvenanceProgress};
use crate::ports::revision_source::RevisionSource;
use crate::use_cases::extract_identifiers::{ExtractError, extract_identifiers};
use crate::use_cases::fetch_provenance::ProvenancePool;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use wikiprov_domain::{KnowledgeBase, ProvenanceEnvelope, QueryResults};

/// Errors that stop provenance from being attached at all.
///
/// Failures of individual lookups are not errors here; they are recorded
/// in the affected [`ProvenanceRecord`](wikiprov_domain::ProvenanceRecord).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttachProvenanceError {
    #[error("No results returned from given key: {0}")]
    NoResults(#[from] ExtractError),
}

/// Input for the AttachProvenance use case
#[derive(Debug, Clone)]
pub struct AttachProvenanceInput {
    /// Query variable holding the entity IRI; empty disables provenance
    pub key: String,
    /// Pool concurrency, history depth and deadlines
    pub params: PoolParams,
}

impl AttachProvenanceInput {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            params: PoolParams::default(),
        }
    }

    pub fn with_history_depth(mut self, depth: usize) -> Self {
        self.params.history_depth = depth;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.params.concurrency = concurrency;
        self
    }

    pub fn with_params(mut self, params: PoolParams) -> Self {
        self.params = params;
        self
    }
}

/// Use case for attaching revision provenance to query results
pub struct AttachProvenanceUseCase<S: RevisionSource + 'static> {
    source: Arc<S>,
    knowledge_base: KnowledgeBase,
    cancel: CancellationToken,
}

impl<S: RevisionSource + 'static> AttachProvenanceUseCase<S> {
    pub fn new(source: Arc<S>, knowledge_base: KnowledgeBase) -> Self {
        Self {
            source,
            knowledge_base,
            cancel: CancellationToken::new(),
        }
    }

    /// Abort outstanding lookups when `cancel` fires
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        results: QueryResults,
        input: AttachProvenanceInput,
    ) -> Result<ProvenanceEnvelope, AttachProvenanceError> {
        self.execute_with_progress(results, input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        results: QueryResults,
        input: AttachProvenanceInput,
        progress: &dyn ProvenanceProgress,
    ) -> Result<ProvenanceEnvelope, AttachProvenanceError> {
        let key = input.key.trim();
        if key.is_empty() {
            debug!("No key given, returning results without provenance");
            return Ok(ProvenanceEnvelope::new(results));
        }

        let mut params = input.params;
        params.concurrency = params.effective_concurrency();

        let identifiers = extract_identifiers(results.rows(), key, &self.knowledge_base)?;
        info!(
            "Attaching provenance for {} unique identifiers from {} rows",
            identifiers.len(),
            results.len()
        );

        let pool = ProvenancePool::new(Arc::clone(&self.source), params)
            .with_cancellation(self.cancel.clone());
        let records = pool.run_with_progress(&identifiers, progress).await;

        Ok(ProvenanceEnvelope::new(results).with_provenance(identifiers.into_iter().zip(records)))
    }
}

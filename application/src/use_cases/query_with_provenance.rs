//! Query With Provenance use case
//!
//! Runs a query against a SPARQL endpoint and attaches revision provenance
//! to the returned rows.

use crate::ports::progress::{NoProgress, ProvenanceProgress};
use crate::ports::query_executor::{QueryError, QueryExecutor};
use crate::ports::revision_source::RevisionSource;
use crate::use_cases::attach_provenance::{
    AttachProvenanceError, AttachProvenanceInput, AttachProvenanceUseCase,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use wikiprov_domain::ProvenanceEnvelope;

/// Errors that can occur while querying with provenance
#[derive(Error, Debug)]
pub enum QueryWithProvenanceError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Attach(#[from] AttachProvenanceError),
}

/// Input for the QueryWithProvenance use case
#[derive(Debug, Clone)]
pub struct QueryWithProvenanceInput {
    /// SPARQL endpoint URL
    pub endpoint: String,
    /// Query text
    pub query: String,
    /// Provenance settings; an empty key skips provenance entirely
    pub attach: AttachProvenanceInput,
}

impl QueryWithProvenanceInput {
    pub fn new(
        endpoint: impl Into<String>,
        query: impl Into<String>,
        attach: AttachProvenanceInput,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            query: query.into(),
            attach,
        }
    }
}

/// Use case for querying an endpoint and attaching provenance to the results
pub struct QueryWithProvenanceUseCase<Q: QueryExecutor, S: RevisionSource + 'static> {
    executor: Arc<Q>,
    attach: AttachProvenanceUseCase<S>,
}

impl<Q: QueryExecutor, S: RevisionSource + 'static> QueryWithProvenanceUseCase<Q, S> {
    pub fn new(executor: Arc<Q>, attach: AttachProvenanceUseCase<S>) -> Self {
        Self { executor, attach }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: QueryWithProvenanceInput,
    ) -> Result<ProvenanceEnvelope, QueryWithProvenanceError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: QueryWithProvenanceInput,
        progress: &dyn ProvenanceProgress,
    ) -> Result<ProvenanceEnvelope, QueryWithProvenanceError> {
        info!("Querying {}", input.endpoint);
        let results = self.executor.execute(&input.endpoint, &input.query).await?;
        info!("Query returned {} rows", results.len());

        let envelope = self
            .attach
            .execute_with_progress(results, input.attach, progress)
            .await?;
        Ok(envelope)
    }
}

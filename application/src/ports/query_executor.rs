//! Query executor port
//!
//! Defines the interface for running a query against a SPARQL endpoint.

use async_trait::async_trait;
use thiserror::Error;
use wikiprov_domain::QueryResults;

/// Errors that can occur while executing a query
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid query endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Query request failed: {0}")]
    RequestFailed(String),

    #[error("Query endpoint returned status {0}")]
    UnexpectedStatus(u16),

    #[error("Could not decode query results: {0}")]
    Decode(String),
}

/// Executes queries and returns their bindings
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, endpoint: &str, query: &str) -> Result<QueryResults, QueryError>;
}

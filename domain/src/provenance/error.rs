//! Per-record provenance errors

use serde::{Serialize, Serializer};
use std::time::Duration;
use thiserror::Error;

/// Why provenance could not be collected for one identifier.
///
/// These never abort a pipeline run; they are stored in the failing
/// record's `error` field and serialized as their display string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProvenanceError {
    #[error("Returned unexpected status code: expected {expected}, received {received}")]
    UnexpectedStatus { expected: u16, received: u16 },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Could not decode revision history: {0}")]
    Decode(String),

    #[error("No revision history found for '{0}'")]
    MissingEntity(String),

    #[error("Request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Worker failed: {0}")]
    WorkerFailed(String),
}

impl ProvenanceError {
    /// A non-200 response from the revision API
    pub fn unexpected_status(received: u16) -> Self {
        Self::UnexpectedStatus {
            expected: 200,
            received,
        }
    }

    /// The status code the remote service answered with, if that was the failure
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { received, .. } => Some(*received),
            _ => None,
        }
    }
}

impl Serialize for ProvenanceError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

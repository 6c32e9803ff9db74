//! Worker pool parameters: fetch concurrency and history depth.
//!
//! [`PoolParams`] groups the static parameters that control the
//! [`ProvenancePool`](crate::use_cases::fetch_provenance::ProvenancePool).
//! They are passed in explicitly so concurrent pipeline runs never share
//! a throttle or cursor.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Hard cap on concurrent revision requests.
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// Revisions returned per record unless the caller asks otherwise.
pub const DEFAULT_HISTORY_DEPTH: usize = 5;

/// Per-request deadline.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Worker pool control parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolParams {
    /// Number of workers requested by the caller (clamped, see [`PoolParams::worker_count`]).
    pub concurrency: usize,
    /// Upper bound for `concurrency`.
    pub max_concurrency: usize,
    /// Number of revisions to request per record.
    pub history_depth: usize,
    /// Deadline for each revision request; `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for PoolParams {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_MAX_CONCURRENCY,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            history_depth: DEFAULT_HISTORY_DEPTH,
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
        }
    }
}

impl PoolParams {
    // ==================== Builder Methods ====================

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max;
        self
    }

    pub fn with_history_depth(mut self, depth: usize) -> Self {
        self.history_depth = depth;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    // ==================== Derived Values ====================

    /// Concurrency clamped to `1..=max_concurrency`.
    ///
    /// A zero-worker pool would never drain its results, so 0 becomes 1.
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.clamp(1, self.max_concurrency.max(1))
    }

    /// Workers to spawn for `jobs` identifiers; never more than there is work for.
    pub fn worker_count(&self, jobs: usize) -> usize {
        self.effective_concurrency().min(jobs)
    }
}

//! Bounded worker pool for revision lookups
//!
//! Fetches provenance for a list of identifiers with a fixed number of
//! concurrent workers.
//!
//! # Scheduling
//!
//! Workers share a claim cursor over the identifier list. Each worker
//! claims the next unclaimed index, fetches that identifier, and publishes
//! `(index, record)` on a channel. The collector places every record at its
//! claimed index, so `result[i]` always belongs to `identifiers[i]` no matter
//! in which order requests finish.
//!
//! # Failure handling
//!
//! - A failed fetch is one error record; siblings are unaffected.
//! - A request exceeding the deadline becomes a `Timeout` record.
//! - After cancellation every unfinished index becomes a `Cancelled` record.
//! - Slots left empty by a crashed worker become `WorkerFailed` records.
//!
//! The result therefore always has exactly one record per input identifier.

use crate::config::PoolParams;
use crate::ports::progress::{NoProgress, ProvenanceProgress};
use crate::ports::revision_source::RevisionSource;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use wikiprov_domain::{EntityIdentifier, ProvenanceError, ProvenanceRecord};

/// Cursor handing out each index of a job list exactly once.
///
/// The lock is only held to read and bump the counter, never across I/O.
struct ClaimCursor {
    next: Mutex<usize>,
    len: usize,
}

impl ClaimCursor {
    fn new(len: usize) -> Self {
        Self {
            next: Mutex::new(0),
            len,
        }
    }

    /// Claim the next index, or `None` once the list is exhausted
    fn claim(&self) -> Option<usize> {
        let mut next = self.next.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if *next >= self.len {
            return None;
        }
        let idx = *next;
        *next += 1;
        Some(idx)
    }
}

/// Runs a [`RevisionSource`] over many identifiers with bounded concurrency.
///
/// The pool owns no long-lived state: workers are spawned by [`run`](Self::run)
/// and have all finished when it returns.
pub struct ProvenancePool<S: RevisionSource + 'static> {
    source: Arc<S>,
    params: PoolParams,
    cancel: CancellationToken,
}

impl<S: RevisionSource + 'static> ProvenancePool<S> {
    pub fn new(source: Arc<S>, params: PoolParams) -> Self {
        Self {
            source,
            params,
            cancel: CancellationToken::new(),
        }
    }

    /// Use an external token to abort outstanding requests
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn params(&self) -> &PoolParams {
        &self.params
    }

    /// Fetch provenance for every identifier with default (no-op) progress
    pub async fn run(&self, identifiers: &[EntityIdentifier]) -> Vec<ProvenanceRecord> {
        self.run_with_progress(identifiers, &NoProgress).await
    }

    /// Fetch provenance for every identifier with progress callbacks.
    ///
    /// Returns one record per identifier, index-aligned with `identifiers`.
    pub async fn run_with_progress(
        &self,
        identifiers: &[EntityIdentifier],
        progress: &dyn ProvenanceProgress,
    ) -> Vec<ProvenanceRecord> {
        let total = identifiers.len();
        if total == 0 {
            return Vec::new();
        }

        let workers = self.params.worker_count(total);
        info!(
            "Fetching provenance for {} identifiers with {} workers",
            total, workers
        );
        progress.on_fetch_start(total);

        let jobs: Arc<[EntityIdentifier]> = identifiers.into();
        let cursor = Arc::new(ClaimCursor::new(total));
        let (tx, mut rx) = mpsc::channel::<(usize, ProvenanceRecord)>(workers);

        let mut join_set = JoinSet::new();
        for worker in 0..workers {
            let tx = tx.clone();
            let jobs = Arc::clone(&jobs);
            let cursor = Arc::clone(&cursor);
            let source = Arc::clone(&self.source);
            let cancel = self.cancel.clone();
            let depth = self.params.history_depth;
            let timeout = self.params.request_timeout;

            join_set.spawn(async move {
                while let Some(idx) = cursor.claim() {
                    let record =
                        Self::fetch_one(source.as_ref(), &jobs[idx], depth, timeout, &cancel)
                            .await;
                    if tx.send((idx, record)).await.is_err() {
                        // Collector is gone, nobody wants the rest.
                        break;
                    }
                }
                debug!("Worker {} finished", worker);
            });
        }
        // Only workers hold senders now; the channel closes when they all exit.
        drop(tx);

        let mut slots: Vec<Option<ProvenanceRecord>> = vec![None; total];
        let mut received = 0;
        while received < total {
            let Some((idx, record)) = rx.recv().await else {
                break;
            };
            if let Some(error) = &record.error {
                warn!("Provenance for {} failed: {}", jobs[idx], error);
            }
            progress.on_record_complete(&jobs[idx], record.is_success());
            if slots[idx].replace(record).is_none() {
                received += 1;
            }
        }

        while let Some(joined) = join_set.join_next().await {
            if let Err(e) = joined {
                warn!("Provenance worker failed: {}", e);
            }
        }

        if received < total {
            warn!(
                "{} of {} provenance records were never delivered",
                total - received,
                total
            );
        }

        let records = slots
            .into_iter()
            .enumerate()
            .map(|(idx, slot)| {
                slot.unwrap_or_else(|| {
                    progress.on_record_complete(&jobs[idx], false);
                    ProvenanceRecord::failure(ProvenanceError::WorkerFailed(
                        "worker exited before delivering a record".to_string(),
                    ))
                })
            })
            .collect();

        progress.on_fetch_complete();
        records
    }

    /// One lookup, bounded by the request deadline and the cancellation token
    async fn fetch_one(
        source: &S,
        id: &EntityIdentifier,
        depth: usize,
        timeout: Option<Duration>,
        cancel: &CancellationToken,
    ) -> ProvenanceRecord {
        if cancel.is_cancelled() {
            return ProvenanceRecord::failure(ProvenanceError::Cancelled);
        }

        let fetch = async {
            match timeout {
                Some(limit) => tokio::time::timeout(limit, source.fetch_provenance(id, depth))
                    .await
                    .unwrap_or_else(|_| ProvenanceRecord::failure(ProvenanceError::Timeout(limit))),
                None => source.fetch_provenance(id, depth).await,
            }
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => ProvenanceRecord::failure(ProvenanceError::Cancelled),
            record = fetch => record,
        }
    }
}

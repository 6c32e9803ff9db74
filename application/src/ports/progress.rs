//! Progress notification port
//!
//! Defines the interface for reporting progress while provenance is fetched.

use wikiprov_domain::EntityIdentifier;

/// Callback for progress updates during a provenance fetch
///
/// Implementations live in the presentation layer. Callbacks are invoked
/// from the collecting task only, never from workers.
pub trait ProvenanceProgress: Send + Sync {
    /// Called once before any request is issued
    fn on_fetch_start(&self, total: usize);

    /// Called as each record arrives, in completion order
    fn on_record_complete(&self, id: &EntityIdentifier, success: bool);

    /// Called after the last record has been placed
    fn on_fetch_complete(&self);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProvenanceProgress for NoProgress {
    fn on_fetch_start(&self, _total: usize) {}
    fn on_record_complete(&self, _id: &EntityIdentifier, _success: bool) {}
    fn on_fetch_complete(&self) {}
}

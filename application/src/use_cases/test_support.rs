//! Shared fakes for use case tests

use crate::ports::revision_source::RevisionSource;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use wikiprov_domain::{
    EntityIdentifier, KnowledgeBase, ProvenanceError, ProvenanceRecord, RevisionEntry,
};

pub(crate) const PERMALINK_BASE: &str = "http://example.com";

pub(crate) fn id(raw: &str) -> EntityIdentifier {
    EntityIdentifier::parse(raw, &KnowledgeBase::wikidata()).unwrap()
}

pub(crate) fn ids(count: usize) -> Vec<EntityIdentifier> {
    (1..=count).map(|n| id(&format!("Q{}", n))).collect()
}

/// The record the fake returns for a healthy identifier
pub(crate) fn sample_record(id: &EntityIdentifier) -> ProvenanceRecord {
    ProvenanceRecord::success(
        id,
        2600,
        "2020-08-31T23:13:00Z",
        PERMALINK_BASE,
        &[
            RevisionEntry::new(2600, "Emmanuel Goldstein", "edit comment #1", "2020-08-31T23:13:00Z"),
            RevisionEntry::new(1000, "Robert Smith", "edit comment #2", "2020-08-01T23:13:00Z"),
        ],
    )
}

/// Scriptable in-memory revision source
#[derive(Default)]
pub(crate) struct FakeRevisionSource {
    failing: HashSet<String>,
    hanging: HashSet<String>,
    panicking: HashSet<String>,
    delays: HashMap<String, Duration>,
    fail_all: bool,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

impl FakeRevisionSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Every request answers with HTTP 400
    pub(crate) fn failing_all() -> Self {
        Self {
            fail_all: true,
            ..Default::default()
        }
    }

    pub(crate) fn fail(mut self, raw: &str) -> Self {
        self.failing.insert(raw.to_string());
        self
    }

    pub(crate) fn hang(mut self, raw: &str) -> Self {
        self.hanging.insert(raw.to_string());
        self
    }

    pub(crate) fn panic_on(mut self, raw: &str) -> Self {
        self.panicking.insert(raw.to_string());
        self
    }

    pub(crate) fn delay(mut self, raw: &str, delay: Duration) -> Self {
        self.delays.insert(raw.to_string(), delay);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub(crate) fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl RevisionSource for FakeRevisionSource {
    async fn fetch_provenance(
        &self,
        id: &EntityIdentifier,
        _history_depth: usize,
    ) -> ProvenanceRecord {
        let key = id.as_str();
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push(key.to_string());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if self.panicking.contains(key) {
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            panic!("fake source asked to panic for {}", key);
        }
        if self.hanging.contains(key) {
            std::future::pending::<()>().await;
        }

        let delay = self
            .delays
            .get(key)
            .copied()
            .unwrap_or(Duration::from_millis(10));
        tokio::time::sleep(delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_all || self.failing.contains(key) {
            return ProvenanceRecord::failure(ProvenanceError::unexpected_status(400));
        }
        sample_record(id)
    }
}

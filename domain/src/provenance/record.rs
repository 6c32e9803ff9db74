//! Normalized provenance for one knowledge base record

use super::error::ProvenanceError;
use super::permalink::build_permalink;
use super::revision::RevisionEntry;
use crate::entity::EntityIdentifier;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Provenance of one record: latest revision, timestamp, permalink and history.
///
/// Exactly one of {populated data, error} holds. A failed record carries
/// only its error; every other field keeps its zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProvenanceRecord {
    /// Canonical identifier (page title) of the record
    pub title: String,
    /// Latest revision id
    pub revision: u64,
    /// Last-modified timestamp (ISO-8601)
    pub modified: String,
    /// Link to the record as of `revision`
    pub permalink: String,
    /// One line per revision, newest first
    pub history: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ProvenanceError>,
}

impl ProvenanceRecord {
    /// Build a populated record.
    ///
    /// # Arguments
    /// * `id` - The identifier the revisions were requested for
    /// * `revision` - Latest revision id of the record
    /// * `modified` - Timestamp of that revision
    /// * `permalink_base` - Index URL the permalink is built on
    /// * `history` - Revisions newest first
    pub fn success(
        id: &EntityIdentifier,
        revision: u64,
        modified: impl Into<String>,
        permalink_base: &str,
        history: &[RevisionEntry],
    ) -> Self {
        Self {
            title: id.to_string(),
            revision,
            modified: modified.into(),
            permalink: build_permalink(permalink_base, id, revision),
            history: history.iter().map(RevisionEntry::history_line).collect(),
            error: None,
        }
    }

    /// Build a failed record; all data fields stay zero-valued.
    pub fn failure(error: ProvenanceError) -> Self {
        Self {
            error: Some(error),
            ..Default::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// The last-modified timestamp, if it parses as RFC 3339
    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.modified)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Pretty JSON representation
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl std::fmt::Display for ProvenanceRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = self.to_json_pretty().map_err(|_| std::fmt::Error)?;
        f.write_str(&json)
    }
}

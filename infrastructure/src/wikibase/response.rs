//! Revision history response decoding
//!
//! Accepts both the MediaWiki `query.pages` shape and the Wikibase
//! `entities` shape. Each is a map keyed by page or entity id whose entries
//! carry the revision list for that page.

use serde::Deserialize;
use std::collections::BTreeMap;
use wikiprov_domain::{EntityIdentifier, ProvenanceError, ProvenanceRecord, RevisionEntry};

#[derive(Debug, Default, Deserialize)]
pub struct RevisionResponse {
    #[serde(default)]
    query: Option<QueryBlock>,
    #[serde(default)]
    entities: Option<BTreeMap<String, PageEntry>>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Default, Deserialize)]
struct QueryBlock {
    #[serde(default)]
    pages: BTreeMap<String, PageEntry>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Default, Deserialize)]
struct PageEntry {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    lastrevid: Option<u64>,
    #[serde(default)]
    modified: Option<String>,
    #[serde(default)]
    revisions: Vec<RawRevision>,
    /// MediaWiki marks absent pages with an empty-string `missing` key.
    #[serde(default)]
    missing: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawRevision {
    revid: u64,
    #[serde(default)]
    user: String,
    #[serde(default)]
    comment: String,
    #[serde(default)]
    timestamp: String,
}

impl From<&RawRevision> for RevisionEntry {
    fn from(raw: &RawRevision) -> Self {
        RevisionEntry::new(
            raw.revid,
            raw.user.clone(),
            raw.comment.clone(),
            raw.timestamp.clone(),
        )
    }
}

impl PageEntry {
    fn names(&self, identifier: &EntityIdentifier) -> bool {
        let wanted = identifier.as_str();
        self.title.as_deref() == Some(wanted) || self.id.as_deref() == Some(wanted)
    }
}

impl RevisionResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self, ProvenanceError> {
        serde_json::from_slice(body).map_err(|e| ProvenanceError::Decode(e.to_string()))
    }

    fn pages(&self) -> Vec<&PageEntry> {
        let from_query = self.query.iter().flat_map(|q| q.pages.values());
        let from_entities = self.entities.iter().flat_map(|e| e.values());
        from_query.chain(from_entities).collect()
    }

    /// Normalize into a record for `identifier`.
    ///
    /// The entry naming the identifier wins; a lone entry is accepted as is
    /// since the API may canonicalize the title.
    pub fn into_record(
        self,
        identifier: &EntityIdentifier,
        permalink_base: &str,
    ) -> Result<ProvenanceRecord, ProvenanceError> {
        if let Some(err) = &self.error {
            return Err(ProvenanceError::Decode(format!(
                "API error '{}': {}",
                err.code, err.info
            )));
        }

        let pages = self.pages();
        let page = pages
            .iter()
            .find(|p| p.names(identifier))
            .or_else(|| if pages.len() == 1 { pages.first() } else { None })
            .ok_or_else(|| ProvenanceError::MissingEntity(identifier.to_string()))?;

        if page.missing.is_some() {
            return Err(ProvenanceError::MissingEntity(identifier.to_string()));
        }

        let newest = page.revisions.first();
        let revision = page
            .lastrevid
            .or(newest.map(|r| r.revid))
            .ok_or_else(|| ProvenanceError::MissingEntity(identifier.to_string()))?;
        let modified = page
            .modified
            .clone()
            .or_else(|| newest.map(|r| r.timestamp.clone()))
            .unwrap_or_default();

        let entries: Vec<RevisionEntry> = page.revisions.iter().map(RevisionEntry::from).collect();

        Ok(ProvenanceRecord::success(
            identifier,
            revision,
            modified,
            permalink_base,
            &entries,
        ))
    }
}

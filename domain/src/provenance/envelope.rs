//! Query results with provenance attached

use super::record::ProvenanceRecord;
use crate::entity::{EntityIdentifier, KnowledgeBase};
use crate::query::{Bindings, QueryResults};
use serde::Serialize;

/// The caller-facing aggregate: the original query results plus one
/// provenance record per unique identifier, in first-seen order.
///
/// Rows are joined back to their record through the identifier, see
/// [`ProvenanceEnvelope::provenance_for_row`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProvenanceEnvelope {
    pub head: serde_json::Map<String, serde_json::Value>,
    pub results: Bindings,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub provenance: Vec<ProvenanceRecord>,
    /// `identifiers[i]` is the identifier `provenance[i]` was fetched for
    #[serde(skip)]
    identifiers: Vec<EntityIdentifier>,
}

impl ProvenanceEnvelope {
    /// Wrap query results without any provenance
    pub fn new(results: QueryResults) -> Self {
        Self {
            head: results.head,
            results: results.results,
            provenance: Vec::new(),
            identifiers: Vec::new(),
        }
    }

    /// Attach provenance as `(identifier, record)` pairs, in order.
    pub fn with_provenance<I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (EntityIdentifier, ProvenanceRecord)>,
    {
        let (identifiers, records): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        self.identifiers = identifiers;
        self.provenance = records;
        self
    }

    pub fn has_provenance(&self) -> bool {
        !self.provenance.is_empty()
    }

    pub fn identifiers(&self) -> &[EntityIdentifier] {
        &self.identifiers
    }

    /// The record fetched for `id`, if any
    pub fn provenance_for(&self, id: &EntityIdentifier) -> Option<&ProvenanceRecord> {
        self.identifiers
            .iter()
            .position(|candidate| candidate == id)
            .and_then(|idx| self.provenance.get(idx))
    }

    /// The record for row `row`, resolved through the IRI bound to `key`
    pub fn provenance_for_row(
        &self,
        row: usize,
        key: &str,
        kb: &KnowledgeBase,
    ) -> Option<&ProvenanceRecord> {
        let iri = self.results.bindings.get(row)?.value(key)?;
        let id = EntityIdentifier::from_iri(iri, kb).ok()?;
        self.provenance_for(&id)
    }

    /// Pretty JSON text for humans and downstream tools.
    ///
    /// `<`, `>` and `&` are written verbatim, never as `\u003c`-style escapes.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl From<QueryResults> for ProvenanceEnvelope {
    fn from(results: QueryResults) -> Self {
        Self::new(results)
    }
}

impl std::fmt::Display for ProvenanceEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = self.to_json_pretty().map_err(|_| std::fmt::Error)?;
        f.write_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provenance::ProvenanceError;
    use crate::query::{BindingValue, QueryBinding};

    fn results() -> QueryResults {
        QueryResults::new(vec![
            QueryBinding::new().with("uri", BindingValue::uri("http://www.wikidata.org/entity/Q1")),
            QueryBinding::new().with("uri", BindingValue::uri("http://www.wikidata.org/entity/Q2")),
            QueryBinding::new().with("uri", BindingValue::uri("http://www.wikidata.org/entity/Q1")),
            QueryBinding::new().with("label", BindingValue::literal("no uri")),
        ])
        .with_vars(["uri", "label"])
    }

    fn record(title: &str) -> ProvenanceRecord {
        ProvenanceRecord {
            title: title.to_string(),
            revision: 1,
            ..Default::default()
        }
    }

    fn ids(raw: &[&str]) -> Vec<EntityIdentifier> {
        raw.iter()
            .map(|r| EntityIdentifier::parse(r, &KnowledgeBase::wikidata()).unwrap())
            .collect()
    }

    #[test]
    fn test_without_provenance_omits_field() {
        let envelope = ProvenanceEnvelope::new(results());
        let value = serde_json::to_value(&envelope).unwrap();
        assert!(value.get("provenance").is_none());
        assert_eq!(value["head"]["vars"], serde_json::json!(["uri", "label"]));
        assert_eq!(value["results"]["bindings"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_rows_join_back_to_records() {
        let records = vec![
            record("Q1"),
            ProvenanceRecord::failure(ProvenanceError::Cancelled),
        ];
        let envelope = ProvenanceEnvelope::new(results())
            .with_provenance(ids(&["Q1", "Q2"]).into_iter().zip(records));
        let kb = KnowledgeBase::wikidata();
        assert_eq!(envelope.provenance_for_row(0, "uri", &kb).unwrap().title, "Q1");
        assert_eq!(envelope.provenance_for_row(2, "uri", &kb).unwrap().title, "Q1");
        assert!(!envelope.provenance_for_row(1, "uri", &kb).unwrap().is_success());
        assert!(envelope.provenance_for_row(3, "uri", &kb).is_none());
        assert!(envelope.provenance_for_row(9, "uri", &kb).is_none());
    }

    #[test]
    fn test_identifiers_stay_aligned_with_records() {
        let envelope = ProvenanceEnvelope::new(results())
            .with_provenance(ids(&["Q2", "Q1"]).into_iter().zip([record("Q2"), record("Q1")]));
        assert_eq!(envelope.identifiers().len(), envelope.provenance.len());
        assert_eq!(envelope.provenance_for(&ids(&["Q1"])[0]).unwrap().title, "Q1");
        assert_eq!(envelope.provenance_for(&ids(&["Q2"])[0]).unwrap().title, "Q2");
    }

    #[test]
    fn test_empty_pairs_attach_nothing() {
        let envelope = ProvenanceEnvelope::new(results()).with_provenance(Vec::new());
        assert!(!envelope.has_provenance());
        assert!(envelope.identifiers().is_empty());
    }

    #[test]
    fn test_json_is_not_html_escaped() {
        let envelope = ProvenanceEnvelope::new(QueryResults::new(vec![
            QueryBinding::new().with("label", BindingValue::literal("<b>Tom & Jerry</b>")),
        ]));
        let json = envelope.to_json_pretty().unwrap();
        assert!(json.contains("<b>Tom & Jerry</b>"));
        assert!(!json.contains("\\u003c"));
        assert!(!json.contains("\\u0026"));
    }
}

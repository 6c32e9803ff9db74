//! Entity identifier value object

use super::knowledge_base::KnowledgeBase;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Namespace prefix MediaWiki uses for property pages.
pub const PROPERTY_NAMESPACE: &str = "Property";

/// Path segment marking Wikibase's property-related IRI namespaces
/// (`/prop/direct/P31`, `/prop/P31`, ...).
const PROPERTY_PATH_SEGMENT: &str = "prop";

/// Canonical identifier of a record in a Wikibase knowledge base (Value Object)
///
/// Items are plain ids (`Q27229608`); properties carry the page namespace
/// (`Property:P31`), matching their page title.
/// Any two IRIs addressing the same entity produce equal identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityIdentifier(String);

impl EntityIdentifier {
    /// Derive the identifier from an entity IRI.
    ///
    /// The IRI is validated against `kb` first; the canonical id is the last
    /// path segment, percent-decoded and prefixed with `Property:` for
    /// property IRIs.
    pub fn from_iri(iri: &str, kb: &KnowledgeBase) -> Result<Self, DomainError> {
        let url = kb.validate_iri(iri)?;

        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.collect())
            .unwrap_or_default();

        let last = match segments.last() {
            Some(last) if !last.is_empty() => *last,
            _ => return Err(DomainError::MissingEntitySegment(iri.to_string())),
        };
        let id = urlencoding::decode(last).map_err(|e| DomainError::InvalidIri {
            iri: iri.to_string(),
            reason: format!("entity segment is not valid UTF-8: {e}"),
        })?;
        if id.trim().is_empty() {
            return Err(DomainError::MissingEntitySegment(iri.to_string()));
        }

        let in_property_namespace = segments
            .iter()
            .any(|s| s.eq_ignore_ascii_case(PROPERTY_PATH_SEGMENT));

        if in_property_namespace && !is_namespaced_property(&id) {
            Ok(Self::property(&id))
        } else {
            Ok(Self::canonical(&id))
        }
    }

    /// Parse an identifier supplied by a user: a full IRI, a bare item id,
    /// a bare property id or an already-namespaced `Property:P31`.
    pub fn parse(raw: &str, kb: &KnowledgeBase) -> Result<Self, DomainError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DomainError::EmptyIdentifier);
        }
        if raw.starts_with("http://") || raw.starts_with("https://") {
            return Self::from_iri(raw, kb);
        }
        Ok(Self::canonical(raw))
    }

    /// Bare property ids gain the namespace; everything else is kept as is
    fn canonical(id: &str) -> Self {
        if is_property_id(id) {
            Self::property(id)
        } else {
            Self(id.to_string())
        }
    }

    fn property(id: &str) -> Self {
        Self(format!("{}:{}", PROPERTY_NAMESPACE, id))
    }

    /// Whether this identifies a property rather than an item
    pub fn is_property(&self) -> bool {
        self.0
            .strip_prefix(PROPERTY_NAMESPACE)
            .is_some_and(|rest| rest.starts_with(':'))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// `P` followed by one or more ASCII digits
fn is_property_id(s: &str) -> bool {
    s.strip_prefix('P')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// `Property:P31`
fn is_namespaced_property(s: &str) -> bool {
    s.strip_prefix(PROPERTY_NAMESPACE)
        .and_then(|rest| rest.strip_prefix(':'))
        .is_some_and(is_property_id)
}

impl std::fmt::Display for EntityIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EntityIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

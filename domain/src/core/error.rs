//! Domain error types

use thiserror::Error;

/// Errors raised while turning raw input into domain values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Identifier cannot be empty")]
    EmptyIdentifier,

    #[error("Could not parse IRI '{iri}': {reason}")]
    InvalidIri { iri: String, reason: String },

    #[error("IRI '{iri}' does not belong to knowledge base '{domain}'")]
    ForeignDomain { iri: String, domain: String },

    #[error("IRI '{0}' refers to a statement node, not an entity")]
    StatementNode(String),

    #[error("IRI '{0}' has no entity segment in its path")]
    MissingEntitySegment(String),

    #[error("Knowledge base domain cannot be empty")]
    EmptyDomain,
}

impl DomainError {
    /// Whether the error means the value is simply not an entity we can
    /// attach provenance to (as opposed to being malformed).
    pub fn is_not_applicable(&self) -> bool {
        matches!(
            self,
            DomainError::ForeignDomain { .. } | DomainError::StatementNode(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_error_display() {
        let error = DomainError::StatementNode("http://www.wikidata.org/entity/statement/x".into());
        assert_eq!(
            error.to_string(),
            "IRI 'http://www.wikidata.org/entity/statement/x' refers to a statement node, not an entity"
        );
    }

    #[test]
    fn test_is_not_applicable() {
        assert!(DomainError::StatementNode("x".into()).is_not_applicable());
        assert!(
            DomainError::ForeignDomain {
                iri: "x".into(),
                domain: "wikidata.org".into()
            }
            .is_not_applicable()
        );
        assert!(!DomainError::EmptyIdentifier.is_not_applicable());
        assert!(!DomainError::MissingEntitySegment("x".into()).is_not_applicable());
    }
}

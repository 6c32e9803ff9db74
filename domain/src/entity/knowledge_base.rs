//! Knowledge base value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use url::Url;

/// Domain of Wikidata, the default knowledge base.
pub const WIKIDATA_DOMAIN: &str = "wikidata.org";

/// Path segment used by Wikibase for statement (claim) nodes.
const STATEMENT_SEGMENT: &str = "statement";

/// The Wikibase instance whose entities we attach provenance to (Value Object)
///
/// Entity IRIs are only accepted when their host is the configured domain
/// or one of its subdomains, e.g. `www.wikidata.org` for `wikidata.org`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    domain: String,
}

impl KnowledgeBase {
    /// Create a knowledge base from a bare domain name
    pub fn new(domain: impl Into<String>) -> Result<Self, DomainError> {
        let domain = domain.into().trim().trim_matches('.').to_ascii_lowercase();
        if domain.is_empty() {
            return Err(DomainError::EmptyDomain);
        }
        Ok(Self { domain })
    }

    /// Wikidata itself
    pub fn wikidata() -> Self {
        Self {
            domain: WIKIDATA_DOMAIN.to_string(),
        }
    }

    /// Derive the knowledge base from a Wikibase site URL such as
    /// `https://www.wikidata.org` (a leading `www.` is dropped).
    pub fn from_site_url(site: &str) -> Result<Self, DomainError> {
        let url = Url::parse(site.trim()).map_err(|e| DomainError::InvalidIri {
            iri: site.to_string(),
            reason: e.to_string(),
        })?;
        let host = url.host_str().ok_or_else(|| DomainError::InvalidIri {
            iri: site.to_string(),
            reason: "URL has no host".to_string(),
        })?;
        Self::new(host.strip_prefix("www.").unwrap_or(host))
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Whether `host` is this knowledge base's domain or a subdomain of it
    pub fn owns_host(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        host == self.domain
            || host
                .strip_suffix(&self.domain)
                .is_some_and(|prefix| prefix.ends_with('.'))
    }

    /// Parse and validate an entity IRI.
    ///
    /// Fails for unparseable IRIs, IRIs on a foreign host and statement nodes.
    pub fn validate_iri(&self, iri: &str) -> Result<Url, DomainError> {
        let url = Url::parse(iri.trim()).map_err(|e| DomainError::InvalidIri {
            iri: iri.to_string(),
            reason: e.to_string(),
        })?;

        let owned = url.host_str().is_some_and(|host| self.owns_host(host));
        if !owned {
            return Err(DomainError::ForeignDomain {
                iri: iri.to_string(),
                domain: self.domain.clone(),
            });
        }

        let is_statement = url
            .path_segments()
            .is_some_and(|mut segments| {
                segments.any(|s| s.eq_ignore_ascii_case(STATEMENT_SEGMENT))
            });
        if is_statement {
            return Err(DomainError::StatementNode(iri.to_string()));
        }

        Ok(url)
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::wikidata()
    }
}

impl std::fmt::Display for KnowledgeBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.domain)
    }
}

//! Raw TOML configuration data types
//!
//! These structs mirror the config file layout. Every section is optional
//! and falls back to its defaults.

use crate::sparql::DEFAULT_QUERY_ENDPOINT;
use crate::wikibase::{
    DEFAULT_BASE_URI, WikibaseClientError, WikibaseEndpoints, api_url_for, index_url_for,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use wikiprov_application::PoolParams;
use wikiprov_application::config::{
    DEFAULT_HISTORY_DEPTH, DEFAULT_MAX_CONCURRENCY, DEFAULT_REQUEST_TIMEOUT,
};
use wikiprov_domain::{DomainError, KnowledgeBase, WIKIDATA_DOMAIN};

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("max_threads cannot be 0")]
    InvalidMaxThreads,

    #[error("entity_domain cannot be empty")]
    EmptyEntityDomain,
}

/// Raw `[wikibase]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWikibaseConfig {
    /// Site root; the API and index URLs are derived from it
    pub base_uri: String,
    /// Overrides `<base_uri>/w/api.php`
    pub api_url: Option<String>,
    /// Overrides `<base_uri>/w/index.php`
    pub permalink_base: Option<String>,
    /// Domain entity IRIs must belong to
    pub entity_domain: String,
    /// Overrides the built-in user agent
    pub user_agent: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for FileWikibaseConfig {
    fn default() -> Self {
        Self {
            base_uri: DEFAULT_BASE_URI.to_string(),
            api_url: None,
            permalink_base: None,
            entity_domain: WIKIDATA_DOMAIN.to_string(),
            user_agent: None,
            timeout_seconds: DEFAULT_REQUEST_TIMEOUT.as_secs(),
        }
    }
}

impl FileWikibaseConfig {
    pub fn api_url(&self) -> String {
        self.api_url
            .clone()
            .unwrap_or_else(|| api_url_for(&self.base_uri))
    }

    pub fn permalink_base(&self) -> String {
        self.permalink_base
            .clone()
            .unwrap_or_else(|| index_url_for(&self.base_uri))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Resolve the endpoints, applying any user agent override
    pub fn endpoints(&self) -> Result<WikibaseEndpoints, WikibaseClientError> {
        let endpoints = WikibaseEndpoints::new(&self.api_url(), &self.permalink_base())?;
        Ok(match &self.user_agent {
            Some(agent) if !agent.trim().is_empty() => endpoints.with_user_agent(agent.trim()),
            _ => endpoints,
        })
    }

    pub fn knowledge_base(&self) -> Result<KnowledgeBase, DomainError> {
        KnowledgeBase::new(&self.entity_domain)
    }
}

/// Raw `[provenance]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvenanceConfig {
    /// Revisions to report per record
    pub history: usize,
    /// Requested worker count
    pub threads: usize,
    /// Upper bound on `threads`
    pub max_threads: usize,
    /// Default subject variable for `query`
    pub key: String,
}

impl Default for FileProvenanceConfig {
    fn default() -> Self {
        Self {
            history: DEFAULT_HISTORY_DEPTH,
            threads: DEFAULT_MAX_CONCURRENCY,
            max_threads: DEFAULT_MAX_CONCURRENCY,
            key: String::new(),
        }
    }
}

/// Raw `[query]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileQueryConfig {
    /// SPARQL endpoint
    pub endpoint: String,
}

impl Default for FileQueryConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_QUERY_ENDPOINT.to_string(),
        }
    }
}

/// Complete file configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub wikibase: FileWikibaseConfig,
    pub provenance: FileProvenanceConfig,
    pub query: FileQueryConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.wikibase.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.provenance.max_threads == 0 {
            return Err(ConfigValidationError::InvalidMaxThreads);
        }
        if self.wikibase.entity_domain.trim().trim_matches('.').is_empty() {
            return Err(ConfigValidationError::EmptyEntityDomain);
        }
        Ok(())
    }

    /// Worker pool parameters from the `[provenance]` and `[wikibase]` sections
    pub fn pool_params(&self) -> PoolParams {
        PoolParams::default()
            .with_concurrency(self.provenance.threads)
            .with_max_concurrency(self.provenance.max_threads)
            .with_history_depth(self.provenance.history)
            .with_request_timeout(Some(self.wikibase.timeout()))
    }

    /// Render as TOML, as shown by `--show-config`
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[wikibase]
base_uri = "https://wikibase.example.org/"
api_url = "https://api.example.org/w/api.php"
entity_domain = "example.org"
user_agent = "my-bot/1.0"
timeout_seconds = 12

[provenance]
history = 3
threads = 4
max_threads = 8
key = "item"

[query]
endpoint = "https://query.example.org/sparql"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.wikibase.api_url(), "https://api.example.org/w/api.php");
        assert_eq!(
            config.wikibase.permalink_base(),
            "https://wikibase.example.org/w/index.php"
        );
        assert_eq!(config.wikibase.timeout(), Duration::from_secs(12));
        assert_eq!(config.provenance.key, "item");
        assert_eq!(config.query.endpoint, "https://query.example.org/sparql");

        let endpoints = config.wikibase.endpoints().unwrap();
        assert_eq!(endpoints.user_agent(), "my-bot/1.0");
        assert_eq!(
            config.wikibase.knowledge_base().unwrap().domain(),
            "example.org"
        );

        let params = config.pool_params();
        assert_eq!(params.concurrency, 4);
        assert_eq!(params.max_concurrency, 8);
        assert_eq!(params.history_depth, 3);
        assert_eq!(params.request_timeout, Some(Duration::from_secs(12)));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("[provenance]\nhistory = 1\n").unwrap();
        assert_eq!(config.provenance.history, 1);
        assert_eq!(config.provenance.threads, DEFAULT_MAX_CONCURRENCY);
        assert_eq!(config.wikibase, FileWikibaseConfig::default());
        assert_eq!(config.query.endpoint, DEFAULT_QUERY_ENDPOINT);
    }

    #[test]
    fn test_default_endpoints_are_wikidata() {
        let config = FileConfig::default();
        assert_eq!(
            config.wikibase.endpoints().unwrap(),
            WikibaseEndpoints::wikidata()
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config: FileConfig = toml::from_str("[wikibase]\ntimeout_seconds = 0\n").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validate_zero_max_threads() {
        let config: FileConfig = toml::from_str("[provenance]\nmax_threads = 0\n").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidMaxThreads)
        );
    }

    #[test]
    fn test_validate_empty_entity_domain() {
        let config: FileConfig = toml::from_str("[wikibase]\nentity_domain = \"  \"\n").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::EmptyEntityDomain)
        );
    }

    #[test]
    fn test_blank_user_agent_keeps_default() {
        let config: FileConfig = toml::from_str("[wikibase]\nuser_agent = \" \"\n").unwrap();
        let endpoints = config.wikibase.endpoints().unwrap();
        assert!(endpoints.user_agent().starts_with("wikiprov/"));
    }

    #[test]
    fn test_to_toml_round_trips() {
        let config = FileConfig::default();
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("[provenance]"));
        let parsed: FileConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}

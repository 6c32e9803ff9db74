//! Wikibase endpoint configuration

use thiserror::Error;
use url::Url;

/// Wikidata, the default Wikibase site.
pub const DEFAULT_BASE_URI: &str = "https://www.wikidata.org";

const API_PATH: &str = "w/api.php";
const INDEX_PATH: &str = "w/index.php";

/// Errors raised while configuring the Wikibase client.
///
/// These are raised before any request is sent.
#[derive(Error, Debug)]
pub enum WikibaseClientError {
    #[error("Invalid Wikibase endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Could not build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// User agent sent with every request; Wikimedia rejects anonymous clients.
pub fn default_user_agent() -> String {
    format!(
        "wikiprov/{} (+{})",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_REPOSITORY")
    )
}

/// `<base>/w/api.php`, tolerating a trailing slash on `base`
pub fn api_url_for(base: &str) -> String {
    format!("{}/{}", base.trim().trim_end_matches('/'), API_PATH)
}

/// `<base>/w/index.php`, tolerating a trailing slash on `base`
pub fn index_url_for(base: &str) -> String {
    format!("{}/{}", base.trim().trim_end_matches('/'), INDEX_PATH)
}

fn parse_endpoint(raw: &str) -> Result<Url, WikibaseClientError> {
    let url = Url::parse(raw.trim()).map_err(|e| WikibaseClientError::InvalidEndpoint {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(WikibaseClientError::InvalidEndpoint {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(url)
}

/// Where revision history is requested from and how permalinks are built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikibaseEndpoints {
    api_url: Url,
    permalink_base: String,
    user_agent: String,
}

impl WikibaseEndpoints {
    /// Explicit API and permalink URLs
    pub fn new(api_url: &str, permalink_base: &str) -> Result<Self, WikibaseClientError> {
        let api_url = parse_endpoint(api_url)?;
        parse_endpoint(permalink_base)?;
        Ok(Self {
            api_url,
            permalink_base: permalink_base.trim().to_string(),
            user_agent: default_user_agent(),
        })
    }

    /// Derive both URLs from a site such as `https://www.wikidata.org`
    pub fn from_base_uri(base: &str) -> Result<Self, WikibaseClientError> {
        Self::new(&api_url_for(base), &index_url_for(base))
    }

    /// Wikidata's public endpoints
    pub fn wikidata() -> Self {
        Self {
            api_url: Url::parse(&api_url_for(DEFAULT_BASE_URI))
                .unwrap_or_else(|_| unreachable!("default API URL is valid")),
            permalink_base: index_url_for(DEFAULT_BASE_URI),
            user_agent: default_user_agent(),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    pub fn permalink_base(&self) -> &str {
        &self.permalink_base
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Default for WikibaseEndpoints {
    fn default() -> Self {
        Self::wikidata()
    }
}

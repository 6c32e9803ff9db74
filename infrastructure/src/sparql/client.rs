//! SPARQL endpoint client

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use std::time::Duration;
use tracing::debug;
use url::Url;
use wikiprov_application::{QueryError, QueryExecutor};
use wikiprov_domain::QueryResults;

/// Wikidata Query Service.
pub const DEFAULT_QUERY_ENDPOINT: &str = "https://query.wikidata.org/sparql";

const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// [`QueryExecutor`] that sends queries as `GET <endpoint>?query=...`
pub struct HttpQueryExecutor {
    client: reqwest::Client,
    user_agent: String,
}

impl HttpQueryExecutor {
    pub fn new(
        user_agent: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, user_agent))
    }

    pub fn with_client(client: reqwest::Client, user_agent: impl Into<String>) -> Self {
        Self {
            client,
            user_agent: user_agent.into(),
        }
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, QueryError> {
    let invalid = |reason: String| QueryError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };
    let url = Url::parse(endpoint.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

#[async_trait]
impl QueryExecutor for HttpQueryExecutor {
    async fn execute(&self, endpoint: &str, query: &str) -> Result<QueryResults, QueryError> {
        let url = parse_endpoint(endpoint)?;
        debug!("Querying {} ({} bytes of SPARQL)", url, query.len());

        let response = self
            .client
            .get(url)
            .query(&[("query", query)])
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| QueryError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::UnexpectedStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| QueryError::RequestFailed(e.to_string()))?;
        let results: QueryResults =
            serde_json::from_slice(&body).map_err(|e| QueryError::Decode(e.to_string()))?;
        debug!("Query returned {} rows", results.len());
        Ok(results)
    }
}

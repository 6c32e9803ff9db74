//! Wikibase revision source
//!
//! Fetches an entity's revision history from the MediaWiki API and
//! normalizes it into a [`ProvenanceRecord`].

use super::endpoints::{WikibaseClientError, WikibaseEndpoints};
use super::request::build_request;
use super::response::RevisionResponse;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, trace};
use wikiprov_application::RevisionSource;
use wikiprov_domain::{EntityIdentifier, ProvenanceError, ProvenanceRecord};

/// [`RevisionSource`] backed by a Wikibase MediaWiki API
pub struct WikibaseRevisionSource {
    client: reqwest::Client,
    endpoints: WikibaseEndpoints,
}

impl WikibaseRevisionSource {
    /// Create a source with its own HTTP client.
    ///
    /// `timeout` bounds each HTTP exchange at the transport level; the worker
    /// pool applies its own deadline on top.
    pub fn new(
        endpoints: WikibaseEndpoints,
        timeout: Option<Duration>,
    ) -> Result<Self, WikibaseClientError> {
        let mut builder = reqwest::Client::builder().user_agent(endpoints.user_agent());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, endpoints))
    }

    /// Share an existing HTTP client
    pub fn with_client(client: reqwest::Client, endpoints: WikibaseEndpoints) -> Self {
        Self { client, endpoints }
    }

    pub fn endpoints(&self) -> &WikibaseEndpoints {
        &self.endpoints
    }

    async fn fetch(
        &self,
        identifier: &EntityIdentifier,
        history_depth: usize,
    ) -> Result<ProvenanceRecord, ProvenanceError> {
        let request = build_request(&self.client, &self.endpoints, identifier, history_depth)
            .map_err(|e| ProvenanceError::Transport(e.to_string()))?;
        debug!("GET {}", request.url());

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| ProvenanceError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ProvenanceError::unexpected_status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ProvenanceError::Transport(e.to_string()))?;
        trace!("{} bytes of revision history for {}", body.len(), identifier);

        RevisionResponse::from_slice(&body)?
            .into_record(identifier, self.endpoints.permalink_base())
    }
}

#[async_trait]
impl RevisionSource for WikibaseRevisionSource {
    async fn fetch_provenance(
        &self,
        identifier: &EntityIdentifier,
        history_depth: usize,
    ) -> ProvenanceRecord {
        match self.fetch(identifier, history_depth).await {
            Ok(record) => record,
            Err(e) => {
                debug!("Provenance for {} failed: {}", identifier, e);
                ProvenanceRecord::failure(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use wikiprov_application::{PoolParams, ProvenancePool};
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PERMALINK_BASE: &str = "http://example.com";
    const USER_AGENT: &str = "wikiprov-test/0.0 (+https://example.com)";

    fn revision_body() -> serde_json::Value {
        serde_json::json!({
            "batchcomplete": "",
            "query": {
                "pages": {
                    "13318": {
                        "pageid": 13318,
                        "ns": 0,
                        "title": "Q12345",
                        "revisions": [
                            {
                                "revid": 2600,
                                "parentid": 2599,
                                "user": "Emmanuel Goldstein",
                                "timestamp": "2020-08-31T23:13:00Z",
                                "comment": "edit comment #1"
                            },
                            {
                                "revid": 2599,
                                "parentid": 2598,
                                "user": "Robert Smith",
                                "timestamp": "2020-08-30T23:13:00Z",
                                "comment": "edit comment #2"
                            }
                        ]
                    }
                }
            }
        })
    }

    fn source_for(server: &MockServer) -> Arc<WikibaseRevisionSource> {
        let endpoints =
            WikibaseEndpoints::new(&format!("{}/w/api.php", server.uri()), PERMALINK_BASE)
                .unwrap()
                .with_user_agent(USER_AGENT);
        Arc::new(WikibaseRevisionSource::new(endpoints, Some(Duration::from_secs(5))).unwrap())
    }

    fn id(raw: &str) -> EntityIdentifier {
        EntityIdentifier::parse(raw, &Default::default()).unwrap()
    }

    fn ids(count: usize) -> Vec<EntityIdentifier> {
        (1..=count).map(|n| id(&format!("Q{n}"))).collect()
    }

    #[tokio::test]
    async fn test_fetch_provenance_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("action", "query"))
            .and(query_param("format", "json"))
            .and(query_param("prop", "revisions"))
            .and(query_param("rvlimit", "2"))
            .and(query_param("rvprop", "ids|user|comment|timestamp|sha1"))
            .and(query_param("titles", "Q12345"))
            .and(header("user-agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_json(revision_body()))
            .expect(1)
            .mount(&server)
            .await;

        let record = source_for(&server).fetch_provenance(&id("Q12345"), 2).await;

        assert_eq!(record.title, "Q12345");
        assert_eq!(record.revision, 2600);
        assert_eq!(record.modified, "2020-08-31T23:13:00Z");
        assert_eq!(record.permalink, "http://example.com?oldid=2600&title=Q12345");
        assert_eq!(
            record.history,
            vec![
                "2020-08-31T23:13:00Z (oldid: 2600): 'Emmanuel Goldstein' edited: 'edit comment #1'",
                "2020-08-30T23:13:00Z (oldid: 2599): 'Robert Smith' edited: 'edit comment #2'",
            ]
        );
        assert!(record.is_success());
    }

    #[tokio::test]
    async fn test_property_requested_with_namespace() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("titles", "Property:P31"))
            .respond_with(ResponseTemplate::new(200).set_body_json(revision_body()))
            .expect(1)
            .mount(&server)
            .await;

        let record = source_for(&server).fetch_provenance(&id("P31"), 1).await;
        assert_eq!(record.title, "Property:P31");
        assert_eq!(
            record.permalink,
            "http://example.com?oldid=2600&title=Property%3AP31"
        );
    }

    #[tokio::test]
    async fn test_non_200_is_error_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let record = source_for(&server).fetch_provenance(&id("Q12345"), 5).await;

        assert_eq!(
            record.error,
            Some(ProvenanceError::UnexpectedStatus {
                expected: 200,
                received: 400
            })
        );
        assert_eq!(
            record,
            ProvenanceRecord::failure(ProvenanceError::unexpected_status(400))
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let record = source_for(&server).fetch_provenance(&id("Q1"), 5).await;
        assert!(matches!(record.error, Some(ProvenanceError::Decode(_))));
        assert!(record.title.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let endpoints =
            WikibaseEndpoints::new("http://127.0.0.1:9/w/api.php", PERMALINK_BASE).unwrap();
        let source =
            WikibaseRevisionSource::new(endpoints, Some(Duration::from_secs(2))).unwrap();

        let record = source.fetch_provenance(&id("Q1"), 5).await;
        assert!(matches!(record.error, Some(ProvenanceError::Transport(_))));
    }

    #[tokio::test]
    async fn test_pool_all_bad_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;
        let source = source_for(&server);

        for concurrency in [1, 5, 7, 10, 100] {
            let params = PoolParams::default().with_concurrency(concurrency);
            let records = ProvenancePool::new(Arc::clone(&source), params)
                .run(&ids(6))
                .await;

            assert_eq!(records.len(), 6);
            for record in records {
                assert_eq!(
                    record,
                    ProvenanceRecord::failure(ProvenanceError::unexpected_status(400))
                );
            }
        }
    }

    #[tokio::test]
    async fn test_pool_fixed_body_identical_records() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(revision_body()))
            .mount(&server)
            .await;
        let source = source_for(&server);
        let identifiers = ids(6);

        for concurrency in [1, 5, 7, 10, 100] {
            let params = PoolParams::default()
                .with_concurrency(concurrency)
                .with_history_depth(2);
            let records = ProvenancePool::new(Arc::clone(&source), params)
                .run(&identifiers)
                .await;

            assert_eq!(records.len(), identifiers.len());
            for (identifier, record) in identifiers.iter().zip(&records) {
                assert_eq!(record.title, identifier.as_str());
                assert_eq!(record.revision, 2600);
                assert_eq!(record.modified, "2020-08-31T23:13:00Z");
                assert_eq!(
                    record.permalink,
                    format!("http://example.com?oldid=2600&title={identifier}")
                );
                assert_eq!(record.history, records[0].history);
                assert!(record.is_success());
            }
        }
    }
}

//! Revision history request parameters

use super::endpoints::WikibaseEndpoints;
use reqwest::header::USER_AGENT;
use std::collections::BTreeMap;
use wikiprov_domain::EntityIdentifier;

/// Revision properties requested for every entry in the history.
pub const REVISION_PROPERTIES: &str = "ids|user|comment|timestamp|sha1";

/// Query parameters for one entity, sorted by key so the URL is stable.
pub fn revision_query(
    identifier: &EntityIdentifier,
    history_depth: usize,
) -> BTreeMap<&'static str, String> {
    let mut params = BTreeMap::new();
    params.insert("action", "query".to_string());
    params.insert("format", "json".to_string());
    params.insert("prop", "revisions".to_string());
    params.insert("rvlimit", history_depth.max(1).to_string());
    params.insert("rvprop", REVISION_PROPERTIES.to_string());
    params.insert("titles", identifier.as_str().to_string());
    params
}

/// Build the GET request for an entity's revision history.
pub fn build_request(
    client: &reqwest::Client,
    endpoints: &WikibaseEndpoints,
    identifier: &EntityIdentifier,
    history_depth: usize,
) -> Result<reqwest::Request, reqwest::Error> {
    client
        .get(endpoints.api_url().clone())
        .query(&revision_query(identifier, history_depth))
        .header(USER_AGENT, endpoints.user_agent())
        .build()
}

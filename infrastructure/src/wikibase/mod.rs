//! Wikibase revision history adapter

pub mod client;
pub mod endpoints;
pub mod request;
pub mod response;

pub use client::WikibaseRevisionSource;
pub use endpoints::{
    DEFAULT_BASE_URI, WikibaseClientError, WikibaseEndpoints, api_url_for, default_user_agent,
    index_url_for,
};

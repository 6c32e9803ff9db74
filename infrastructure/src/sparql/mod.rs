//! SPARQL query adapter

pub mod client;

pub use client::{DEFAULT_QUERY_ENDPOINT, HttpQueryExecutor};

//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod attach_provenance;
pub mod extract_identifiers;
pub mod fetch_provenance;
pub mod lookup_provenance;
pub mod query_with_provenance;

#[cfg(test)]
pub(crate) mod test_support;

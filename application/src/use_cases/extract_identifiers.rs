//! Identifier extraction
//!
//! Pulls the entity IRI bound to one variable out of every result row and
//! turns the usable ones into unique, canonical identifiers.

use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;
use wikiprov_domain::{EntityIdentifier, KnowledgeBase, QueryBinding};

/// Errors that can occur while extracting identifiers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("No usable identifiers found for key '{key}'")]
    NoUsableIdentifiers { key: String },
}

/// Extract unique identifiers from `rows`, reading the IRI bound to `key`.
///
/// Rows without a value for `key`, and values that are not entity IRIs of
/// `kb` (foreign hosts, statement nodes, literals), are skipped. The result
/// keeps first-seen order so downstream output is deterministic.
pub fn extract_identifiers(
    rows: &[QueryBinding],
    key: &str,
    kb: &KnowledgeBase,
) -> Result<Vec<EntityIdentifier>, ExtractError> {
    let mut seen = HashSet::new();
    let mut identifiers = Vec::new();
    let mut skipped = 0usize;

    for (row, binding) in rows.iter().enumerate() {
        let Some(iri) = binding.value(key) else {
            skipped += 1;
            continue;
        };

        match EntityIdentifier::from_iri(iri, kb) {
            Ok(id) => {
                if seen.insert(id.clone()) {
                    identifiers.push(id);
                }
            }
            Err(e) => {
                debug!("Skipping row {}: {}", row, e);
                skipped += 1;
            }
        }
    }

    debug!(
        "Extracted {} unique identifiers from {} rows ({} skipped)",
        identifiers.len(),
        rows.len(),
        skipped
    );

    if identifiers.is_empty() {
        return Err(ExtractError::NoUsableIdentifiers {
            key: key.to_string(),
        });
    }

    Ok(identifiers)
}

//! Permalinks to a specific revision of a record

use crate::entity::EntityIdentifier;
use std::collections::BTreeMap;
use url::form_urlencoded;

const PARAM_TITLE: &str = "title";
const PARAM_OLDID: &str = "oldid";

/// Build the permalink for `title` at revision `oldid`.
///
/// Parameters are form-encoded in sorted key order so the same input always
/// yields the same string: `https://www.wikidata.org/w/index.php?oldid=1&title=Q1`.
/// The base is used verbatim; an existing query string is extended with `&`.
pub fn build_permalink(base: &str, title: &EntityIdentifier, oldid: u64) -> String {
    let oldid = oldid.to_string();
    let params: BTreeMap<&str, &str> = [(PARAM_TITLE, title.as_str()), (PARAM_OLDID, oldid.as_str())]
        .into_iter()
        .collect();

    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();

    let base = base.trim();
    let separator = match base.find('?') {
        None => "?",
        Some(_) if base.ends_with('?') || base.ends_with('&') => "",
        Some(_) => "&",
    };
    format!("{}{}{}", base, separator, query)
}

//! SPARQL result bindings as produced by a query endpoint.
//!
//! These types mirror the `application/sparql-results+json` layout:
//!
//! ```json
//! {
//!   "head": { "vars": ["item"] },
//!   "results": {
//!     "bindings": [
//!       { "item": { "type": "uri", "value": "http://www.wikidata.org/entity/Q42" } }
//!     ]
//!   }
//! }
//! ```
//!
//! Only one key per row is ever read by the provenance pipeline; everything
//! else is carried through untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Term type of a bound value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BindingKind {
    Uri,
    Literal,
    TypedLiteral,
    Bnode,
    #[serde(other)]
    Unknown,
}

/// A single bound value in a result row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingValue {
    #[serde(rename = "type")]
    pub kind: BindingKind,
    pub value: String,
    #[serde(rename = "xml:lang", default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
}

impl BindingValue {
    pub fn uri(value: impl Into<String>) -> Self {
        Self {
            kind: BindingKind::Uri,
            value: value.into(),
            lang: None,
            datatype: None,
        }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            kind: BindingKind::Literal,
            value: value.into(),
            lang: None,
            datatype: None,
        }
    }
}

/// One row of query results: variable name to bound value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryBinding(BTreeMap<String, BindingValue>);

impl QueryBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly useful for tests and fixtures
    pub fn with(mut self, variable: impl Into<String>, value: BindingValue) -> Self {
        self.0.insert(variable.into(), value);
        self
    }

    pub fn get(&self, variable: &str) -> Option<&BindingValue> {
        self.0.get(variable)
    }

    /// The non-empty string bound to `variable`, if any
    pub fn value(&self, variable: &str) -> Option<&str> {
        self.0
            .get(variable)
            .map(|v| v.value.as_str())
            .filter(|v| !v.trim().is_empty())
    }

    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl FromIterator<(String, BindingValue)> for QueryBinding {
    fn from_iter<T: IntoIterator<Item = (String, BindingValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The `results` block of a SPARQL JSON response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bindings {
    #[serde(default)]
    pub bindings: Vec<QueryBinding>,
}

/// A complete query result envelope: head metadata plus ordered rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResults {
    #[serde(default)]
    pub head: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub results: Bindings,
}

impl QueryResults {
    pub fn new(bindings: Vec<QueryBinding>) -> Self {
        Self {
            head: serde_json::Map::new(),
            results: Bindings { bindings },
        }
    }

    pub fn with_vars<I, S>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let vars = vars
            .into_iter()
            .map(|v| serde_json::Value::String(v.into()))
            .collect();
        self.head
            .insert("vars".to_string(), serde_json::Value::Array(vars));
        self
    }

    pub fn rows(&self) -> &[QueryBinding] {
        &self.results.bindings
    }

    pub fn len(&self) -> usize {
        self.results.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.bindings.is_empty()
    }
}

//! `.sparql` script parsing
//!
//! A script is a shebang line, optional `KEY=value` header lines and the
//! query text:
//!
//! ```text
//! #!/usr/bin/wikiprov
//! ENDPOINT=https://query.wikidata.org/sparql
//! SUBJECTPARAM=item
//! HISTORY=3
//!
//! SELECT ?item WHERE { ?item wdt:P31 wd:Q5 } LIMIT 10
//! ```
//!
//! Header keys are case-insensitive and may appear anywhere in the file.

use thiserror::Error;

const ENDPOINT: &str = "ENDPOINT";
const WIKIBASE_URL: &str = "WIKIBASEURL";
const HISTORY: &str = "HISTORY";
const SUBJECT_PARAM: &str = "SUBJECTPARAM";

/// Structural problems in a script
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScriptError {
    #[error("shebang is empty or incorrect: the first line must start with '#!'")]
    MissingShebang,

    #[error("incorrect {key} formatting: '{line}'")]
    MalformedHeader { key: &'static str, line: String },

    #[error("HISTORY must be a positive number, got '{0}'")]
    InvalidHistory(String),

    #[error("script contains no query")]
    EmptyQuery,
}

/// A parsed `.sparql` script
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparqlScript {
    pub endpoint: Option<String>,
    pub wikibase_url: Option<String>,
    pub history: Option<usize>,
    pub subject_param: Option<String>,
    pub query: String,
}

/// `Some(value)` when `line` is a `KEY=value` header for `key`
fn header_value<'a>(line: &'a str, key: &'static str) -> Result<Option<&'a str>, ScriptError> {
    let Some((name, value)) = line.split_once('=') else {
        return Ok(None);
    };
    if !name.trim().eq_ignore_ascii_case(key) {
        return Ok(None);
    }
    let value = value.trim();
    if value.is_empty() {
        return Err(ScriptError::MalformedHeader {
            key,
            line: line.to_string(),
        });
    }
    Ok(Some(value))
}

impl SparqlScript {
    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        let mut lines = text.lines().skip_while(|line| line.trim().is_empty());
        match lines.next() {
            Some(first) if first.trim_start().starts_with("#!") => {}
            _ => return Err(ScriptError::MissingShebang),
        }

        let mut script = SparqlScript::default();
        let mut query = Vec::new();

        for line in lines {
            if let Some(value) = header_value(line, ENDPOINT)? {
                script.endpoint = Some(value.to_string());
            } else if let Some(value) = header_value(line, WIKIBASE_URL)? {
                script.wikibase_url = Some(value.to_string());
            } else if let Some(value) = header_value(line, SUBJECT_PARAM)? {
                script.subject_param = Some(value.to_string());
            } else if let Some(value) = header_value(line, HISTORY)? {
                let depth = value
                    .parse::<usize>()
                    .ok()
                    .filter(|depth| *depth > 0)
                    .ok_or_else(|| ScriptError::InvalidHistory(value.to_string()))?;
                script.history = Some(depth);
            } else if !line.trim().is_empty() {
                query.push(line);
            }
        }

        if query.is_empty() {
            return Err(ScriptError::EmptyQuery);
        }
        script.query = query.join("\n");
        Ok(script)
    }
}

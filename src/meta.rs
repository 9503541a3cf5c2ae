//! Post frontmatter: extraction and schema validation.
//!
//! Every post starts with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Complex numbers
//! summary: Representing complex numbers in Python
//! tags: [Python]
//! created: 1991-02-20
//! ---
//! # Complex numbers
//! ...
//! ```
//!
//! The opening fence must be the first line of the file. All four keys are
//! required. `created` is a plain `YYYY-MM-DD` date; timestamps given as
//! numbers are rejected.

use crate::date::Date;
use serde_yaml::{Mapping, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetaError {
    #[error("Invalid YAML frontmatter in {0}")]
    Parse(String),
    #[error("Frontmatter missing from {0}")]
    Missing(String),
    #[error("Required metadata {} {} missing from {file}", noun(.keys), quoted(.keys))]
    MissingKeys { file: String, keys: Vec<String> },
    #[error("Invalid metadata {} {} in {file}", noun(.keys), quoted(.keys))]
    InvalidKeys { file: String, keys: Vec<String> },
}

fn noun(keys: &[String]) -> &'static str {
    if keys.len() > 1 { "keys" } else { "key" }
}

fn quoted(keys: &[String]) -> String {
    keys.iter()
        .map(|key| format!("\"{}\"", key))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validated post metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    pub title: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub created: Date,
}

/// Keys in the order they are checked and reported.
const SCHEMA: [&str; 4] = ["title", "summary", "tags", "created"];

/// Parse the frontmatter of `text`, returning the metadata and the document
/// body that follows the closing fence. `file` names the document in errors.
pub fn parse<'a>(file: &str, text: &'a str) -> Result<(Metadata, &'a str), MetaError> {
    let (yaml, body) = split(text).ok_or_else(|| MetaError::Missing(file.to_string()))?;
    if yaml.trim().is_empty() {
        return Err(MetaError::Missing(file.to_string()));
    }

    let value: Value =
        serde_yaml::from_str(yaml).map_err(|_| MetaError::Parse(file.to_string()))?;
    let mapping = match value {
        Value::Mapping(mapping) if mapping.is_empty() => {
            return Err(MetaError::Missing(file.to_string()));
        }
        Value::Mapping(mapping) => mapping,
        Value::Null => return Err(MetaError::Missing(file.to_string())),
        _ => return Err(MetaError::Parse(file.to_string())),
    };

    Ok((validate(file, &mapping)?, body))
}

/// Split a document into its frontmatter and body.
///
/// Returns `None` unless the first line is `---` and a later line is `---`.
fn split(text: &str) -> Option<(&str, &str)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let rest = text.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn validate(file: &str, mapping: &Mapping) -> Result<Metadata, MetaError> {
    let missing: Vec<String> = SCHEMA
        .iter()
        .filter(|key| !mapping.contains_key(**key))
        .map(|key| key.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(MetaError::MissingKeys {
            file: file.to_string(),
            keys: missing,
        });
    }

    let title = mapping.get("title").and_then(text);
    let summary = mapping.get("summary").and_then(text);
    let tags = mapping.get("tags").and_then(tag_list);
    let created = mapping
        .get("created")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<Date>().ok());

    match (title, summary, tags, created) {
        (Some(title), Some(summary), Some(tags), Some(created)) => Ok(Metadata {
            title,
            summary,
            tags,
            created,
        }),
        (title, summary, tags, created) => {
            let valid = [
                title.is_some(),
                summary.is_some(),
                tags.is_some(),
                created.is_some(),
            ];
            let keys = SCHEMA
                .iter()
                .zip(valid)
                .filter(|(_, ok)| !ok)
                .map(|(key, _)| key.to_string())
                .collect();
            Err(MetaError::InvalidKeys {
                file: file.to_string(),
                keys,
            })
        }
    }
}

fn text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn tag_list(value: &Value) -> Option<Vec<String>> {
    value.as_sequence()?.iter().map(text).collect()
}

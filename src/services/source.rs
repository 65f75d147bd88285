//! Content-source parsing: a YAML mapping of card key to card fields.
//!
//! The mapping is read in document order, which becomes the source order for
//! ingestion stacking and reload grid placement. A key with an empty value is
//! a card with empty fields. Scalar keys (numbers, booleans) are taken by
//! their text form.

use scene::doc::{CardFields, DocError, SourceRecords};
use serde_yaml::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("malformed content source: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("content source must be a mapping of card keys to fields")]
    NotAMapping,
    #[error("content source key must be a scalar, got {0}")]
    BadKey(String),
    #[error("bad fields for card '{key}': {source}")]
    BadFields {
        key: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error(transparent)]
    Records(#[from] DocError),
}

/// Parse content-source text into ordered records.
///
/// An empty document yields no records.
///
/// # Errors
///
/// Returns a `SourceError` if the text is not YAML, the top level is not a
/// mapping, a key is not a scalar, a value does not have the card field
/// shape, or a key repeats.
pub fn parse_source(text: &str) -> Result<SourceRecords, SourceError> {
    let root: Value = serde_yaml::from_str(text)?;
    let mapping = match root {
        Value::Mapping(mapping) => mapping,
        Value::Null => return Ok(SourceRecords::new()),
        _ => return Err(SourceError::NotAMapping),
    };

    let mut records = SourceRecords::new();
    for (key, value) in mapping {
        let key = key_text(&key)?;
        let fields = match value {
            Value::Null => CardFields::default(),
            value => serde_yaml::from_value(value).map_err(|source| SourceError::BadFields { key: key.clone(), source })?,
        };
        records.push(key, fields)?;
    }
    Ok(records)
}

fn key_text(key: &Value) -> Result<String, SourceError> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(SourceError::BadKey(format!("{other:?}"))),
    }
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;

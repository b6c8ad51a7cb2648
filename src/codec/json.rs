use serde_json::{Map, Value};

use crate::codec::OBFUSCATION_MARKER;
use crate::errors::ObfuscateError;

/// Record-sequence view of a JSON document.
///
/// The original top-level shape is kept so a single record re-encodes as a
/// single record, not a one-element array. Key order within each record is
/// preserved across the round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonDocument {
    Record(Map<String, Value>),
    Records(Vec<Map<String, Value>>),
}

/// Parses either a single record or a sequence of records. Anything else
/// (a scalar top level, a non-object array element) is a decode error.
pub fn decode(data: &[u8]) -> Result<JsonDocument, ObfuscateError> {
    let value: Value = serde_json::from_slice(data)
        .map_err(|e| ObfuscateError::Decode(e.to_string()))?;
    match value {
        Value::Object(record) => Ok(JsonDocument::Record(record)),
        Value::Array(items) => {
            let mut records = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Object(record) => records.push(record),
                    other => {
                        return Err(ObfuscateError::Decode(format!(
                            "expected an array of objects, found element: {other}"
                        )))
                    }
                }
            }
            Ok(JsonDocument::Records(records))
        }
        other => Err(ObfuscateError::Decode(format!(
            "top-level JSON must be an object or an array of objects, found: {other}"
        ))),
    }
}

/// Replaces values of matching top-level keys. Nested objects and arrays are
/// never descended into; recursive matching is an extension point, not a
/// supported behavior.
pub fn transform(doc: &JsonDocument, fields: &[String]) -> JsonDocument {
    match doc {
        JsonDocument::Record(record) => JsonDocument::Record(obfuscate_record(record, fields)),
        JsonDocument::Records(records) => JsonDocument::Records(
            records
                .iter()
                .map(|record| obfuscate_record(record, fields))
                .collect(),
        ),
    }
}

fn obfuscate_record(record: &Map<String, Value>, fields: &[String]) -> Map<String, Value> {
    let mut out = record.clone();
    for field in fields {
        if let Some(slot) = out.get_mut(field) {
            *slot = Value::String(OBFUSCATION_MARKER.to_string());
        }
    }
    out
}

/// Pretty-printed output (2-space indent), original top-level shape.
pub fn encode(doc: &JsonDocument) -> Result<Vec<u8>, ObfuscateError> {
    let result = match doc {
        JsonDocument::Record(record) => serde_json::to_vec_pretty(record),
        JsonDocument::Records(records) => serde_json::to_vec_pretty(records),
    };
    result.map_err(|e| ObfuscateError::Encode(e.to_string()))
}

pub fn obfuscate(data: &[u8], fields: &[String]) -> Result<Vec<u8>, ObfuscateError> {
    let doc = decode(data)?;
    encode(&transform(&doc, fields))
}

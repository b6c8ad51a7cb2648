use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ObfuscateError;

/// Input contract for one obfuscation call.
///
/// Matches the JSON shape a serverless trigger would deliver:
///
/// ```json
/// {
///     "file_to_obfuscate": "s3://my-bucket/data/file1.csv",
///     "pii_fields": ["name", "email_address"]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub file_to_obfuscate: String,
    #[serde(default)]
    pub pii_fields: Vec<String>,
}

impl Event {
    pub fn new(file_to_obfuscate: impl Into<String>, pii_fields: Vec<String>) -> Self {
        Self {
            file_to_obfuscate: file_to_obfuscate.into(),
            pii_fields,
        }
    }

    /// Deserializes and validates an event from its JSON representation.
    pub fn from_json(input: &str) -> Result<Self, ObfuscateError> {
        let event: Event = serde_json::from_str(input)
            .map_err(|e| ObfuscateError::MalformedEvent(e.to_string()))?;
        event.validate()?;
        Ok(event)
    }

    /// Both keys are required; an empty field list is as malformed as a
    /// missing one.
    pub fn validate(&self) -> Result<(), ObfuscateError> {
        if self.file_to_obfuscate.is_empty() {
            return Err(ObfuscateError::MalformedEvent(
                "'file_to_obfuscate' must be provided".into(),
            ));
        }
        if self.pii_fields.is_empty() {
            return Err(ObfuscateError::MalformedEvent(
                "'pii_fields' must be provided and non-empty".into(),
            ));
        }
        Ok(())
    }
}

/// Bucket/key pair parsed from an `s3://bucket/key` locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Location {
    pub bucket: String,
    pub key: String,
}

impl fmt::Display for S3Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

impl FromStr for S3Location {
    type Err = ObfuscateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.strip_prefix("s3://").ok_or_else(|| {
            ObfuscateError::InvalidLocator(format!("expected {s} to begin with s3://"))
        })?;
        let (bucket, key) = rest.split_once('/').ok_or_else(|| {
            ObfuscateError::InvalidLocator(format!("{s} must include both bucket and key"))
        })?;
        if bucket.is_empty() || key.is_empty() {
            return Err(ObfuscateError::InvalidLocator(format!(
                "{s} has an empty bucket or key"
            )));
        }
        Ok(S3Location {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }
}

use std::fmt;

use crate::codec;
use crate::errors::ObfuscateError;

/// Supported file formats, resolved once from the object key's extension.
///
/// Each variant binds one decode/transform/encode pipeline; there is no
/// fallback between formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
    Parquet,
}

impl FileFormat {
    /// Case-insensitive suffix match on the object key.
    pub fn from_key(key: &str) -> Result<Self, ObfuscateError> {
        let lower = key.to_ascii_lowercase();
        if lower.ends_with(".csv") {
            Ok(FileFormat::Csv)
        } else if lower.ends_with(".json") {
            Ok(FileFormat::Json)
        } else if lower.ends_with(".parquet") {
            Ok(FileFormat::Parquet)
        } else {
            Err(ObfuscateError::UnsupportedFormat(key.to_string()))
        }
    }

    /// Runs the bound codec pair: decode, replace targeted fields, encode.
    pub fn obfuscate(self, data: &[u8], fields: &[String]) -> Result<Vec<u8>, ObfuscateError> {
        match self {
            FileFormat::Csv => codec::csv::obfuscate(data, fields),
            FileFormat::Json => codec::json::obfuscate(data, fields),
            FileFormat::Parquet => codec::parquet::obfuscate(data, fields),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileFormat::Csv => "csv",
            FileFormat::Json => "json",
            FileFormat::Parquet => "parquet",
        };
        write!(f, "{name}")
    }
}

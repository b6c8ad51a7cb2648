use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ObfuscateError {
    #[error("malformed event: {0}")]
    MalformedEvent(String),
    #[error("invalid locator: {0}")]
    InvalidLocator(String),
    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),
    #[error("source unavailable: {0}")]
    SourceUnavailable(#[from] StoreError),
    #[error("cannot coerce column '{column}' of type {data_type} to the obfuscation marker")]
    TypeCoercion { column: String, data_type: String },
    #[error("decode error: {0}")]
    Decode(String),
    #[error("encode error: {0}")]
    Encode(String),
    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

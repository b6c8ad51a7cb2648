use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object not found: s3://{bucket}/{key}")]
    NotFound { bucket: String, key: String },
    #[error("access denied: s3://{bucket}/{key}")]
    Forbidden { bucket: String, key: String },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status} from object store: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("{0}")]
    Other(String),
}

/// Object store contract consumed by the obfuscation flow.
///
/// `get_object` reads an entire object into memory; `put_object` overwrites
/// unconditionally. Implementations must be safe to share across concurrent
/// calls.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StoreError>;

    async fn put_object(&self, bucket: &str, key: &str, body: Bytes) -> Result<(), StoreError>;
}

/// In-memory store for tests and library callers that already hold the
/// bytes. Thread-safe via `RwLock`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<HashMap<String, Bytes>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn object_key(bucket: &str, key: &str) -> String {
        format!("{bucket}/{key}")
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StoreError> {
        let objects = self
            .objects
            .read()
            .map_err(|_| StoreError::Other("lock poisoned".into()))?;
        objects
            .get(&Self::object_key(bucket, key))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }

    async fn put_object(&self, bucket: &str, key: &str, body: Bytes) -> Result<(), StoreError> {
        self.objects
            .write()
            .map_err(|_| StoreError::Other("lock poisoned".into()))?
            .insert(Self::object_key(bucket, key), body);
        Ok(())
    }
}

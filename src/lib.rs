pub mod codec;
pub mod config;
pub mod errors;
pub mod event;
pub mod format;
pub mod handler;
pub mod logger;
pub mod metrics;
pub mod s3;
pub mod store;

pub use codec::OBFUSCATION_MARKER;
pub use errors::ObfuscateError;
pub use event::{Event, S3Location};
pub use format::FileFormat;
pub use handler::obfuscate_file;
pub use store::{MemoryStore, ObjectStore, StoreError};

use std::io::Cursor;

use tracing::info;

use crate::errors::ObfuscateError;
use crate::event::{Event, S3Location};
use crate::format::FileFormat;
use crate::store::ObjectStore;

/// Fetches the object named by `event`, replaces the values of the requested
/// fields with the obfuscation marker, and returns the re-encoded bytes as a
/// buffer positioned at offset zero.
///
/// The format is resolved from the key's extension before any fetch, so an
/// unsupported extension never touches the store. Retrieval failures
/// propagate as [`ObfuscateError::SourceUnavailable`] without retry; the
/// source object is never written back or mutated.
pub async fn obfuscate_file(
    store: &dyn ObjectStore,
    event: &Event,
) -> Result<Cursor<Vec<u8>>, ObfuscateError> {
    event.validate()?;
    let location: S3Location = event.file_to_obfuscate.parse()?;
    let format = FileFormat::from_key(&location.key)?;

    info!(bucket = %location.bucket, key = %location.key, %format, "fetching object");
    let raw = store.get_object(&location.bucket, &location.key).await?;

    let out = format.obfuscate(&raw, &event.pii_fields)?;
    info!(input_bytes = raw.len(), output_bytes = out.len(), "obfuscation complete");
    Ok(Cursor::new(out))
}

//! Per-format decode/transform/encode pipelines.
//!
//! Each codec owns its in-memory view for the duration of one call: CSV and
//! Parquet build a tabular view, JSON a sequence of records. Transforms
//! replace the values of requested fields with [`OBFUSCATION_MARKER`] and
//! leave everything else untouched; a requested field absent from the
//! document is silently ignored.

pub mod csv;
pub mod json;
pub mod parquet;

/// Placeholder written over every targeted value, in every format.
pub const OBFUSCATION_MARKER: &str = "***";

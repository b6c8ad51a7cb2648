use std::io::Cursor;
use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::codec::OBFUSCATION_MARKER;
use crate::errors::ObfuscateError;

/// Columnar view of a Parquet document: the Arrow schema plus record batches
/// in file order.
#[derive(Debug, Clone)]
pub struct ParquetDocument {
    pub schema: SchemaRef,
    pub batches: Vec<RecordBatch>,
}

pub fn decode(data: &[u8]) -> Result<ParquetDocument, ObfuscateError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(Bytes::copy_from_slice(data))
        .map_err(|e| ObfuscateError::Decode(e.to_string()))?;
    let schema = builder.schema().clone();
    let reader = builder
        .build()
        .map_err(|e| ObfuscateError::Decode(e.to_string()))?;
    let batches = reader
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ObfuscateError::Decode(e.to_string()))?;
    Ok(ParquetDocument { schema, batches })
}

/// Rewrites every requested column present in the schema as a non-nullable
/// `Utf8` column filled with the marker.
///
/// Coercion policy: any flat column (primitive, string, binary, dictionary
/// of those) is coerced to `Utf8`. A requested column of nested type would
/// silently lose structure, so it fails with `TypeCoercion` instead. The
/// output schema depends only on the input schema and the field set.
pub fn transform(doc: &ParquetDocument, fields: &[String]) -> Result<ParquetDocument, ObfuscateError> {
    let targeted: Vec<usize> = doc
        .schema
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, f)| fields.iter().any(|name| name == f.name()))
        .map(|(i, _)| i)
        .collect();

    for &i in &targeted {
        let field = doc.schema.field(i);
        if field.data_type().is_nested() {
            return Err(ObfuscateError::TypeCoercion {
                column: field.name().clone(),
                data_type: field.data_type().to_string(),
            });
        }
    }

    let fields_out: Vec<Field> = doc
        .schema
        .fields()
        .iter()
        .enumerate()
        .map(|(i, f)| {
            if targeted.contains(&i) {
                Field::new(f.name().clone(), DataType::Utf8, false)
            } else {
                f.as_ref().clone()
            }
        })
        .collect();
    let schema = Arc::new(Schema::new_with_metadata(
        fields_out,
        doc.schema.metadata().clone(),
    ));

    let mut batches = Vec::with_capacity(doc.batches.len());
    for batch in &doc.batches {
        let columns: Vec<ArrayRef> = batch
            .columns()
            .iter()
            .enumerate()
            .map(|(i, column)| {
                if targeted.contains(&i) {
                    Arc::new(StringArray::from(vec![OBFUSCATION_MARKER; batch.num_rows()]))
                        as ArrayRef
                } else {
                    column.clone()
                }
            })
            .collect();
        let batch = RecordBatch::try_new(schema.clone(), columns)
            .map_err(|e| ObfuscateError::Encode(e.to_string()))?;
        batches.push(batch);
    }
    Ok(ParquetDocument { schema, batches })
}

pub fn encode(doc: &ParquetDocument) -> Result<Vec<u8>, ObfuscateError> {
    let mut cursor = Cursor::new(Vec::new());
    let props = WriterProperties::builder().build();
    let mut writer = ArrowWriter::try_new(&mut cursor, doc.schema.clone(), Some(props))
        .map_err(|e| ObfuscateError::Encode(e.to_string()))?;
    for batch in &doc.batches {
        writer
            .write(batch)
            .map_err(|e| ObfuscateError::Encode(e.to_string()))?;
    }
    writer
        .close()
        .map_err(|e| ObfuscateError::Encode(e.to_string()))?;
    Ok(cursor.into_inner())
}

pub fn obfuscate(data: &[u8], fields: &[String]) -> Result<Vec<u8>, ObfuscateError> {
    let doc = decode(data)?;
    encode(&transform(&doc, fields)?)
}

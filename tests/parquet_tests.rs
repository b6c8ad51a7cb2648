use std::io::Cursor;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Int64Array, ListArray, StringArray};
use arrow::datatypes::{DataType, Field, Int64Type, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use pii_obfuscator::codec::parquet::{decode, obfuscate};
use pii_obfuscator::errors::ObfuscateError;

fn write_parquet(batch: &RecordBatch) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    let mut writer = ArrowWriter::try_new(&mut cursor, batch.schema(), None).unwrap();
    writer.write(batch).unwrap();
    writer.close().unwrap();
    cursor.into_inner()
}

fn people_parquet() -> Vec<u8> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("age", DataType::Int64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from(vec!["Alice", "Bob"])) as ArrayRef,
            Arc::new(Int64Array::from(vec![30, 25])),
        ],
    )
    .unwrap();
    write_parquet(&batch)
}

fn string_column(batch: &RecordBatch, index: usize) -> &StringArray {
    batch
        .column(index)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap()
}

#[test]
fn obfuscates_requested_column() {
    let out = obfuscate(&people_parquet(), &["name".to_string()]).unwrap();
    let doc = decode(&out).unwrap();

    assert_eq!(doc.schema.field(0).name(), "name");
    assert_eq!(doc.schema.field(0).data_type(), &DataType::Utf8);
    assert_eq!(doc.schema.field(1).name(), "age");
    assert_eq!(doc.schema.field(1).data_type(), &DataType::Int64);

    let batch = &doc.batches[0];
    assert_eq!(batch.num_rows(), 2);
    let names = string_column(batch, 0);
    assert_eq!(names.value(0), "***");
    assert_eq!(names.value(1), "***");
    let ages = batch
        .column(1)
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    assert_eq!(ages.value(0), 30);
    assert_eq!(ages.value(1), 25);
}

#[test]
fn coerces_non_string_column_to_utf8() {
    let out = obfuscate(&people_parquet(), &["age".to_string()]).unwrap();
    let doc = decode(&out).unwrap();

    assert_eq!(doc.schema.field(1).data_type(), &DataType::Utf8);
    assert!(!doc.schema.field(1).is_nullable());
    let ages = string_column(&doc.batches[0], 1);
    assert_eq!(ages.value(0), "***");
    assert_eq!(ages.value(1), "***");
}

#[test]
fn absent_field_leaves_document_unchanged() {
    let original = decode(&people_parquet()).unwrap();
    let out = obfuscate(&people_parquet(), &["ssn".to_string()]).unwrap();
    let doc = decode(&out).unwrap();

    assert_eq!(doc.schema.fields(), original.schema.fields());
    assert_eq!(doc.batches, original.batches);
}

#[test]
fn nested_column_is_a_type_coercion_error() {
    let tags = ListArray::from_iter_primitive::<Int64Type, _, _>(vec![
        Some(vec![Some(1), Some(2)]),
        Some(vec![Some(3)]),
    ]);
    let schema = Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("tags", tags.data_type().clone(), true),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from(vec!["Alice", "Bob"])) as ArrayRef,
            Arc::new(tags),
        ],
    )
    .unwrap();
    let data = write_parquet(&batch);

    let err = obfuscate(&data, &["tags".to_string()]).unwrap_err();
    match err {
        ObfuscateError::TypeCoercion { column, .. } => assert_eq!(column, "tags"),
        other => panic!("expected TypeCoercion, got: {other}"),
    }
}

#[test]
fn output_schema_is_deterministic_and_stable() {
    let fields = vec!["name".to_string()];
    let once = obfuscate(&people_parquet(), &fields).unwrap();
    let twice = obfuscate(&once, &fields).unwrap();

    let first = decode(&once).unwrap();
    let second = decode(&twice).unwrap();
    assert_eq!(first.schema.fields(), second.schema.fields());
    assert_eq!(first.batches, second.batches);
}

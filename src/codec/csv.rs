use csv::{Reader, Writer};

use crate::codec::OBFUSCATION_MARKER;
use crate::errors::ObfuscateError;

/// Tabular view of a CSV document: header record plus rows, both in file
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDocument {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Parses delimited text with a header row. Ragged rows are rejected by the
/// parser.
pub fn decode(data: &[u8]) -> Result<CsvDocument, ObfuscateError> {
    let mut reader = Reader::from_reader(data);
    let headers = reader
        .headers()
        .map_err(|e| ObfuscateError::Decode(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ObfuscateError::Decode(e.to_string()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(CsvDocument { headers, rows })
}

/// Overwrites every cell in a requested column with the marker. Columns not
/// in the request pass through with their original text.
pub fn transform(doc: &CsvDocument, fields: &[String]) -> CsvDocument {
    let targeted: Vec<usize> = doc
        .headers
        .iter()
        .enumerate()
        .filter(|(_, name)| fields.iter().any(|f| f == *name))
        .map(|(i, _)| i)
        .collect();
    let rows = doc
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(i, value)| {
                    if targeted.contains(&i) {
                        OBFUSCATION_MARKER.to_string()
                    } else {
                        value.clone()
                    }
                })
                .collect()
        })
        .collect();
    CsvDocument {
        headers: doc.headers.clone(),
        rows,
    }
}

/// Serializes the view back with the same header and row order.
pub fn encode(doc: &CsvDocument) -> Result<Vec<u8>, ObfuscateError> {
    let mut writer = Writer::from_writer(Vec::new());
    writer
        .write_record(&doc.headers)
        .map_err(|e| ObfuscateError::Encode(e.to_string()))?;
    for row in &doc.rows {
        writer
            .write_record(row)
            .map_err(|e| ObfuscateError::Encode(e.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|e| ObfuscateError::Encode(e.to_string()))
}

pub fn obfuscate(data: &[u8], fields: &[String]) -> Result<Vec<u8>, ObfuscateError> {
    let doc = decode(data)?;
    encode(&transform(&doc, fields))
}

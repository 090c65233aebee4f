//! CSV encoding and decoding of record rows.
//!
//! Encoding writes a header row from the record's column names and quotes
//! fields only where needed, so scraped race names containing commas or
//! quotes survive the round trip. Decoding is best-effort: a malformed row
//! is logged and skipped, never aborting the whole blob.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// Serialize rows to CSV text with a header row.
///
/// An empty slice encodes to an empty string, matching how a missing blob
/// reads back.
///
/// # Errors
///
/// Returns [`StoreError::Csv`] if serialization fails.
pub fn encode_rows<T: Serialize>(rows: &[T]) -> Result<String, StoreError> {
    if rows.is_empty() {
        return Ok(String::new());
    }
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| StoreError::Other(anyhow::anyhow!("csv writer: {e}")))?;
    String::from_utf8(bytes).map_err(|e| StoreError::Other(anyhow::anyhow!("csv non-utf8: {e}")))
}

/// Deserialize rows from CSV text, skipping rows that fail to parse.
///
/// Skipped rows are logged with their line number; a single malformed row
/// never costs the rest of the blob.
pub fn decode_rows<T: DeserializeOwned>(text: &str, blob: &str) -> Vec<T> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let mut rows = Vec::new();
    for (index, result) in reader.deserialize::<T>().enumerate() {
        match result {
            Ok(row) => rows.push(row),
            Err(error) => {
                // Header is line 1; data rows start at line 2.
                tracing::warn!(%blob, line = index + 2, %error, "skipping malformed row");
            }
        }
    }
    rows
}

//! JSON persistence for record batches
//!
//! The loader's callers persist loaded batches to durable storage and read
//! them back before chunking/indexing. The on-disk format is a single JSON
//! array of records; it is an internal serialization, not a wire format.

use crate::document::DocumentRecord;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during record persistence
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Serializes a record batch to a file
pub fn save_records(path: impl AsRef<Path>, records: &[DocumentRecord]) -> StoreResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, records)?;
    tracing::debug!("Saved {} records to {}", records.len(), path.display());
    Ok(())
}

/// Loads a record batch from a file written by [`save_records`]
pub fn load_records(path: impl AsRef<Path>) -> StoreResult<Vec<DocumentRecord>> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    let records = serde_json::from_reader(reader)?;
    Ok(records)
}

//! Document records and their persistence
//!
//! The data model for the loading pipeline: the [`DocumentRecord`] entity
//! produced by crawling and file ingestion, and the JSON record store the
//! callers persist batches with.

mod record;
mod store;

pub use record::{DocumentRecord, SourceType};
pub use store::{load_records, save_records, StoreError, StoreResult};

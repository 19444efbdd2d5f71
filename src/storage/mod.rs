//! Storage module for persisting normalized records
//!
//! The sink accepts the closed set of record kinds in [`crate::model::Record`]
//! and performs idempotent upserts keyed by natural composite keys. Conflict
//! policy is first-write-wins: an existing row is never updated or deleted.

mod schema;
mod sqlite;
mod traits;

pub use schema::initialize_schema;
pub use sqlite::SqliteStorage;
pub use traits::{RecordSink, StorageError, StorageResult, UpsertOutcome};

use crate::CrawlError;
use std::path::Path;

/// Initializes or opens the crawl database
///
/// Failure here is the one condition that aborts the whole run: nothing can
/// be durably recorded without a working sink.
pub fn open_storage(path: &Path) -> Result<SqliteStorage, CrawlError> {
    SqliteStorage::new(path)
}

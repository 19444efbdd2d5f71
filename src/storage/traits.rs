//! Sink trait and storage error types

use crate::model::Record;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Outcome of a single-record upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new row was written
    Inserted,
    /// The natural key already existed; the stored row was left untouched
    Ignored,
}

/// Trait for persistence sink implementations
///
/// Each upsert must be self-contained: wrapped in a transaction scoped to
/// that one record, rolled back on failure, and safe to call from concurrent
/// record completions serialized by the caller.
pub trait RecordSink {
    /// Idempotently persists one record keyed by its natural key
    fn upsert(&mut self, record: &Record) -> StorageResult<UpsertOutcome>;

    /// Row counts per record kind: (bills, bill_versions, bill_votes)
    fn counts(&self) -> StorageResult<(u64, u64, u64)>;
}

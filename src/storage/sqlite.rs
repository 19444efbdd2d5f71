//! SQLite persistence sink
//!
//! Each upsert runs inside a transaction scoped to that single record. On a
//! natural-key conflict the existing row wins and the statement affects zero
//! rows; on failure the transaction rolls back and the caller decides how to
//! log and continue.

use crate::model::Record;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{RecordSink, StorageResult, UpsertOutcome};
use crate::CrawlError;
use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens or creates the database at the given path
    pub fn new(path: &Path) -> Result<Self, CrawlError> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> Result<Self, CrawlError> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl RecordSink for SqliteStorage {
    fn upsert(&mut self, record: &Record) -> StorageResult<UpsertOutcome> {
        let now = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;

        // Closed dispatch over the record variants: a new entity kind fails
        // to compile until it gets an upsert statement here.
        let affected = match record {
            Record::Bill(bill) => tx.execute(
                "INSERT INTO bills (number_code, parliament_number, session_number,
                    bill_history, latest_completed_stage, current_stage, stage_date,
                    division_number, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                 ON CONFLICT(number_code, parliament_number, session_number) DO NOTHING",
                params![
                    bill.key.number_code,
                    bill.key.parliament,
                    bill.key.session,
                    bill.bill_history,
                    bill.latest_completed_stage,
                    bill.current_stage,
                    bill.stage_date,
                    bill.division_number,
                    now,
                ],
            )?,
            Record::Version(version) => tx.execute(
                "INSERT INTO bill_versions (bill_number, parliament_number, session_number,
                    version_index, document_type, title, short_title, sponsor,
                    bill_ref_number, bill_history, introduction, body, division_number,
                    created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
                 ON CONFLICT(bill_number, parliament_number, session_number) DO NOTHING",
                params![
                    version.key.number_code,
                    version.key.parliament,
                    version.key.session,
                    version.version_index,
                    version.document_type,
                    version.title,
                    version.short_title,
                    version.sponsor,
                    version.bill_ref_number,
                    version.bill_history,
                    version.introduction,
                    version.body,
                    version.division_number,
                    now,
                ],
            )?,
            Record::Vote(vote) => tx.execute(
                "INSERT INTO bill_votes (related_bill_number, parliament_number,
                    session_number, vote_date, description, decision, total_yeas,
                    total_nays, total_abstain, division_number, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                 ON CONFLICT(related_bill_number, parliament_number, session_number, vote_date)
                 DO NOTHING",
                params![
                    vote.related_bill_number,
                    vote.parliament,
                    vote.session,
                    vote.vote_date,
                    vote.description,
                    vote.decision,
                    vote.total_yeas,
                    vote.total_nays,
                    vote.total_abstain,
                    vote.division_number,
                    now,
                ],
            )?,
        };

        tx.commit()?;

        if affected == 0 {
            Ok(UpsertOutcome::Ignored)
        } else {
            Ok(UpsertOutcome::Inserted)
        }
    }

    fn counts(&self) -> StorageResult<(u64, u64, u64)> {
        let count = |table: &str| -> StorageResult<u64> {
            let n: i64 = self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                    row.get(0)
                })?;
            Ok(n as u64)
        };

        Ok((
            count("bills")?,
            count("bill_versions")?,
            count("bill_votes")?,
        ))
    }
}

//! Database schema definitions
//!
//! Natural keys are enforced with UNIQUE constraints so conflict resolution
//! can be expressed as `ON CONFLICT ... DO NOTHING`.

/// SQL schema for the crawl database
pub const SCHEMA_SQL: &str = r#"
-- Bills discovered via the per-bill data document
CREATE TABLE IF NOT EXISTS bills (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    number_code TEXT NOT NULL,
    parliament_number INTEGER NOT NULL,
    session_number INTEGER NOT NULL,
    bill_history TEXT,
    latest_completed_stage TEXT,
    current_stage TEXT,
    stage_date TEXT,
    division_number INTEGER,
    created_at TEXT NOT NULL,
    UNIQUE(number_code, parliament_number, session_number)
);

-- Versioned bill publication documents, discovered by incrementing probe
CREATE TABLE IF NOT EXISTS bill_versions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    bill_number TEXT NOT NULL,
    parliament_number INTEGER NOT NULL,
    session_number INTEGER NOT NULL,
    version_index INTEGER NOT NULL,
    document_type TEXT NOT NULL,
    title TEXT,
    short_title TEXT,
    sponsor TEXT,
    bill_ref_number TEXT,
    bill_history TEXT,
    introduction TEXT,
    body TEXT,
    division_number INTEGER,
    created_at TEXT NOT NULL,
    UNIQUE(bill_number, parliament_number, session_number)
);

-- Division votes for bills that received assent
CREATE TABLE IF NOT EXISTS bill_votes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    related_bill_number TEXT NOT NULL,
    parliament_number INTEGER NOT NULL,
    session_number INTEGER NOT NULL,
    vote_date TEXT NOT NULL,
    description TEXT,
    decision TEXT,
    total_yeas INTEGER,
    total_nays INTEGER,
    total_abstain INTEGER,
    division_number INTEGER,
    created_at TEXT NOT NULL,
    UNIQUE(related_bill_number, parliament_number, session_number, vote_date)
);

CREATE INDEX IF NOT EXISTS idx_bills_session ON bills(parliament_number, session_number);
CREATE INDEX IF NOT EXISTS idx_versions_bill ON bill_versions(bill_number, parliament_number, session_number);
CREATE INDEX IF NOT EXISTS idx_votes_bill ON bill_votes(related_bill_number, parliament_number, session_number);
"#;

/// Initializes the database schema
///
/// Safe to call on every startup; all statements are idempotent.
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

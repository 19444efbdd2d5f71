//! Entity records produced by the crawl
//!
//! All three record kinds are keyed by natural composite keys and are
//! append-only: on conflict the stored row wins and the new values are
//! silently dropped.

use std::fmt;

/// Natural key of a bill within one legislative sitting
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BillKey {
    /// Bill number code, e.g. "C-2" or "S-11"
    pub number_code: String,
    pub parliament: u32,
    pub session: u32,
}

impl BillKey {
    pub fn new(number_code: impl Into<String>, parliament: u32, session: u32) -> Self {
        Self {
            number_code: number_code.into(),
            parliament,
            session,
        }
    }
}

impl fmt::Display for BillKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}-{})",
            self.number_code, self.parliament, self.session
        )
    }
}

/// A bill discovered via the per-bill data document
#[derive(Debug, Clone)]
pub struct Bill {
    pub key: BillKey,
    /// Opaque history markup from the source document
    pub bill_history: Option<String>,
    pub latest_completed_stage: Option<String>,
    pub current_stage: Option<String>,
    pub stage_date: Option<String>,
    pub division_number: Option<i64>,
}

/// One published version of a bill's document, discovered by incrementing
/// probe of the version index
#[derive(Debug, Clone)]
pub struct BillVersion {
    pub key: BillKey,
    /// 1-based position in the version probe sequence
    pub version_index: u32,
    /// Document type category the version was found under
    pub document_type: String,
    pub title: Option<String>,
    pub short_title: Option<String>,
    pub sponsor: Option<String>,
    pub bill_ref_number: Option<String>,
    pub bill_history: Option<String>,
    pub introduction: Option<String>,
    pub body: Option<String>,
    pub division_number: Option<i64>,
}

/// A recorded division vote, present only for bills that received assent
#[derive(Debug, Clone)]
pub struct Vote {
    pub related_bill_number: String,
    pub parliament: u32,
    pub session: u32,
    pub vote_date: String,
    pub description: Option<String>,
    pub decision: Option<String>,
    pub total_yeas: Option<i64>,
    pub total_nays: Option<i64>,
    pub total_abstain: Option<i64>,
    pub division_number: Option<i64>,
}

/// Closed set of record kinds accepted by the persistence sink
///
/// Adding a new entity kind here forces every match site (in particular the
/// sink's dispatch) to be updated at compile time.
#[derive(Debug, Clone)]
pub enum Record {
    Bill(Bill),
    Version(BillVersion),
    Vote(Vote),
}

impl Record {
    /// Short label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Record::Bill(_) => "bill",
            Record::Version(_) => "bill_version",
            Record::Vote(_) => "vote",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bill_key_display() {
        let key = BillKey::new("C-2", 44, 1);
        assert_eq!(key.to_string(), "C-2 (44-1)");
    }

    #[test]
    fn test_record_kind_labels() {
        let bill = Bill {
            key: BillKey::new("C-2", 44, 1),
            bill_history: None,
            latest_completed_stage: None,
            current_stage: None,
            stage_date: None,
            division_number: None,
        };
        assert_eq!(Record::Bill(bill).kind(), "bill");
    }
}

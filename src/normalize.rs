//! Record normalizer: raw parsed fields to canonical entity records
//!
//! Coercion rules: numeric fields parse to integer or null (never an error),
//! the royal-assent flag is a case-sensitive comparison against the literal
//! `"true"` token, and absent input always maps to an absent output field.
//! Nothing here fabricates values.

use crate::model::{Bill, BillKey, BillVersion, Vote};
use crate::parse::{RawBillData, RawBillDocument};

/// Literal token signaling royal assent in the bill data document
const ASSENT_TOKEN: &str = "true";

/// Parses an optional string to an integer, yielding None for absent, blank,
/// or non-numeric input
pub fn int_or_null(value: Option<&str>) -> Option<i64> {
    value.and_then(|s| s.trim().parse::<i64>().ok())
}

/// Whether a parsed bill data document signals royal assent
pub fn received_royal_assent(data: &RawBillData) -> bool {
    data.fields.get("royal_assent") == Some(ASSENT_TOKEN)
}

/// Builds a Bill record from a parsed bill data document
pub fn bill_from_data(key: &BillKey, data: &RawBillData) -> Bill {
    Bill {
        key: key.clone(),
        bill_history: data.fields.get("bill_history").map(str::to_string),
        latest_completed_stage: data
            .fields
            .get("latest_completed_stage")
            .map(str::to_string),
        current_stage: data.fields.get("current_stage").map(str::to_string),
        stage_date: data.fields.get("stage_date").map(str::to_string),
        division_number: int_or_null(data.fields.get("division_number")),
    }
}

/// Builds a BillVersion record from a parsed publication document
pub fn version_from_document(
    key: &BillKey,
    document_type: &str,
    version_index: u32,
    doc: &RawBillDocument,
) -> BillVersion {
    BillVersion {
        key: key.clone(),
        version_index,
        document_type: document_type.to_string(),
        title: doc.fields.get("title").map(str::to_string),
        short_title: doc.fields.get("short_title").map(str::to_string),
        sponsor: doc.fields.get("sponsor").map(str::to_string),
        bill_ref_number: doc.fields.get("bill_ref_number").map(str::to_string),
        bill_history: doc.fields.get("bill_history").map(str::to_string),
        introduction: doc.fields.get("introduction").map(str::to_string),
        body: doc.fields.get("body").map(str::to_string),
        division_number: int_or_null(doc.fields.get("division_number")),
    }
}

/// Builds Vote records from a parsed bill data document
///
/// Returns an empty vector unless the document signals royal assent; vote
/// elements without a date cannot form a natural key and are skipped.
pub fn votes_from_data(key: &BillKey, data: &RawBillData) -> Vec<Vote> {
    if !received_royal_assent(data) {
        return Vec::new();
    }

    data.votes
        .iter()
        .filter_map(|raw| {
            let vote_date = raw.get("vote_date")?.to_string();
            Some(Vote {
                related_bill_number: key.number_code.clone(),
                parliament: key.parliament,
                session: key.session,
                vote_date,
                description: raw.get("description").map(str::to_string),
                decision: raw.get("decision").map(str::to_string),
                total_yeas: int_or_null(raw.get("total_yeas")),
                total_nays: int_or_null(raw.get("total_nays")),
                total_abstain: int_or_null(raw.get("total_abstain")),
                division_number: int_or_null(raw.get("division_number")),
            })
        })
        .collect()
}

//! Extraction schemas for each document kind
//!
//! Each schema names the fields a document kind can carry and the tag each
//! field is read from. A parse evaluates its schema once; a missing tag
//! simply yields no entry for that field, since upstream document shape
//! varies across decades of sessions.

use roxmltree::Node;
use std::collections::HashMap;

/// A text field read from the first matching descendant tag
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub tag: &'static str,
}

/// A sub-tree retained as opaque serialized markup rather than decomposed
#[derive(Debug, Clone, Copy)]
pub struct MarkupSpec {
    pub name: &'static str,
    pub tag: &'static str,
}

/// Fields extracted for one record, keyed by schema field name
#[derive(Debug, Clone, Default)]
pub struct RawFields {
    map: HashMap<&'static str, String>,
}

impl RawFields {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(String::as_str)
    }

    pub fn take(&mut self, name: &str) -> Option<String> {
        self.map.remove(name)
    }

    pub fn insert(&mut self, name: &'static str, value: impl Into<String>) {
        self.map.insert(name, value.into());
    }
}

/// Evaluates a schema against a scope node
///
/// Text fields come from the first descendant with the matching tag; blank
/// text counts as absent. Markup fields are sliced byte-for-byte from the
/// source document so the sub-tree round-trips without re-serialization.
pub fn extract_fields(
    scope: Node<'_, '_>,
    source: &str,
    fields: &[FieldSpec],
    markup: &[MarkupSpec],
) -> RawFields {
    let mut raw = RawFields::default();

    for spec in fields {
        let value = scope
            .descendants()
            .find(|n| n.has_tag_name(spec.tag))
            .and_then(|n| n.text())
            .map(str::trim)
            .filter(|s| !s.is_empty());
        if let Some(value) = value {
            raw.map.insert(spec.name, value.to_string());
        }
    }

    for spec in markup {
        if let Some(node) = scope.descendants().find(|n| n.has_tag_name(spec.tag)) {
            raw.map.insert(spec.name, source[node.range()].to_string());
        }
    }

    raw
}

// ===== Bills list =====

pub const BILLS_LIST_ROOT: &str = "Bills";
pub const BILL_ELEMENT: &str = "Bill";

pub const BILL_SUMMARY_FIELDS: &[FieldSpec] = &[FieldSpec {
    name: "number_code",
    tag: "NumberCode",
}];

// ===== Bill data =====

pub const BILL_DATA_ROOT: &str = "Bill";

pub const BILL_DATA_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "latest_completed_stage",
        tag: "LatestCompletedBillStageName",
    },
    FieldSpec {
        name: "stage_date",
        tag: "LatestCompletedBillStageDateTime",
    },
    FieldSpec {
        name: "current_stage",
        tag: "CurrentStageName",
    },
    FieldSpec {
        name: "division_number",
        tag: "DivisionNumber",
    },
    FieldSpec {
        name: "royal_assent",
        tag: "ReceivedRoyalAssent",
    },
];

pub const BILL_DATA_MARKUP: &[MarkupSpec] = &[MarkupSpec {
    name: "bill_history",
    tag: "BillHistory",
}];

pub const VOTE_ELEMENT: &str = "Vote";

pub const VOTE_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "description",
        tag: "Description",
    },
    FieldSpec {
        name: "decision",
        tag: "Decision",
    },
    FieldSpec {
        name: "total_yeas",
        tag: "TotalYeas",
    },
    FieldSpec {
        name: "total_nays",
        tag: "TotalNays",
    },
    FieldSpec {
        name: "total_abstain",
        tag: "TotalAbstain",
    },
    FieldSpec {
        name: "division_number",
        tag: "DivisionNumber",
    },
    FieldSpec {
        name: "vote_date",
        tag: "VoteDate",
    },
];

// ===== Bill document (versioned publication) =====

pub const BILL_DOCUMENT_ROOT: &str = "Bill";
pub const IDENTIFICATION_ELEMENT: &str = "Identification";

pub const BILL_DOCUMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "title",
        tag: "LongTitle",
    },
    FieldSpec {
        name: "short_title",
        tag: "ShortTitle",
    },
    FieldSpec {
        name: "sponsor",
        tag: "BillSponsor",
    },
    FieldSpec {
        name: "bill_ref_number",
        tag: "BillRefNumber",
    },
    FieldSpec {
        name: "division_number",
        tag: "DivisionNumber",
    },
];

pub const BILL_DOCUMENT_MARKUP: &[MarkupSpec] = &[
    MarkupSpec {
        name: "bill_history",
        tag: "BillHistory",
    },
    MarkupSpec {
        name: "introduction",
        tag: "Introduction",
    },
    MarkupSpec {
        name: "body",
        tag: "Body",
    },
];

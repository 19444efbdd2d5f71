//! Document parser for the upstream XML payloads
//!
//! Pure, no I/O. Each document kind is parsed against an explicit schema
//! (see [`schema`]); missing fields yield absent values rather than errors.
//! History, introduction, and body sub-trees are retained as opaque markup
//! since downstream consumers treat them as display blobs.

pub mod schema;

use roxmltree::Document;
use schema::{extract_fields, RawFields};
use thiserror::Error;

/// Errors raised when a payload violates parser expectations
///
/// These only occur for responses the classifier called Success, so they
/// indicate a data-shape anomaly rather than an expected end-of-data.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Unexpected root element <{found}>, expected <{expected}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },
}

/// One bill entry from a per-session bills list
#[derive(Debug, Clone)]
pub struct RawBillSummary {
    /// Bill number code, absent when the entry is missing its NumberCode
    pub number_code: Option<String>,
}

/// Parsed per-bill data document
#[derive(Debug, Clone)]
pub struct RawBillData {
    pub fields: RawFields,
    /// Embedded vote elements; meaningful only when royal assent is signaled
    pub votes: Vec<RawFields>,
}

/// Parsed versioned bill publication document
#[derive(Debug, Clone)]
pub struct RawBillDocument {
    pub fields: RawFields,
}

fn check_root<'a>(
    doc: &'a Document<'a>,
    expected: &'static str,
) -> Result<roxmltree::Node<'a, 'a>, ParseError> {
    let root = doc.root_element();
    if !root.has_tag_name(expected) {
        return Err(ParseError::UnexpectedRoot {
            expected,
            found: root.tag_name().name().to_string(),
        });
    }
    Ok(root)
}

/// Parses a per-session bills list into bill summaries
///
/// An empty list is a valid document with zero entries, not an error.
pub fn parse_bills_list(body: &str) -> Result<Vec<RawBillSummary>, ParseError> {
    let doc = Document::parse(body)?;
    let root = check_root(&doc, schema::BILLS_LIST_ROOT)?;

    let bills = root
        .descendants()
        .filter(|n| n.has_tag_name(schema::BILL_ELEMENT))
        .map(|bill| {
            let mut fields = extract_fields(bill, body, schema::BILL_SUMMARY_FIELDS, &[]);
            RawBillSummary {
                number_code: fields.take("number_code"),
            }
        })
        .collect();

    Ok(bills)
}

/// Parses a per-bill data document, including any embedded vote elements
pub fn parse_bill_data(body: &str) -> Result<RawBillData, ParseError> {
    let doc = Document::parse(body)?;
    let root = check_root(&doc, schema::BILL_DATA_ROOT)?;

    let fields = extract_fields(
        root,
        body,
        schema::BILL_DATA_FIELDS,
        schema::BILL_DATA_MARKUP,
    );

    let votes = root
        .descendants()
        .filter(|n| n.has_tag_name(schema::VOTE_ELEMENT))
        .map(|vote| extract_fields(vote, body, schema::VOTE_FIELDS, &[]))
        .collect();

    Ok(RawBillData { fields, votes })
}

/// Parses a versioned bill publication document
///
/// Returns `Ok(None)` when the document parses but carries no Identification
/// section; the caller tolerates that version and keeps probing.
pub fn parse_bill_document(body: &str) -> Result<Option<RawBillDocument>, ParseError> {
    let doc = Document::parse(body)?;
    let root = check_root(&doc, schema::BILL_DOCUMENT_ROOT)?;

    let identification = match root
        .descendants()
        .find(|n| n.has_tag_name(schema::IDENTIFICATION_ELEMENT))
    {
        Some(node) => node,
        None => return Ok(None),
    };

    let mut fields = extract_fields(identification, body, schema::BILL_DOCUMENT_FIELDS, &[]);

    // History, introduction, and body live outside the Identification section
    let markup = extract_fields(root, body, &[], schema::BILL_DOCUMENT_MARKUP);
    for name in ["bill_history", "introduction", "body"] {
        if let Some(value) = markup.get(name) {
            fields.insert(name, value.to_string());
        }
    }

    Ok(Some(RawBillDocument { fields }))
}

//! Metadata table parser.
//!
//! Cable pages carry a fixed tabular region with five fields in order:
//! reference id, creation date, release date, classification, origin. The
//! region sits outside the normalized body text, so this parser works on
//! the raw page. It is the only component that can reject a document:
//! everything downstream depends on a correctly identified document for
//! exception-table lookups.

use crate::error::{Error, Result};
use crate::exceptions;
use crate::model::MetadataRecord;
use regex::Regex;
use std::sync::LazyLock;

const TABLE_OPEN: &str = "<table class='cable'>";
const TABLE_CLOSE: &str = "</table>";
const MEDIA_ANCHOR: &str = "Appears in these";
const EXPECTED_FIELDS: usize = 5;

static RE_CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<td>\s*<a[^>]*>(.+?)</a>").unwrap());

static RE_MEDIA_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<a href=["']([^"']+)"#).unwrap());

/// Extracts the metadata record from the raw cable page.
///
/// Fails with [`Error::TableNotFound`] when no bounded table region
/// exists, [`Error::MalformedTable`] when the region holds a field count
/// other than five, and [`Error::IdentifierMismatch`] when the parsed
/// identifier differs from `reference_id` after canonical remapping.
pub fn parse_meta(page: &str, reference_id: &str) -> Result<MetadataRecord> {
    let end_idx = page.rfind(TABLE_CLOSE).ok_or(Error::TableNotFound)?;
    let start_idx = page[..end_idx]
        .rfind(TABLE_OPEN)
        .ok_or(Error::TableNotFound)?;
    let region = &page[start_idx..end_idx];

    let cells: Vec<&str> = RE_CELL
        .captures_iter(region)
        .map(|caps| caps.get(1).map_or("", |m| m.as_str()).trim())
        .collect();
    if cells.len() != EXPECTED_FIELDS {
        return Err(Error::MalformedTable {
            expected: EXPECTED_FIELDS,
            found: cells.len(),
        });
    }
    let (parsed_id, created, released, classification, origin) =
        (cells[0], cells[1], cells[2], cells[3], cells[4]);

    if parsed_id != reference_id
        && exceptions::tables().canonical_id(parsed_id) != reference_id
    {
        return Err(Error::IdentifierMismatch {
            expected: reference_id.to_string(),
            found: parsed_id.to_string(),
        });
    }

    // Media links follow an "Appears in these ..." anchor inside the
    // region; no anchor means no media, not an error.
    let media_uris = match region.rfind(MEDIA_ANCHOR) {
        Some(media_idx) => RE_MEDIA_URL
            .captures_iter(&region[media_idx..])
            .map(|caps| caps[1].to_string())
            .collect(),
        None => Vec::new(),
    };

    Ok(MetadataRecord {
        reference_id: reference_id.to_string(),
        created: created.to_string(),
        released: released.to_string(),
        // Classifications are usually upper case already, but you never know.
        classification: classification.to_uppercase(),
        origin: origin.to_string(),
        media_uris,
    })
}

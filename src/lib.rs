//! Field extraction for released diplomatic cables.
//!
//! Cables arrive as two pieces of flat text, a transmission header and
//! the cable content, plus an HTML carrier page with a small metadata
//! table. This crate turns those into structured records: subject,
//! tags, references to other cables, recipients, summary, and envelope
//! fields. The texts are damaged in recurring ways, so extraction
//! combines tolerant pattern matching with curated per-document
//! corrections (see [`exceptions`]).
//!
//! # Quick start
//!
//! ```
//! use uncable::{parse_subject, SubjectOptions};
//!
//! let content = "SUBJECT: TEST CABLE ALPHA\nREF: NONE\n";
//! let subject = parse_subject(content, "09TEST1", SubjectOptions::default());
//! assert_eq!(subject, "TEST CABLE ALPHA");
//! ```
//!
//! [`extract_record`] runs the whole pipeline, including the content
//! fixups, over one cable.

pub mod anchor;
pub mod error;
pub mod exceptions;
pub mod extract;
pub mod fixup;
pub mod meta;
pub mod model;
pub mod routes;
pub mod segment;

pub use error::{Error, Result};
pub use extract::{
    parse_info_recipients, parse_nondisclosure_deadline, parse_recipients, parse_references,
    parse_subject, parse_summary, parse_tags, parse_transmission_id, SubjectOptions,
};
pub use fixup::fix_content;
pub use meta::parse_meta;
pub use model::{CableRecord, MetadataRecord, Recipient, Reference, ReferenceKind};
pub use routes::RouteTable;
pub use segment::header_body;

/// Notice inserted by the publisher when only part of a cable was
/// released.
const PARTIAL_MARKER: &str = "This record is a partial extract of the original cable";

/// Whether the text carries the partial-release notice. Partial cables
/// have no trustworthy transmission header.
pub fn is_partial(text: &str) -> bool {
    text.contains(PARTIAL_MARKER)
}

/// Runs the full extraction pipeline over one cable.
///
/// `header` is the transmission header, `content` the cable text, and
/// `year` the cable's creation year for references that omit their own.
/// Content fixups are applied to both texts first. For partial releases
/// the header-derived fields (transmission identifier, addressees) are
/// left empty; the onlooker list is kept because publishers preserve it
/// even in partial releases.
pub fn extract_record(
    content: &str,
    header: &str,
    reference_id: &str,
    year: u16,
    routes: &RouteTable,
) -> CableRecord {
    let content = fix_content(content, reference_id);
    let header = fix_content(header, reference_id);
    let partial = is_partial(&content) || is_partial(&header);

    let (transmission_id, recipients) = if partial {
        (None, Vec::new())
    } else {
        (
            parse_transmission_id(&header),
            parse_recipients(&header, reference_id, routes),
        )
    };

    CableRecord {
        reference_id: exceptions::tables().canonical_id(reference_id).to_string(),
        transmission_id,
        recipients,
        info_recipients: parse_info_recipients(&header, reference_id, routes),
        subject: parse_subject(&content, reference_id, SubjectOptions::default()),
        tags: parse_tags(&content, reference_id),
        references: parse_references(&content, year, reference_id),
        summary: parse_summary(&content, reference_id),
        nondisclosure_deadline: parse_nondisclosure_deadline(&content),
        partial,
    }
}

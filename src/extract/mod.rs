//! Field extractors for cable content.
//!
//! Each submodule pulls one logical field out of raw cable text: the
//! subject line, reference bullets, recipient blocks, subject tags, the
//! summary section, and envelope fields (transmission identifier and
//! nondisclosure deadline). Extractors take the full content or the
//! header slice produced by [`crate::segment::header_body`], never both.
//!
//! Absent fields are ordinary values (`None`, empty collections), not
//! errors; structural anomalies are reported through `tracing` and the
//! extractor degrades to the absent value.

mod envelope;
mod recipients;
mod references;
mod subject;
mod summary;
mod tags;

pub use envelope::{parse_nondisclosure_deadline, parse_transmission_id};
pub use recipients::{parse_info_recipients, parse_recipients};
pub use references::parse_references;
pub use subject::{parse_subject, SubjectOptions};
pub use summary::parse_summary;
pub use tags::parse_tags;

/// Upper bound on how far into the content header-resident fields are
/// searched when no closer boundary can be established.
pub(crate) const MAX_HEADER_IDX: usize = 1200;

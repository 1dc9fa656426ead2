//! Data model for extracted cable records.

use serde::Serialize;

/// Kind of an item a reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReferenceKind {
    /// Another cable, named by its canonical identifier.
    Cable,
    /// Anything else (e-mail, report, meeting, ...).
    Other,
}

/// A reference to another cable or any other referencable item.
///
/// Identity is by value: two references to the same target are equal even
/// if one carries a bullet label and the other does not.
#[derive(Debug, Clone, Serialize)]
pub struct Reference {
    /// Target identifier (canonical cable id for `ReferenceKind::Cable`).
    pub value: String,
    pub kind: ReferenceKind,
    /// Bullet label from the reference block ("A", "B", ...), uppercased.
    pub bullet: Option<String>,
    /// Title of the referenced item, without surrounding quotes.
    pub title: Option<String>,
}

impl Reference {
    pub fn new(
        value: impl Into<String>,
        kind: ReferenceKind,
        bullet: Option<&str>,
        title: Option<&str>,
    ) -> Self {
        Self {
            value: value.into(),
            kind,
            bullet: bullet.map(|b| b.to_uppercase()),
            title: title.map(|t| t.trim_matches('"').to_string()),
        }
    }

    /// A plain cable reference with no bullet or title.
    pub fn cable(value: impl Into<String>) -> Self {
        Self::new(value, ReferenceKind::Cable, None, None)
    }

    pub fn is_cable(&self) -> bool {
        self.kind == ReferenceKind::Cable
    }
}

impl PartialEq for Reference {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.kind == other.kind
    }
}

impl Eq for Reference {}

/// A recipient drawn from a cable's routing header.
///
/// The order of recipients within a document is significant (it reflects
/// the header order) and is preserved by the extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Recipient {
    /// Routing code, resolved from the header or from the route table.
    pub route: Option<String>,
    /// Organizational name ("AMEMBASSY OSLO", "SECSTATE WASHDC", ...).
    pub name: String,
    /// Precedence marker stripped from the name (PRIORITY, IMMEDIATE, NIACT).
    pub precedence: Option<String>,
    /// Message continuity number, when the source carries one.
    pub mcn: Option<String>,
    /// Post names excluded from a collective address.
    pub excluded: Vec<String>,
}

impl Recipient {
    pub fn new(route: Option<String>, name: impl Into<String>) -> Self {
        Self {
            route,
            name: name.into(),
            ..Self::default()
        }
    }
}

/// The structured metadata block of a cable page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetadataRecord {
    /// Canonical document identifier, as supplied by the caller.
    pub reference_id: String,
    /// Creation timestamp, free text as found in the table.
    pub created: String,
    /// Release timestamp, free text as found in the table.
    pub released: String,
    /// Classification level, uppercased.
    pub classification: String,
    /// Issuing post.
    pub origin: String,
    /// Media URIs covering this cable, in table order.
    pub media_uris: Vec<String>,
}

/// All field-extractor outputs for one document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CableRecord {
    pub reference_id: String,
    pub transmission_id: Option<String>,
    pub recipients: Vec<Recipient>,
    pub info_recipients: Vec<Recipient>,
    /// Empty string when the document carries no recoverable subject.
    pub subject: String,
    /// Normalized uppercase tags, deduplicated, first-seen order.
    pub tags: Vec<String>,
    /// References to other cables, appearance order, no duplicates, no
    /// self-references.
    pub references: Vec<Reference>,
    pub summary: Option<String>,
    /// Declassification date in canonical `YYYY-MM-DD` form.
    pub nondisclosure_deadline: Option<String>,
    /// True when the source is a partial extract of the original cable.
    pub partial: bool,
}

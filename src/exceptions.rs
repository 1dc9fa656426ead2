//! Identifier-keyed exception tables.
//!
//! Some source documents are malformed in ways no general heuristic can
//! absorb: corrupted header text, a missing SUBJECT line that is known from
//! third-party releases, mangled identifiers, mis-tokenized tags. The
//! curated correction data for those documents lives here, keyed by
//! document identifier. The larger tables are external data files under
//! `data/`, embedded at compile time and parsed once; the extractors treat
//! all of it as opaque data, so adding a correction never touches
//! extraction logic.
//!
//! The tables are read-only after construction and safe to share across
//! threads.

use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Documents known to carry no TAGS line.
const IDS_WITHOUT_TAGS: &[&str] = &[
    "06KABUL3934",
    "08BEIJING3662",
    "09ROME878",
    "09ROME1048",
    "08ROME451",
    "08ROME525",
    "04QUITO2502",
    "04QUITO2879",
    "05PANAMA1589",
    "06KABUL5653",
    "07PANAMA400",
    "07PANAMA946",
    "01CAIRO5770",
];

/// Documents known to carry no TO header.
const IDS_WITHOUT_TO: &[&str] = &[
    "08MONTERREY468",
    "09TIJUANA1116",
    "08STATE125686",
    "06WELLINGTON633",
    "06WELLINGTON652",
    "08STATE34306",
];

/// Documents whose summary block is known to be malformed.
const IDS_WITH_MALFORMED_SUMMARY: &[&str] = &[
    "09CAIRO2133",
    "06BUENOSAIRES2711",
    "08BUENOSAIRES1305",
    "07ATHENS2386",
    "09SOFIA716",
];

/// Malformed identifier -> canonical identifier.
///
/// The malformed forms come from releases where part of a "SECTION nn OF
/// nn" marker was fused into the identifier.
const CANONICAL_IDS: &[(&str, &str)] = &[
    ("08ECTION01OF02MANAMA492", "08MANAMA492"),
    ("08SECTION01OF02TRIPOLI227", "08TRIPOLI227"),
    ("09SECTION02OF03SANJOSE525", "09SANJOSE525"),
];

/// Identifier-scoped recipient-token replacements, applied to the raw
/// recipient name before trimming.
const RECIPIENT_TOKEN_FIXES: &[(&str, &str, &str)] = &[
    // Typo for PRIORITY in the source header.
    ("09BAKU179", "PIORITY", ""),
];

/// Tag tokens that are really several tags fused together, regardless of
/// the document they appear in.
const TAG_SPLITS: &[(&str, &[&str])] = &[
    // 07BAKU855
    ("PTER MARR", &["PTER", "MARR"]),
];

/// Identifier-scoped tag splits.
const TAG_SPLITS_BY_ID: &[(&str, &str, &[&str])] = &[
    ("08MANAMA492", "PHUMBA", &["PHUM", "BA"]),
    ("08ECTION01OF02MANAMA492", "PHUMBA", &["PHUM", "BA"]),
];

/// Token-level tag canonicalization (typo correction, alias folding).
const TAG_FIXES: &[(&str, &str)] = &[
    ("CLINTON HILLARY", "CLINTON, HILLARY"),
    ("STEINBERG JAMES", "STEINBERG, JAMES B."),
    ("BIDEN JOSEPH", "BIDEN, JOSEPH"),
    ("ZOELLICK ROBERT", "ZOELLICK, ROBERT"),
    ("RICE CONDOLEEZZA", "RICE, CONDOLEEZZA"),
    ("COUNTER TERRORISM", "COUNTERTERRORISM"),
    // 09BEIRUT818
    ("MOPPS", "MOPS"),
    // 09LONDON2222
    ("POGOV", "PGOV"),
    // 09BERLIN1433, 09RIYADH181 etc.
    ("RU", "RS"),
    ("SYR", "SY"),
];

/// Raw shape of one entry in `data/content_fixes.json`.
#[derive(Debug, Deserialize)]
struct RawContentFix {
    pattern: String,
    replacement: String,
}

/// A compiled content substitution rule.
#[derive(Debug)]
pub struct ContentFix {
    /// Pattern matching the corrupted text. Authored so it no longer
    /// matches after its own substitution, which keeps the fixup
    /// idempotent.
    pub pattern: Regex,
    /// Literal replacement text.
    pub replacement: String,
}

static TABLES: LazyLock<ExceptionTables> = LazyLock::new(ExceptionTables::load);

/// The process-wide exception tables, built on first use.
pub fn tables() -> &'static ExceptionTables {
    &TABLES
}

/// All identifier-keyed correction data, read-only after construction.
#[derive(Debug)]
pub struct ExceptionTables {
    content_fixes: HashMap<String, ContentFix>,
    subject_overrides: HashMap<String, String>,
    canonical_ids: HashMap<&'static str, &'static str>,
    tag_fixes: HashMap<&'static str, &'static str>,
}

impl ExceptionTables {
    fn load() -> Self {
        let raw: HashMap<String, RawContentFix> =
            serde_json::from_str(include_str!("../data/content_fixes.json"))
                .expect("data/content_fixes.json is well-formed");
        let content_fixes = raw
            .into_iter()
            .map(|(id, fix)| {
                let pattern = Regex::new(&fix.pattern)
                    .expect("content fix patterns are valid regexes");
                (
                    id,
                    ContentFix {
                        pattern,
                        replacement: fix.replacement,
                    },
                )
            })
            .collect();

        // subjects.txt: "<identifier>: <subject>" per line, '#' comments.
        let mut subject_overrides = HashMap::new();
        for line in include_str!("../data/subjects.txt").lines() {
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((id, subject)) = line.split_once(": ") {
                subject_overrides.insert(id.to_string(), subject.to_string());
            }
        }

        Self {
            content_fixes,
            subject_overrides,
            canonical_ids: CANONICAL_IDS.iter().copied().collect(),
            tag_fixes: TAG_FIXES.iter().copied().collect(),
        }
    }

    /// The content substitution rule for `reference_id`, if one exists.
    pub fn content_fix(&self, reference_id: &str) -> Option<&ContentFix> {
        self.content_fixes.get(reference_id)
    }

    /// Iterates over every content substitution rule.
    pub fn content_fixes(&self) -> impl Iterator<Item = (&str, &ContentFix)> {
        self.content_fixes.iter().map(|(id, fix)| (id.as_str(), fix))
    }

    /// A curated subject for a document whose source text has none.
    pub fn subject_override(&self, reference_id: &str) -> Option<&str> {
        self.subject_overrides.get(reference_id).map(String::as_str)
    }

    /// Remaps a known-malformed identifier to its canonical form; other
    /// identifiers pass through unchanged.
    pub fn canonical_id<'a>(&'a self, reference_id: &'a str) -> &'a str {
        self.canonical_ids
            .get(reference_id)
            .copied()
            .unwrap_or(reference_id)
    }

    /// True when a missing TAGS line is expected for this document.
    pub fn allows_missing_tags(&self, reference_id: &str) -> bool {
        IDS_WITHOUT_TAGS.contains(&reference_id)
    }

    /// True when a missing TO header is expected for this document.
    pub fn allows_missing_to(&self, reference_id: &str) -> bool {
        IDS_WITHOUT_TO.contains(&reference_id)
    }

    /// True when a summary end-anchor without a start is expected.
    pub fn allows_malformed_summary(&self, reference_id: &str) -> bool {
        IDS_WITH_MALFORMED_SUMMARY.contains(&reference_id)
    }

    /// Applies the identifier-scoped replacements for mangled recipient
    /// tokens.
    pub fn apply_recipient_fixes(&self, reference_id: &str, name: &str) -> String {
        let mut name = name.to_string();
        for (id, from, to) in RECIPIENT_TOKEN_FIXES {
            if *id == reference_id {
                name = name.replace(from, to);
            }
        }
        name
    }

    /// The tags a fused tag token splits into, if it is a known fusion.
    pub fn tag_split(&self, reference_id: &str, token: &str) -> Option<&'static [&'static str]> {
        for (fused, parts) in TAG_SPLITS {
            if *fused == token {
                return Some(parts);
            }
        }
        for (id, fused, parts) in TAG_SPLITS_BY_ID {
            if *id == reference_id && *fused == token {
                return Some(parts);
            }
        }
        None
    }

    /// Canonical form of a tag token (typos corrected, aliases folded).
    pub fn canonical_tag<'a>(&'a self, tag: &'a str) -> &'a str {
        self.tag_fixes.get(tag).copied().unwrap_or(tag)
    }
}

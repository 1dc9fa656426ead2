//! Subject-line extraction.
//!
//! The subject label is frequently truncated or mistyped ("UBJECT:",
//! "SUBJ"), the line may wrap across several physical lines, and the
//! terminator varies from cable to cable, so the capture is bounded by a
//! large alternation of known follow-on markers rather than a single
//! end-of-line. A handful of cables have no recoverable subject at all
//! and fall back to a curated override table keyed by reference
//! identifier.

use crate::anchor;
use crate::exceptions;
use crate::extract::MAX_HEADER_IDX;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static RE_SUBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)S?UBJ(?:ECT)?(?:(?::\s*)|(?::?\s+))(.+?)(?:\z|(C O N)|(SENSI?TIVE BUT)|([ ]+REFS?:[ ]+)|(\n[ ]*\n|[\s]*[\n][\s]*[\s]*REFS?:?\s)|(REF:\s)|(REF\(S\):?)|(\s*Classified\s)|([1-9]\.?[ ]+Classified By)|([1-9]\.?[ ]*\([^\)]+\))|(1\.?[ ]Summary)|([A-Z]+\s+[0-9]+\s+[0-9]+\.?[0-9]*\s+OF)|(\-\-\-\-\-*\s+)|(Friday)|(PAGE [0-9]+)|(This is a?n Action Req))",
    )
    .unwrap()
});

// First numbered classification paragraph; the subject never starts
// after it.
static RE_SUBJECT_MAX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"1\.?[ ]*\([^\)]+\)").unwrap());

static RE_NL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\r\n]+").unwrap());
static RE_WS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ ]{2,}").unwrap());
static RE_BRACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\([^\)]+\)[ ]+| \([A-Z]+\)$").unwrap());
static RE_NCR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&#([0-9]+);").unwrap());

/// Knobs for [`parse_subject`].
#[derive(Debug, Clone, Copy)]
pub struct SubjectOptions {
    /// Strip leading classification prefixes like `(C) ` and trailing
    /// caveats like ` (NOFORN)` from the result.
    pub clean: bool,
    /// Consult the curated subject table when no subject line is found.
    pub use_fallback: bool,
}

impl Default for SubjectOptions {
    fn default() -> Self {
        Self {
            clean: true,
            use_fallback: true,
        }
    }
}

/// Extracts the subject of a cable, or an empty string when the cable
/// carries none.
pub fn parse_subject(content: &str, reference_id: &str, options: SubjectOptions) -> String {
    let max_idx = RE_SUBJECT_MAX
        .find(content)
        .map(|m| m.start())
        .unwrap_or(MAX_HEADER_IDX);
    let (head, _) = anchor::window(content, 0..max_idx);
    let raw = match find_subject(head) {
        Some(raw) => raw,
        None => {
            if !options.use_fallback {
                return String::new();
            }
            return match exceptions::tables().subject_override(reference_id) {
                Some(subject) if options.clean => clean_subject(subject).into_owned(),
                Some(subject) => subject.to_string(),
                None => String::new(),
            };
        }
    };
    let subject = RE_NL.replace_all(raw.trim(), " ");
    let subject = RE_WS.replace_all(&subject, " ");
    let subject = RE_NCR.replace_all(&subject, |caps: &regex::Captures<'_>| {
        caps[1]
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });
    if options.clean {
        clean_subject(&subject).into_owned()
    } else {
        subject.into_owned()
    }
}

// Scans for a subject label, rejecting candidates that are part of a
// parenthesized phrase or that introduce a "SUBJECT LINE" style note
// rather than the subject itself.
fn find_subject(head: &str) -> Option<&str> {
    let mut at = 0;
    while let Some(caps) = RE_SUBJECT.captures_at(head, at) {
        let whole = caps.get(0).unwrap();
        let body = caps.get(1).unwrap();
        let preceded_by_paren = head[..whole.start()].ends_with('(');
        let looks_like_note = body
            .as_str()
            .get(..4)
            .is_some_and(|p| p.eq_ignore_ascii_case("LINE"));
        if preceded_by_paren || looks_like_note {
            // Resume past the label so its truncated forms ("UBJECT")
            // are not re-matched at the same spot.
            at = body.start();
            continue;
        }
        return Some(body.as_str());
    }
    None
}

fn clean_subject(subject: &str) -> Cow<'_, str> {
    RE_BRACES.replace_all(subject, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> String {
        parse_subject(content, "09TEST1", SubjectOptions::default())
    }

    #[test]
    fn test_plain_subject() {
        let content = "HEADER\nSUBJECT: TEST CABLE ALPHA\nREF: NONE\n";
        assert_eq!(parse(content), "TEST CABLE ALPHA");
    }

    #[test]
    fn test_truncated_label_and_wrapping() {
        let content = "UBJECT: LONG SUBJECT THAT\nWRAPS  ONTO A SECOND LINE\n\nbody";
        assert_eq!(parse(content), "LONG SUBJECT THAT WRAPS ONTO A SECOND LINE");
    }

    #[test]
    fn test_subject_line_note_rejected() {
        // "SUBJECT LINE" introduces commentary about the subject, not the
        // subject itself; the real label further down wins.
        let content = "NOTE ON SUBJECT LINE HANDLING\nSUBJECT: REAL TOPIC\nREF: A\n";
        assert_eq!(parse(content), "REAL TOPIC");
    }

    #[test]
    fn test_parenthesized_mention_rejected() {
        let content = "SEE (SUBJECT: NOT THIS ONE) NOTE\nSUBJECT: ACTUAL TOPIC\n\n";
        assert_eq!(parse(content), "ACTUAL TOPIC");
    }

    #[test]
    fn test_classification_prefix_stripped() {
        let content = "SUBJECT: (C) SENSITIVE TOPIC\nREF: B\n";
        assert_eq!(parse(content), "SENSITIVE TOPIC");
        let keep = parse_subject(
            content,
            "09TEST1",
            SubjectOptions {
                clean: false,
                use_fallback: true,
            },
        );
        assert_eq!(keep, "(C) SENSITIVE TOPIC");
    }

    #[test]
    fn test_trailing_caveat_stripped() {
        let content = "SUBJECT: BORDER TALKS (NOFORN)\nREF: C\n";
        assert_eq!(parse(content), "BORDER TALKS");
    }

    #[test]
    fn test_numeric_character_reference_decoded() {
        let content = "SUBJECT: PEACE &#8211; AND QUIET\nREF: D\n";
        assert_eq!(parse(content), "PEACE \u{2013} AND QUIET");
    }

    #[test]
    fn test_fallback_from_override_table() {
        let subject = parse_subject("nothing recoverable", "07OSLO818", SubjectOptions::default());
        assert_eq!(subject, "NORWAY TAKES THE LEAD ON CLUSTER MUNITIONS BAN");
        let none = parse_subject(
            "nothing recoverable",
            "07OSLO818",
            SubjectOptions {
                clean: true,
                use_fallback: false,
            },
        );
        assert_eq!(none, "");
    }

    #[test]
    fn test_fallback_cleaned() {
        // Override entry carries a "(C) " prefix which cleaning removes.
        let subject = parse_subject("nothing", "08OSLO585", SubjectOptions::default());
        assert!(!subject.starts_with("(C)"), "subject: {subject}");
    }

    #[test]
    fn test_missing_subject_is_empty() {
        assert_eq!(parse("just body text, no labels"), "");
    }
}

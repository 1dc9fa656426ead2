//! Header/body segmentation.
//!
//! The header is the routing/classification preamble
//!
//! ```text
//! UNCLASSIFIED ...
//! SUBJECT ...
//! REF ...
//! ```
//!
//! while the message body usually opens with a summary or the first
//! numbered paragraph. Three competing anchors locate the cut point; the
//! cut only ever moves forward as anchors are considered, never backward.

use crate::anchor;
use regex::Regex;
use std::sync::LazyLock;

static RE_CLASSIFIED_BY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Classified[ ]+by[^\n]+").unwrap());

static RE_FIRST_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n1. ").unwrap());

static RE_SUMMARY_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(BEGIN SUMMARY[ ])|(SUMMARY: )").unwrap());

/// Splits content into (header, body).
///
/// The cut index starts at the end of a "Classified by" line when one
/// exists. A begin-summary anchor and a first-numbered-paragraph anchor
/// are searched independently; when both exist the smaller offset wins,
/// but the cut never moves before an already-established index. Returns
/// `None` when no anchor is found at all.
pub fn header_body(content: &str) -> Option<(&str, &str)> {
    let mut idx = RE_CLASSIFIED_BY
        .find(content)
        .map(|m| m.end())
        .unwrap_or(0);
    let body_anchor = anchor::earliest(
        &[&RE_SUMMARY_ANCHOR, &RE_FIRST_PARAGRAPH],
        content,
        0..content.len(),
    );
    if let Some(span) = body_anchor {
        idx = idx.max(span.start);
    }
    if idx > 0 {
        Some((&content[..idx], &content[idx..]))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_at_first_paragraph() {
        let content = "CONFIDENTIAL OSLO 000123\nSUBJECT: TEST\nREF: NONE\n1. This is the body.";
        let (header, body) = header_body(content).unwrap();
        assert!(header.ends_with("REF: NONE"));
        assert!(body.starts_with("\n1. This is the body."));
    }

    #[test]
    fn test_classified_by_pushes_cut_forward() {
        let content = "HEADER\n1. (C) Classified by Ambassador Smith for reasons 1.4\nBody text";
        let (header, _body) = header_body(content).unwrap();
        // The paragraph anchor sits before the classified-by line, but the
        // cut never moves before the classified-by end.
        assert!(header.contains("Classified by Ambassador Smith"));
    }

    #[test]
    fn test_summary_anchor_wins_when_earlier_than_paragraph() {
        let content = "HEADER\nBEGIN SUMMARY of events\n1. First point";
        let (header, body) = header_body(content).unwrap();
        assert_eq!(header, "HEADER\n");
        assert!(body.starts_with("BEGIN SUMMARY"));
    }

    #[test]
    fn test_no_anchor_yields_none() {
        assert!(header_body("just some text without any anchors").is_none());
    }

    #[test]
    fn test_cut_index_is_monotone_in_classified_by_position() {
        // Moving the classified-by line later never decreases the cut.
        let early = "A Classified by X\nfiller filler\n1. Body starts here";
        let late = "A filler filler\n1. Body Classified by X starts here";
        let cut = |content: &str| {
            let (header, _) = header_body(content).unwrap();
            header.len()
        };
        assert!(cut(late) >= cut(early));
    }
}

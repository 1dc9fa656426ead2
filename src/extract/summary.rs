//! Summary extraction.
//!
//! Most cables delimit their summary with SUMMARY / END SUMMARY
//! markers, in many spellings. When an end marker exists the summary is
//! everything between the nearest preceding start marker and it; when
//! only an inline `Summary:` label exists the summary runs to the next
//! blank line. Classification prefixes, paragraph numbering and divider
//! lines are scrubbed from the result.

use crate::anchor;
use crate::exceptions;
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

static RE_END_SUMMARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)END\s+SUMMARY").unwrap());
// The hyphen class includes U+2010, which some releases use.
static RE_START_SUMMARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)SUMMAR?Y( AND COMMENT)?( AND ACTION REQUEST)?( AND INTRODUCTION)?[ \u{2010}\-\n:\.]*",
    )
    .unwrap()
});
// Fallback start: the first numbered paragraph.
static RE_ALT_START_SUMMARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n1\.[ ]*(\([^\)]+\))? ").unwrap());
static RE_INLINE_SUMMARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)SUMMARY[ \-\n]*(?::|\.|\s)(.+?)(?:\n[ ]*\n|END[ ]+SUMMARY|----+)").unwrap()
});
static RE_CLEAN_CLS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ ]*\([SBU/NTSC]+\)[ ]*").unwrap());
static RE_CLEAN_NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(---+)|(((^[1-9])|(\n[1-9]))\.[ ]+\([^\)]+\)[ ]+)|(^[1-2]\. Summary:)|(^[1-2]\.[ ]+)|(^and action request\. )|(^and comment\. )|(2\. \(C\) Summary, continued:)",
    )
    .unwrap()
});
static RE_CLEAN_WS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \n]+").unwrap());

/// Extracts the summary of a cable, or `None` when it carries none.
pub fn parse_summary(content: &str, reference_id: &str) -> Option<String> {
    let raw = match RE_END_SUMMARY.find(content) {
        Some(end) => {
            let start = anchor::first(&RE_START_SUMMARY, content, 0..end.start())
                .or_else(|| anchor::first(&RE_ALT_START_SUMMARY, content, 0..end.start()));
            match start {
                Some(span) => &content[span.end..end.start()],
                None => {
                    if !exceptions::tables().allows_malformed_summary(reference_id) {
                        warn!(reference_id, "END SUMMARY marker without a start marker");
                    }
                    return None;
                }
            }
        }
        None => RE_INLINE_SUMMARY
            .captures(content)?
            .get(1)
            .map(|m| m.as_str())?,
    };
    let summary = RE_CLEAN_CLS.replace(raw, "");
    let summary = RE_CLEAN_NOISE.replace_all(&summary, " ");
    let summary = RE_CLEAN_WS.replace_all(&summary, " ");
    let summary = summary.trim();
    if summary.is_empty() {
        None
    } else {
        Some(summary.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimited_summary() {
        let content = "HEADER\n\n1. (C) SUMMARY: Alpha beta gamma. END SUMMARY.\n\n2. Next.";
        assert_eq!(
            parse_summary(content, "09OSLO1").as_deref(),
            Some("Alpha beta gamma.")
        );
    }

    #[test]
    fn test_begin_end_markers() {
        let content = "BEGIN SUMMARY Minister agreed to the visit. END SUMMARY\n";
        assert_eq!(
            parse_summary(content, "09OSLO1").as_deref(),
            Some("Minister agreed to the visit.")
        );
    }

    #[test]
    fn test_numbered_paragraph_fallback_start() {
        let content = "HEADER\n1. (U) First point stands. END SUMMARY\n";
        assert_eq!(
            parse_summary(content, "09OSLO1").as_deref(),
            Some("First point stands.")
        );
    }

    #[test]
    fn test_inline_summary() {
        let content = "HEADER\n1. Summary: Brief note about things.\n\n2. Body paragraph.";
        assert_eq!(
            parse_summary(content, "09OSLO1").as_deref(),
            Some("Brief note about things.")
        );
    }

    #[test]
    fn test_classification_prefix_scrubbed() {
        let content = "SUMMARY: (C) Alpha beta. END SUMMARY";
        assert_eq!(parse_summary(content, "09OSLO1").as_deref(), Some("Alpha beta."));
    }

    #[test]
    fn test_interior_paragraph_numbers_kept() {
        // Leading-paragraph scrubbing applies at the start of the
        // summary only, not to numbers inside it.
        let content = "SUMMARY: Alpha.\n2. Beta continues. END SUMMARY";
        assert_eq!(
            parse_summary(content, "09OSLO1").as_deref(),
            Some("Alpha. 2. Beta continues.")
        );
    }

    #[test]
    fn test_end_without_start() {
        let content = "Nothing marks the beginning here. END SUMMARY\n";
        assert_eq!(parse_summary(content, "09OSLO1"), None);
        // Known-malformed documents take the same path without the report.
        assert_eq!(parse_summary(content, "09CAIRO2133"), None);
    }

    #[test]
    fn test_no_summary_at_all() {
        assert_eq!(parse_summary("1. Plain body text.\n", "09OSLO1"), None);
    }
}

//! Subject-tag extraction.
//!
//! The `TAGS:` line names thematic and person tags. The label is often
//! damaged ("AGS:" with the T eaten by the previous line), the list may
//! continue onto a second line, and a few well-known person tags are
//! written as two bare words. Tokens are uppercased, fused tokens are
//! split, and known typos are folded to their canonical form.

use crate::exceptions;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static RE_TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^[ \t]*(?:TAGS?|AGS):?\s*(.+)").unwrap());
static RE_TAGS_SUBJECT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)SUBJECT:").unwrap());
static RE_TAGS_CONT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A\n([A-Za-z_-][^\n]*)").unwrap());
// A second line that is itself a comma-separated tag list.
static RE_TAGS_CONT_NEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A\n[ ]*[A-Za-z_-]+[ ]*,").unwrap());
static RE_TAG_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(ZOELLICK[ ]+ROBERT)|(GAZA[ ]+DISENGAGEMENT)|(ISRAELI[ ]+PALESTINIAN[ ]+AFFAIRS)|(COUNTER[ ]+TERRORISM)|(CLINTON[ ]+HILLARY)|(STEINBERG[ ]+JAMES)|(BIDEN[ ]+JOSEPH)|(RICE[ ]+CONDOLEEZZA)|(\([^\)]+\))|(?:,[ ]+)([A-Za-z_-]+[ ][A-Za-z_-]+)|([A-Za-z_-]+)",
    )
    .unwrap()
});

/// Extracts the subject tags of a cable, uppercased and deduplicated,
/// in order of first appearance.
pub fn parse_tags(content: &str, reference_id: &str) -> Vec<String> {
    let Some(caps) = RE_TAGS.captures(content) else {
        if !exceptions::tables().allows_missing_tags(reference_id) {
            debug!(reference_id, "no TAGS line found");
        }
        return Vec::new();
    };
    let line = caps.get(1).unwrap();
    let mut text = match RE_TAGS_SUBJECT.find(line.as_str()) {
        Some(m) => line.as_str()[..m.start()].to_string(),
        None => line.as_str().to_string(),
    };

    let after = &content[line.end()..];
    let continues = text.trim_end().ends_with(',') || RE_TAGS_CONT_NEXT.is_match(after);
    if continues {
        if let Some(cont) = RE_TAGS_CONT.captures(after) {
            text.push(' ');
            text.push_str(&cont[1]);
        }
    }

    let mut tags: Vec<String> = Vec::new();
    fn push(tags: &mut Vec<String>, tag: String) {
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    for caps in RE_TAG_TOKEN.captures_iter(&text) {
        let token: String = caps
            .iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str())
            .collect::<String>()
            .to_uppercase();
        let token = token
            .strip_prefix('(')
            .and_then(|t| t.strip_suffix(')'))
            .unwrap_or(&token)
            .trim()
            .to_string();
        if let Some(parts) = exceptions::tables().tag_split(reference_id, &token) {
            for part in parts {
                push(&mut tags, (*part).to_string());
            }
            continue;
        }
        let canonical = exceptions::tables().canonical_tag(&token).to_string();
        push(&mut tags, canonical);
    }
    tags
}

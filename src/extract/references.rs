//! Reference extraction.
//!
//! Cables cite earlier cables in a `REF:` block near the top of the
//! header, usually as lettered bullets (`A. 09OSLO123`), with the year
//! and origin written in half a dozen spellings. Tokens are normalized
//! into canonical reference identifiers: two-digit year, spaceless
//! upper-case origin, sequence number without leading zeros. A cable
//! never references itself and never lists the same cable twice.

use crate::anchor;
use crate::extract::MAX_HEADER_IDX;
use crate::model::{Reference, ReferenceKind};
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

static RE_STOP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)classified by").unwrap());
// The label is frequently damaged: "REF" without a colon, "REF(S):",
// "PROGRAM REFS:", or a second line of bare numeric citations. The
// capture may therefore span two lines.
static RE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:[\nPROGRAM ]*REF|REF\(S\):?\s*)([^\n]+(?:\n\s*[0-9]+[,\s]+[^\n]+)?)")
        .unwrap()
});
// First numbered paragraph; nothing after it belongs to the REF block.
static RE_NOT_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\n[0-9]\.[ ]*(?:\([A-Z]+\))?").unwrap());
static RE_BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*([A-Z])(\.|\))[^\n]*").unwrap());
static RE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:([A-Z])(?:\.|\))\s*)?([0-9]{2,4})?(?:\s*)([A-Z][A-Z ]*[A-Z]|[A-Z]{2,})(?:\s+)?([0-9]+)")
        .unwrap()
});
static RE_PAGE_NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"PAGE [0-9]+ [A-Z]+ [0-9]+ [0-9]+ OF [0-9]+ [A-Z0-9]+").unwrap()
});
static RE_REFERENCE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A[0-9]{2}[A-Z]+[0-9]+\z").unwrap());

/// Extracts the cables referenced by this one, in citation order and
/// without duplicates. `year` supplies the century-free year for tokens
/// that omit their own.
pub fn parse_references(content: &str, year: u16, reference_id: &str) -> Vec<Reference> {
    let stop = RE_STOP
        .find(content)
        .map(|m| m.start())
        .unwrap_or(MAX_HEADER_IDX);
    let (head, _) = anchor::window(content, 0..stop);

    let Some(caps) = RE_START.captures(head) else {
        // A lettered bullet run with no REF label means the label was
        // mangled; report it rather than silently guessing.
        if bullet_at_or_after(head, 0, head.len()).is_some() {
            warn!(reference_id, "reference bullets without a REF label");
        }
        return Vec::new();
    };
    let label_tail = caps.get(1).unwrap();

    let max_idx = RE_NOT_REF
        .find_at(head, label_tail.end())
        .map(|m| m.start())
        .unwrap_or(head.len())
        .min(head.len());

    // Extend over the contiguous run of bullet continuation lines.
    let mut last_end = label_tail.end();
    while let Some(m) = bullet_at_or_after(head, last_end, max_idx) {
        if m.0 != last_end {
            break;
        }
        last_end = m.1;
    }

    let refs_text = head[label_tail.start()..last_end].replace('\n', " ");
    let refs_text = RE_PAGE_NOISE.replace_all(&refs_text, " ");

    let mut references: Vec<Reference> = Vec::new();
    for caps in RE_TOKEN.captures_iter(&refs_text) {
        let bullet = caps.get(1).map(|m| m.as_str());
        let token_year = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        let origin = fold_origin(&caps[3]);
        let Ok(serial) = caps[4].parse::<u64>() else {
            continue;
        };
        let value = format!("{}{}{}", format_year(token_year, year), origin, serial);
        if !RE_REFERENCE_ID.is_match(&value) || value == reference_id {
            continue;
        }
        let reference = Reference::new(value, ReferenceKind::Cable, bullet, None);
        if !references.contains(&reference) {
            references.push(reference);
        }
    }
    references
}

// Finds the next bullet line in `head[..max_idx]` at or after `from`,
// skipping pseudo-bullets like "E.O. 12958" and "U.S." line openers.
fn bullet_at_or_after(head: &str, from: usize, max_idx: usize) -> Option<(usize, usize)> {
    let mut at = from;
    while let Some(caps) = RE_BULLET.captures_at(head, at) {
        let whole = caps.get(0).unwrap();
        if whole.start() >= max_idx {
            return None;
        }
        let after = caps.get(2).unwrap().end();
        let tail = &head[after..];
        if caps[2].eq(".") && (tail.starts_with("O.") || tail.starts_with("S.")) {
            at = whole.start() + 1;
            continue;
        }
        return Some((whole.start(), whole.end().min(max_idx)));
    }
    None
}

fn fold_origin(origin: &str) -> String {
    let origin: String = origin
        .chars()
        .filter(|c| *c != ' ')
        .collect::<String>()
        .to_uppercase();
    match origin.as_str() {
        "RIO" | "RIODEJAN" => "RIODEJANEIRO".to_string(),
        "SECSTATE" | "SECDEF" => "STATE".to_string(),
        "UNVIE" | "EMBASSYVIENNA" => "UNVIENNA".to_string(),
        _ => origin,
    }
}

// Normalizes a token's year digits to two, falling back to the cable's
// own year when the token carries none.
fn format_year(token_year: &str, cable_year: u16) -> String {
    let y = if token_year.is_empty() {
        cable_year.to_string()
    } else {
        token_year.to_string()
    };
    if y.len() > 2 {
        y[2..].to_string()
    } else {
        y
    }
}

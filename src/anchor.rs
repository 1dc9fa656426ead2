//! Anchor matching primitives.
//!
//! Every extractor locates its field relative to textual anchors
//! ("SUBJECT:", "END SUMMARY", a reference bullet, ...). This module holds
//! the shared search primitives: index windows clamped to char boundaries,
//! and first/last/earliest-of-N matches reported as offsets into the full
//! document rather than into the window slice.

use regex::Regex;
use std::ops::Range;

/// A matched anchor, as byte offsets into the full document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Clamps `idx` to the nearest char boundary at or below it.
pub fn floor_char_boundary(text: &str, idx: usize) -> usize {
    if idx >= text.len() {
        return text.len();
    }
    let mut i = idx;
    while !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Returns the window slice for `range` plus the absolute offset of its
/// start. Both bounds are clamped to the text and to char boundaries; an
/// inverted range yields an empty window.
pub fn window(text: &str, range: Range<usize>) -> (&str, usize) {
    let start = floor_char_boundary(text, range.start);
    let end = floor_char_boundary(text, range.end).max(start);
    (&text[start..end], start)
}

/// First match of `re` within `range`.
pub fn first(re: &Regex, text: &str, range: Range<usize>) -> Option<Span> {
    let (slice, base) = window(text, range);
    re.find(slice).map(|m| Span {
        start: base + m.start(),
        end: base + m.end(),
    })
}

/// Last match of `re` within `range`.
pub fn last(re: &Regex, text: &str, range: Range<usize>) -> Option<Span> {
    let (slice, base) = window(text, range);
    re.find_iter(slice).last().map(|m| Span {
        start: base + m.start(),
        end: base + m.end(),
    })
}

/// Earliest match among `patterns` within `range`. Ties go to the pattern
/// listed first.
pub fn earliest(patterns: &[&Regex], text: &str, range: Range<usize>) -> Option<Span> {
    patterns
        .iter()
        .filter_map(|re| first(re, text, range.clone()))
        .min_by_key(|span| span.start)
}

//! Content fixup engine.
//!
//! Some cables reach the extraction pipeline with corrupted text that no
//! pattern can match: a routing line fused together, a SUBJECT line that
//! other releases carry but this one dropped. The fixup engine applies the
//! document's substitution rule from the exception tables before any
//! segmentation or field extraction runs.

use crate::exceptions;
use regex::NoExpand;
use std::borrow::Cow;

/// Applies the document-specific substitution rule to `content`, if one
/// exists; otherwise returns the content unchanged.
///
/// Idempotent: rules are authored so the pattern no longer matches after
/// its own substitution, so applying the fixup twice equals applying it
/// once.
pub fn fix_content<'a>(content: &'a str, reference_id: &str) -> Cow<'a, str> {
    match exceptions::tables().content_fix(reference_id) {
        Some(fix) => fix
            .pattern
            .replace_all(content, NoExpand(&fix.replacement)),
        None => Cow::Borrowed(content),
    }
}

//! Exact and regex match extraction over plain content.
//!
//! Matches carry both the plain byte range (for highlighting) and the display
//! column range (for scrolling a match into view). Byte offsets are turned into
//! columns through the owning item's width index.

use std::ops::Range;

use core_text::{Highlight, StyleToken};
use regex::Regex;
use tracing::{debug, trace};

use crate::error::ItemError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Half-open byte range in the item's plain content.
    pub byte_range: Range<usize>,
    /// Half-open display column range.
    pub width_range: Range<usize>,
}

/// Every occurrence of `needle`, overlaps included: scanning resumes one
/// character after each match start. An empty needle matches nothing.
pub(crate) fn exact_ranges(haystack: &str, needle: &str) -> Vec<Range<usize>> {
    if needle.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut start = 0usize;
    while let Some(pos) = haystack[start..].find(needle) {
        let at = start + pos;
        out.push(at..at + needle.len());
        // Step a whole character so the next slice starts on a boundary.
        start = at + haystack[at..].chars().next().map_or(1, char::len_utf8);
        if start >= haystack.len() {
            break;
        }
    }
    trace!(target: "item.search", matches = out.len(), "exact_ranges");
    out
}

/// Native non-overlapping regex matches.
pub(crate) fn regex_ranges(haystack: &str, re: &Regex) -> Vec<Range<usize>> {
    let out: Vec<_> = re.find_iter(haystack).map(|m| m.range()).collect();
    trace!(target: "item.search", matches = out.len(), "regex_ranges");
    out
}

/// Compile a pattern, reporting failure before any scanning happens.
pub fn compile(pattern: &str) -> Result<Regex, ItemError> {
    Regex::new(pattern).map_err(|source| {
        debug!(target: "item.search", pattern_len = pattern.len(), "invalid_pattern");
        ItemError::InvalidPattern {
            pattern: pattern.to_owned(),
            source,
        }
    })
}

pub(crate) fn with_widths<F>(ranges: Vec<Range<usize>>, column_at_byte: F) -> Vec<Match>
where
    F: Fn(usize) -> usize,
{
    ranges
        .into_iter()
        .map(|r| Match {
            width_range: column_at_byte(r.start)..column_at_byte(r.end),
            byte_range: r,
        })
        .collect()
}

/// Pair matches with a style, sorted by `(start, end)` as the overlay expects.
pub fn highlights_from_matches(matches: &[Match], style: &StyleToken) -> Vec<Highlight> {
    let mut out: Vec<Highlight> = matches
        .iter()
        .filter(|m| !m.byte_range.is_empty())
        .map(|m| Highlight::new(m.byte_range.clone(), style.clone()))
        .collect();
    out.sort_by_key(|h| (h.range.start, h.range.end));
    out
}

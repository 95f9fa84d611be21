//! Per-character display width engine.
//!
//! [`char_width`] is the single authority for how many terminal cells a
//! character occupies. Every width decision in the workspace (index
//! construction, marker fitting, match column translation) flows through it.
//!
//! Width Precedence Order:
//! 1. ASCII fast path (printable -> 1, control -> 0).
//! 2. Explicit zero-width classes (ZWJ, variation selectors, combining marks).
//! 3. `unicode_width` table lookup; non-printing controls map to 0.
//!
//! Invariants:
//! - Results are clamped to [`MAX_CHAR_WIDTH`] so that they fit the 2-bit
//!   packed width table. Nothing in current Unicode data exceeds 2, so the
//!   clamp is a representational limit rather than an observed truncation.
//! - Width is measured per `char`, not per grapheme cluster. Combining marks
//!   report 0 and therefore ride along with the preceding glyph.

use unicode_width::UnicodeWidthChar;

/// Largest width representable in the packed width table (2 bits).
pub const MAX_CHAR_WIDTH: u8 = 3;

const ZWJ: char = '\u{200D}';

// Variation selectors (VS1..VS16); VS16 requests emoji presentation but adds no cells.
fn is_variation_selector(c: char) -> bool {
    ('\u{FE00}'..='\u{FE0F}').contains(&c)
}

// Combining mark ranges commonly encountered (subset)
fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
        || ('\u{1AB0}'..='\u{1AFF}').contains(&c)
        || ('\u{1DC0}'..='\u{1DFF}').contains(&c)
        || ('\u{20D0}'..='\u{20FF}').contains(&c)
        || ('\u{FE20}'..='\u{FE2F}').contains(&c)
}

/// Return the display width in terminal cells of a single character.
#[inline]
pub fn char_width(c: char) -> u8 {
    if c.is_ascii() {
        return if c.is_ascii_control() { 0 } else { 1 };
    }
    if c == ZWJ || is_variation_selector(c) || is_combining_mark(c) {
        return 0;
    }
    let w = UnicodeWidthChar::width(c).unwrap_or(0);
    w.min(MAX_CHAR_WIDTH as usize) as u8
}

/// Sum of [`char_width`] over a string with no embedded style sequences.
pub fn str_width(s: &str) -> usize {
    s.chars().map(|c| char_width(c) as usize).sum()
}

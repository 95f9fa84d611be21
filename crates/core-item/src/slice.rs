//! Shared tail of every `take`: overlay highlights, place continuation
//! markers, then collapse style no-ops.

use std::ops::Range;

use core_text::highlight::{self, Highlight};
use core_text::{marker, sgr};

/// A styled window cut from an item before highlights and markers are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawSlice {
    /// Styled text with sequences re-applied and closed.
    pub styled: String,
    /// Plain byte window in the owning item's coordinates.
    pub plain: Range<usize>,
    /// Column of the first consumed glyph, relative to the sliced span.
    pub start_col: usize,
    /// Display width consumed.
    pub width: usize,
}

impl RawSlice {
    pub fn empty(col: usize, byte: usize) -> Self {
        Self {
            styled: String::new(),
            plain: byte..byte,
            start_col: col,
            width: 0,
        }
    }

    /// Rebase plain offsets by `bytes` and columns by `cols`.
    pub fn shifted(mut self, bytes: usize, cols: usize) -> Self {
        self.plain = self.plain.start + bytes..self.plain.end + bytes;
        self.start_col += cols;
        self
    }

    /// Finish the slice against a span `span_width` columns wide.
    pub fn finish(
        self,
        span_width: usize,
        marker: &str,
        highlights: &[Highlight],
    ) -> (String, usize) {
        if self.width == 0 {
            return (String::new(), 0);
        }
        let spans = highlight::clip(highlights, self.plain.clone());
        let mut out = if spans.is_empty() {
            self.styled
        } else {
            highlight::overlay(&self.styled, &spans)
        };
        if !marker.is_empty() {
            if self.start_col > 0 {
                out = marker::overwrite_leading(&out, marker);
            }
            if self.start_col + self.width < span_width {
                out = marker::overwrite_trailing(&out, marker);
            }
        }
        (sgr::simplify(&out), self.width)
    }
}

//! Leaf item: one styled line with its width index.

use core_text::sgr::{self, StyleSequence};
use core_text::{Highlight, IndexTuning, WidthIndex};
use regex::Regex;
use tracing::debug;

use crate::error::ItemError;
use crate::matches::{self, Match};
use crate::slice::RawSlice;

/// Immutable styled line. Construction strips style sequences once and builds
/// the width index; every query afterwards is read-only.
#[derive(Debug, Clone)]
pub struct SingleItem {
    content: String,
    plain: String,
    sequences: Vec<StyleSequence>,
    index: WidthIndex,
}

impl SingleItem {
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_tuning(content, &IndexTuning::default())
    }

    pub fn with_tuning(content: impl Into<String>, tuning: &IndexTuning) -> Self {
        let content = content.into();
        let sequences = sgr::scan(&content);
        let plain = if sequences.is_empty() {
            content.clone()
        } else {
            sgr::strip_sequences(&content).into_owned()
        };
        let index = WidthIndex::build(&plain, tuning);
        if index.sparsity() > 1 {
            debug!(
                target: "item.build",
                plain_bytes = plain.len(),
                chars = index.char_count(),
                sparsity = index.sparsity(),
                index_bytes = index.heap_bytes(),
                "sparse_width_index"
            );
        }
        Self {
            content,
            plain,
            sequences,
            index,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn plain_content(&self) -> &str {
        &self.plain
    }

    pub fn width(&self) -> usize {
        self.index.width()
    }

    pub fn index(&self) -> &WidthIndex {
        &self.index
    }

    /// Cut up to `budget` columns starting at `column` (clamped to the line).
    /// Plain offsets and columns are local to this line.
    pub(crate) fn slice(&self, column: usize, budget: usize) -> RawSlice {
        let column = column.min(self.width());
        self.slice_from(self.index.char_at_column(column), budget)
    }

    /// [`slice`](Self::slice) from column 0 when a glyph before this line
    /// already owns its opening zero-width characters.
    pub(crate) fn slice_after_marks(&self, budget: usize) -> RawSlice {
        self.slice_from(self.leading_mark_count(), budget)
    }

    fn slice_from(&self, start: usize, budget: usize) -> RawSlice {
        let count = self.index.char_count();
        let mut end = start;
        let mut remaining = budget;
        // Zero-width characters always fit, so marks trailing the last glyph ride along.
        while end < count {
            let w = self.index.char_width(end) as usize;
            if w > remaining {
                break;
            }
            remaining -= w;
            end += 1;
        }
        let start_col = self.index.column_of_char(start);
        let b0 = self.index.byte_of_char(&self.plain, start);
        let consumed = budget - remaining;
        if consumed == 0 {
            return RawSlice::empty(start_col, b0);
        }
        let b1 = self.index.byte_of_char(&self.plain, end);
        RawSlice {
            styled: sgr::reapply(&self.content, &self.plain[b0..b1], b0, &self.sequences),
            plain: b0..b1,
            start_col,
            width: consumed,
        }
    }

    fn leading_mark_count(&self) -> usize {
        let count = self.index.char_count();
        let mut end = 0;
        while end < count && self.index.char_width(end) == 0 {
            end += 1;
        }
        end
    }

    /// The zero-width characters opening the line. They carry no columns of
    /// their own and belong to whatever glyph precedes this line in a row.
    pub(crate) fn leading_marks(&self) -> RawSlice {
        let b1 = self.index.byte_of_char(&self.plain, self.leading_mark_count());
        if b1 == 0 {
            return RawSlice::empty(0, 0);
        }
        RawSlice {
            styled: sgr::reapply(&self.content, &self.plain[..b1], 0, &self.sequences),
            plain: 0..b1,
            start_col: 0,
            width: 0,
        }
    }

    /// Render up to `width` columns starting at `column`.
    ///
    /// Returns the styled fragment and the columns it consumed. The consumed
    /// width is below `width` only when the line has no more glyphs that fit.
    /// `marker`, when non-empty, overwrites the edge columns on any side that
    /// has content beyond it. `highlights` are byte ranges of
    /// [`plain_content`](Self::plain_content), sorted by start.
    pub fn take(
        &self,
        column: usize,
        width: usize,
        marker: &str,
        highlights: &[Highlight],
    ) -> (String, usize) {
        let slice = self.slice(column, width);
        slice.finish(self.width(), marker, highlights)
    }

    /// Rows needed to show the line wrapped at `wrap_width` columns, counted
    /// as `ceil(width / wrap_width)`.
    ///
    /// This is a column count, not a replay of the wrap: when a glyph is wider
    /// than `wrap_width`, [`wrapped_lines`](crate::wrapped_lines) stops there
    /// and returns fewer rows than this.
    pub fn num_wrapped_lines(&self, wrap_width: usize) -> usize {
        wrapped_line_count(self.width(), wrap_width)
    }

    /// Display column at plain byte offset `byte`.
    pub(crate) fn column_at_byte(&self, byte: usize) -> usize {
        self.index.column_at_byte(&self.plain, byte)
    }

    pub fn extract_exact_matches(&self, needle: &str) -> Vec<Match> {
        let ranges = matches::exact_ranges(&self.plain, needle);
        matches::with_widths(ranges, |b| self.column_at_byte(b))
    }

    pub fn extract_regex_matches(&self, pattern: &str) -> Result<Vec<Match>, ItemError> {
        let re = matches::compile(pattern)?;
        Ok(self.extract_regex_matches_with(&re))
    }

    pub fn extract_regex_matches_with(&self, re: &Regex) -> Vec<Match> {
        let ranges = matches::regex_ranges(&self.plain, re);
        matches::with_widths(ranges, |b| self.column_at_byte(b))
    }
}

pub(crate) fn wrapped_line_count(width: usize, wrap_width: usize) -> usize {
    if wrap_width == 0 {
        return 0;
    }
    width.div_ceil(wrap_width).max(1)
}

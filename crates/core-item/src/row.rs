//! Ordered leaf children with precomputed cumulative byte and width offsets.
//!
//! `bytes[k]` is where child `k` starts in the joined plain content, which puts
//! `separator` bytes between neighbours (0 for horizontal rows, 1 for the line
//! break between stacked lines). `widths[k]` is the column where child `k`
//! starts; separators take no columns.

use std::ops::Range;
use std::sync::Arc;

use core_text::Highlight;

use crate::single::SingleItem;
use crate::slice::RawSlice;

#[derive(Debug, Clone)]
pub(crate) struct Row {
    children: Vec<Arc<SingleItem>>,
    bytes: Vec<usize>,
    widths: Vec<usize>,
    separator: &'static str,
}

impl Row {
    pub fn new(children: Vec<Arc<SingleItem>>, separator: &'static str) -> Self {
        let mut bytes = Vec::with_capacity(children.len() + 1);
        let mut widths = Vec::with_capacity(children.len() + 1);
        let (mut b, mut w) = (0usize, 0usize);
        for (k, child) in children.iter().enumerate() {
            if k > 0 {
                b += separator.len();
            }
            bytes.push(b);
            widths.push(w);
            b += child.plain_content().len();
            w += child.width();
        }
        bytes.push(b);
        widths.push(w);
        Self {
            children,
            bytes,
            widths,
            separator,
        }
    }

    pub fn children(&self) -> &[Arc<SingleItem>] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn width(&self) -> usize {
        self.widths[self.children.len()]
    }

    /// Width of children `range`.
    pub fn span_width(&self, range: Range<usize>) -> usize {
        self.widths[range.end] - self.widths[range.start]
    }

    /// Byte offset where child `k` starts in the joined plain content.
    pub fn byte_offset(&self, k: usize) -> usize {
        self.bytes[k]
    }

    pub fn join_content(&self) -> String {
        self.join(SingleItem::content)
    }

    pub fn join_plain(&self) -> String {
        self.join(SingleItem::plain_content)
    }

    fn join(&self, part: fn(&SingleItem) -> &str) -> String {
        let mut out = String::new();
        for (k, child) in self.children.iter().enumerate() {
            if k > 0 {
                out.push_str(self.separator);
            }
            out.push_str(part(child));
        }
        out
    }

    /// Display column of joined plain byte offset `byte`.
    ///
    /// Binary-searches the owning child, then defers to that child's index. A
    /// byte inside a separator resolves to the end of the preceding child.
    pub fn column_at_byte(&self, byte: usize) -> usize {
        if self.children.is_empty() {
            return 0;
        }
        let k = self
            .bytes
            .partition_point(|&b| b <= byte)
            .saturating_sub(1)
            .min(self.children.len() - 1);
        let child = &self.children[k];
        let local = (byte - self.bytes[k]).min(child.plain_content().len());
        self.widths[k] + child.column_at_byte(local)
    }

    /// Cut up to `budget` columns from children `range`, starting at `column`
    /// measured from the first child of the range.
    ///
    /// Starts in the child containing `column` and continues into following
    /// children while each one is exhausted. Once the budget is spent, only the
    /// zero-width characters opening the next children are still taken, so
    /// they stay with the glyph they follow. Plain offsets in the result are
    /// joined-content offsets.
    pub fn slice(&self, range: Range<usize>, column: usize, budget: usize) -> RawSlice {
        let base = self.widths[range.start];
        let column = column.min(self.span_width(range.clone()));
        let Some(glyph) = range.clone().find(|&k| self.widths[k + 1] - base > column) else {
            return RawSlice::empty(column, self.end_byte(range));
        };
        // At column 0 the zero-width children ahead of the first glyph lead the window.
        let first = if column == 0 { range.start } else { glyph };

        let mut styled = String::new();
        let mut remaining = budget;
        let mut plain_start = None;
        let mut start_col = 0usize;
        let mut plain_end = self.bytes[first];
        let mut local_col = column - (self.widths[first] - base);
        for k in first..range.end {
            let child = &self.children[k];
            let mut part = if k == first && local_col == 0 && column > 0 {
                child.slice_after_marks(remaining)
            } else {
                child.slice(local_col, remaining)
            };
            if (k > first || column == 0) && part.width == 0 {
                part = child.leading_marks();
            }
            let part = part.shifted(self.bytes[k], self.widths[k] - base);
            let carries = part.width > 0 || !part.plain.is_empty();
            if plain_start.is_none() && (carries || k + 1 == range.end) {
                plain_start = Some(part.plain.start);
                start_col = part.start_col;
            }
            let exhausted = part.start_col - (self.widths[k] - base) + part.width == child.width();
            styled.push_str(&part.styled);
            remaining -= part.width;
            plain_end = part.plain.end;
            if !exhausted {
                break;
            }
            local_col = 0;
        }
        let consumed = budget - remaining;
        if consumed == 0 {
            return RawSlice::empty(start_col, plain_end);
        }
        RawSlice {
            styled,
            plain: plain_start.unwrap_or(plain_end)..plain_end,
            start_col,
            width: consumed,
        }
    }

    /// Joined plain offset just past the last child of `range`.
    fn end_byte(&self, range: Range<usize>) -> usize {
        match range.end.checked_sub(1) {
            Some(last) if !range.is_empty() => {
                self.bytes[last] + self.children[last].plain_content().len()
            }
            _ => self.bytes[range.start],
        }
    }

    /// Slice then finish against the width of `range`.
    pub fn take(
        &self,
        range: Range<usize>,
        column: usize,
        width: usize,
        marker: &str,
        highlights: &[Highlight],
    ) -> (String, usize) {
        let span = self.span_width(range.clone());
        let slice = self.slice(range, column, width);
        slice.finish(span, marker, highlights)
    }
}

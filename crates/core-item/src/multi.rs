//! Horizontal composites: [`MultiItem`] and its pinned-prefix form [`ConcatItem`].

use std::sync::Arc;

use core_text::Highlight;
use regex::Regex;
use tracing::debug;

use crate::error::ItemError;
use crate::matches::{self, Match};
use crate::row::Row;
use crate::single::{SingleItem, wrapped_line_count};

/// Leaf items joined end to end into one logical line.
#[derive(Debug, Clone)]
pub struct MultiItem {
    row: Row,
    content: String,
    plain: String,
}

impl MultiItem {
    pub fn new(children: impl IntoIterator<Item = Arc<SingleItem>>) -> Self {
        let row = Row::new(children.into_iter().collect(), "");
        debug!(target: "item.build", children = row.len(), width = row.width(), "multi_item");
        Self {
            content: row.join_content(),
            plain: row.join_plain(),
            row,
        }
    }

    pub fn children(&self) -> &[Arc<SingleItem>] {
        self.row.children()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn plain_content(&self) -> &str {
        &self.plain
    }

    pub fn width(&self) -> usize {
        self.row.width()
    }

    /// Same contract as [`SingleItem::take`], over the joined line.
    pub fn take(
        &self,
        column: usize,
        width: usize,
        marker: &str,
        highlights: &[Highlight],
    ) -> (String, usize) {
        let n = self.row.len();
        self.row.take(0..n, column, width, marker, highlights)
    }

    pub fn num_wrapped_lines(&self, wrap_width: usize) -> usize {
        wrapped_line_count(self.width(), wrap_width)
    }

    pub fn extract_exact_matches(&self, needle: &str) -> Vec<Match> {
        let ranges = matches::exact_ranges(&self.plain, needle);
        matches::with_widths(ranges, |b| self.row.column_at_byte(b))
    }

    pub fn extract_regex_matches(&self, pattern: &str) -> Result<Vec<Match>, ItemError> {
        let re = matches::compile(pattern)?;
        Ok(self.extract_regex_matches_with(&re))
    }

    pub fn extract_regex_matches_with(&self, re: &Regex) -> Vec<Match> {
        let ranges = matches::regex_ranges(&self.plain, re);
        matches::with_widths(ranges, |b| self.row.column_at_byte(b))
    }
}

/// A [`MultiItem`] whose first `pinned` children stay at column 0 while the
/// rest pans.
///
/// The pinned block is rendered whole and unmarked whenever it fits the
/// requested width; the remaining children fill what is left, panned by the
/// requested column. A pinned block wider than the window is rendered alone,
/// truncated with the trailing marker.
#[derive(Debug, Clone)]
pub struct ConcatItem {
    row: Row,
    pinned: usize,
    content: String,
    plain: String,
}

impl ConcatItem {
    /// Panics if `pinned` exceeds the number of children.
    pub fn new(children: impl IntoIterator<Item = Arc<SingleItem>>, pinned: usize) -> Self {
        let row = Row::new(children.into_iter().collect(), "");
        assert!(
            pinned <= row.len(),
            "pinned count {pinned} exceeds {} children",
            row.len()
        );
        debug!(
            target: "item.build",
            children = row.len(),
            pinned,
            width = row.width(),
            "concat_item"
        );
        Self {
            content: row.join_content(),
            plain: row.join_plain(),
            pinned,
            row,
        }
    }

    /// A horizontal composite with nothing pinned.
    pub fn unpinned(children: impl IntoIterator<Item = Arc<SingleItem>>) -> Self {
        Self::new(children, 0)
    }

    pub fn children(&self) -> &[Arc<SingleItem>] {
        self.row.children()
    }

    /// Display width of the pinned block.
    pub fn pinned_width(&self) -> usize {
        self.row.span_width(0..self.pinned)
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn plain_content(&self) -> &str {
        &self.plain
    }

    pub fn width(&self) -> usize {
        self.row.width()
    }

    /// Render the pinned block at column 0 and the panned children after it.
    /// `column` pans only the unpinned children.
    pub fn take(
        &self,
        column: usize,
        width: usize,
        marker: &str,
        highlights: &[Highlight],
    ) -> (String, usize) {
        let n = self.row.len();
        if self.pinned == 0 {
            return self.row.take(0..n, column, width, marker, highlights);
        }
        let row = &self.row;
        let pinned_width = self.pinned_width();
        if pinned_width > width {
            return row.take(0..self.pinned, 0, width, marker, highlights);
        }
        let (mut out, used) = row.take(0..self.pinned, 0, pinned_width, "", highlights);
        let budget = width - pinned_width;
        let (rest, rest_width) = row.take(self.pinned..n, column, budget, marker, highlights);
        out.push_str(&rest);
        (out, used + rest_width)
    }

    /// Take over the joined line as if nothing were pinned.
    pub(crate) fn take_flat(
        &self,
        column: usize,
        width: usize,
        marker: &str,
        highlights: &[Highlight],
    ) -> (String, usize) {
        let n = self.row.len();
        self.row.take(0..n, column, width, marker, highlights)
    }

    pub fn num_wrapped_lines(&self, wrap_width: usize) -> usize {
        wrapped_line_count(self.width(), wrap_width)
    }

    pub fn extract_exact_matches(&self, needle: &str) -> Vec<Match> {
        let ranges = matches::exact_ranges(&self.plain, needle);
        matches::with_widths(ranges, |b| self.row.column_at_byte(b))
    }

    pub fn extract_regex_matches(&self, pattern: &str) -> Result<Vec<Match>, ItemError> {
        let re = matches::compile(pattern)?;
        Ok(self.extract_regex_matches_with(&re))
    }

    pub fn extract_regex_matches_with(&self, re: &Regex) -> Vec<Match> {
        let ranges = matches::regex_ranges(&self.plain, re);
        matches::with_widths(ranges, |b| self.row.column_at_byte(b))
    }
}

//! Vertically stacked leaf items.

use std::sync::Arc;

use regex::Regex;
use tracing::debug;

use crate::error::ItemError;
use crate::matches::{self, Match};
use crate::row::Row;
use crate::single::SingleItem;

/// Several leaf items shown as separate terminal lines.
///
/// There is no horizontal window over stacked lines, so this type has no
/// `take`; render each of [`children`](Self::children) instead. Search runs
/// over the children joined by `'\n'`, with columns counted cumulatively
/// across children (the separator takes no column).
#[derive(Debug, Clone)]
pub struct MultiLineItem {
    row: Row,
    content: String,
    plain: String,
}

impl MultiLineItem {
    pub fn new(children: impl IntoIterator<Item = Arc<SingleItem>>) -> Self {
        let row = Row::new(children.into_iter().collect(), "\n");
        debug!(target: "item.build", lines = row.len(), "multi_line_item");
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

    /// Sum of the children's widths.
    pub fn width(&self) -> usize {
        self.row.width()
    }

    /// Where child `k` starts in [`plain_content`](Self::plain_content).
    pub fn byte_offset(&self, k: usize) -> usize {
        self.row.byte_offset(k)
    }

    /// Rows needed when every child wraps independently.
    pub fn num_wrapped_lines(&self, wrap_width: usize) -> usize {
        self.children()
            .iter()
            .map(|c| c.num_wrapped_lines(wrap_width))
            .sum()
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

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stacked(lines: &[&str]) -> MultiLineItem {
        MultiLineItem::new(lines.iter().map(|l| Arc::new(SingleItem::new(*l))))
    }

    #[test]
    fn joins_with_line_breaks() {
        let m = stacked(&["ab", "\x1b[1mcd\x1b[0m"]);
        assert_eq!(m.plain_content(), "ab\ncd");
        assert_eq!(m.content(), "ab\n\x1b[1mcd\x1b[0m");
        assert_eq!(m.width(), 4);
        assert_eq!(m.byte_offset(1), 3);
    }

    #[test]
    fn wrapped_lines_sum_children() {
        let m = stacked(&["hello world", "", "abc"]);
        assert_eq!(m.num_wrapped_lines(5), 3 + 1 + 1);
        assert_eq!(m.num_wrapped_lines(0), 0);
    }

    #[test]
    fn match_columns_skip_separators() {
        let m = stacked(&["xab", "ab"]);
        let found = m.extract_exact_matches("ab");
        let bytes: Vec<_> = found.iter().map(|m| m.byte_range.clone()).collect();
        let cols: Vec<_> = found.iter().map(|m| m.width_range.clone()).collect();
        assert_eq!(bytes, vec![1..3, 4..6]);
        assert_eq!(cols, vec![1..3, 3..5]);
    }

    #[test]
    fn match_spanning_line_break() {
        let m = stacked(&["ab", "cd"]);
        let found = m.extract_regex_matches(r"b\nc").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].byte_range, 1..4);
        assert_eq!(found[0].width_range, 1..3);
    }
}

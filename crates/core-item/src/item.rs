//! The closed set of renderable items.

use std::sync::Arc;

use core_text::Highlight;
use regex::Regex;

use crate::error::ItemError;
use crate::matches::Match;
use crate::multi::{ConcatItem, MultiItem};
use crate::multiline::MultiLineItem;
use crate::single::SingleItem;

/// Any renderable item. Cloning shares the underlying immutable value.
#[derive(Debug, Clone)]
pub enum Item {
    Single(Arc<SingleItem>),
    Multi(Arc<MultiItem>),
    Concat(Arc<ConcatItem>),
    MultiLine(Arc<MultiLineItem>),
}

impl Item {
    pub fn width(&self) -> usize {
        match self {
            Item::Single(i) => i.width(),
            Item::Multi(i) => i.width(),
            Item::Concat(i) => i.width(),
            Item::MultiLine(i) => i.width(),
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Item::Single(i) => i.content(),
            Item::Multi(i) => i.content(),
            Item::Concat(i) => i.content(),
            Item::MultiLine(i) => i.content(),
        }
    }

    pub fn plain_content(&self) -> &str {
        match self {
            Item::Single(i) => i.plain_content(),
            Item::Multi(i) => i.plain_content(),
            Item::Concat(i) => i.plain_content(),
            Item::MultiLine(i) => i.plain_content(),
        }
    }

    /// Render a horizontal window; see [`SingleItem::take`].
    ///
    /// # Panics
    ///
    /// On [`Item::MultiLine`]: stacked lines have no single window. Split them
    /// with [`line_broken_items`](Self::line_broken_items) and take each.
    pub fn take(
        &self,
        column: usize,
        width: usize,
        marker: &str,
        highlights: &[Highlight],
    ) -> (String, usize) {
        match self {
            Item::Single(i) => i.take(column, width, marker, highlights),
            Item::Multi(i) => i.take(column, width, marker, highlights),
            Item::Concat(i) => i.take(column, width, marker, highlights),
            Item::MultiLine(_) => {
                panic!("take is not defined on a multi-line item; use line_broken_items")
            }
        }
    }

    pub fn num_wrapped_lines(&self, wrap_width: usize) -> usize {
        match self {
            Item::Single(i) => i.num_wrapped_lines(wrap_width),
            Item::Multi(i) => i.num_wrapped_lines(wrap_width),
            Item::Concat(i) => i.num_wrapped_lines(wrap_width),
            Item::MultiLine(i) => i.num_wrapped_lines(wrap_width),
        }
    }

    /// The items to render one terminal line each: the children of a
    /// multi-line item, otherwise the item itself.
    pub fn line_broken_items(&self) -> Vec<Item> {
        match self {
            Item::MultiLine(i) => i.children().iter().cloned().map(Item::Single).collect(),
            other => vec![other.clone()],
        }
    }

    pub fn extract_exact_matches(&self, needle: &str) -> Vec<Match> {
        match self {
            Item::Single(i) => i.extract_exact_matches(needle),
            Item::Multi(i) => i.extract_exact_matches(needle),
            Item::Concat(i) => i.extract_exact_matches(needle),
            Item::MultiLine(i) => i.extract_exact_matches(needle),
        }
    }

    /// Compile `pattern` and search; an invalid pattern fails before scanning.
    pub fn extract_regex_matches(&self, pattern: &str) -> Result<Vec<Match>, ItemError> {
        let re = crate::matches::compile(pattern)?;
        Ok(self.extract_regex_matches_with(&re))
    }

    pub fn extract_regex_matches_with(&self, re: &Regex) -> Vec<Match> {
        match self {
            Item::Single(i) => i.extract_regex_matches_with(re),
            Item::Multi(i) => i.extract_regex_matches_with(re),
            Item::Concat(i) => i.extract_regex_matches_with(re),
            Item::MultiLine(i) => i.extract_regex_matches_with(re),
        }
    }
}

impl From<SingleItem> for Item {
    fn from(item: SingleItem) -> Self {
        Item::Single(Arc::new(item))
    }
}

impl From<MultiItem> for Item {
    fn from(item: MultiItem) -> Self {
        Item::Multi(Arc::new(item))
    }
}

impl From<ConcatItem> for Item {
    fn from(item: ConcatItem) -> Self {
        Item::Concat(Arc::new(item))
    }
}

impl From<MultiLineItem> for Item {
    fn from(item: MultiLineItem) -> Self {
        Item::MultiLine(Arc::new(item))
    }
}

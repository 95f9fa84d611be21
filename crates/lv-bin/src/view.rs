//! Turns input text into items and renders the requested window of each.

use std::sync::Arc;

use core_item::matches::compile;
use core_item::{ConcatItem, Item, Match, SingleItem, highlights_from_matches, wrapped_lines};
use core_text::{Highlight, IndexTuning, StyleToken};
use regex::Regex;
use tracing::debug;

/// Line filter: keeps matching lines and highlights the matches.
#[derive(Debug, Clone)]
pub enum Filter {
    Exact(String),
    Regex(Regex),
}

impl Filter {
    pub fn new(pattern: &str, regex: bool) -> anyhow::Result<Self> {
        if regex {
            Ok(Filter::Regex(compile(pattern)?))
        } else {
            Ok(Filter::Exact(pattern.to_owned()))
        }
    }

    fn find(&self, text: &SingleItem) -> Vec<Match> {
        match self {
            Filter::Exact(needle) => text.extract_exact_matches(needle),
            Filter::Regex(re) => text.extract_regex_matches_with(re),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub column: usize,
    pub width: usize,
    pub marker: String,
    pub filter: Option<Filter>,
    pub line_numbers: bool,
    pub wrap: bool,
}

/// One input line ready to render.
#[derive(Debug, Clone)]
pub struct Line {
    pub item: Item,
    /// The line's own text, without any line-number prefix.
    pub text: Arc<SingleItem>,
    /// Plain bytes in front of `text` inside `item`.
    pub prefix_len: usize,
}

pub fn build_lines(input: &str, tuning: &IndexTuning, line_numbers: bool) -> Vec<Line> {
    let count = input.lines().count();
    let digits = count.max(1).to_string().len();
    input
        .lines()
        .enumerate()
        .map(|(n, raw)| {
            let text = Arc::new(SingleItem::with_tuning(raw, tuning));
            if !line_numbers {
                return Line {
                    item: Item::Single(text.clone()),
                    text,
                    prefix_len: 0,
                };
            }
            let number = Arc::new(SingleItem::new(format!(
                "\x1b[2m{:>digits$} \x1b[0m",
                n + 1
            )));
            let prefix_len = number.plain_content().len();
            Line {
                item: Item::from(ConcatItem::new([number, text.clone()], 1)),
                text,
                prefix_len,
            }
        })
        .collect()
}

fn shifted(highlights: Vec<Highlight>, by: usize) -> Vec<Highlight> {
    highlights
        .into_iter()
        .map(|h| Highlight::new(h.range.start + by..h.range.end + by, h.style))
        .collect()
}

/// Rendered terminal rows for `lines` under `opts`.
pub fn render(lines: &[Line], opts: &ViewOptions, style: &StyleToken) -> Vec<String> {
    let mut rows = Vec::new();
    let mut shown = 0usize;
    for line in lines {
        let highlights = match &opts.filter {
            Some(filter) => {
                let found = filter.find(&line.text);
                if found.is_empty() {
                    continue;
                }
                shifted(highlights_from_matches(&found, style), line.prefix_len)
            }
            None => Vec::new(),
        };
        shown += 1;
        if opts.wrap {
            rows.extend(wrapped_lines(&line.item, opts.width, &highlights));
        } else {
            let (fragment, _) = line
                .item
                .take(opts.column, opts.width, &opts.marker, &highlights);
            rows.push(fragment);
        }
    }
    debug!(target: "runtime", lines = lines.len(), shown, rows = rows.len(), "render_complete");
    rows
}

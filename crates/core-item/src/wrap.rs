//! Soft wrapping by repeated `take`.

use core_text::Highlight;

use crate::item::Item;

/// Split `item` into rows at most `wrap_width` columns wide.
///
/// Rows come from successive takes at `column += consumed` until nothing more
/// fits. An empty item yields one empty row, and a glyph wider than
/// `wrap_width` ends wrapping. A pinned concat wraps its whole joined line.
/// Multi-line items wrap each child separately, with `highlights` rebased from
/// the joined content onto each child. `wrap_width == 0` yields no rows.
///
/// The row count matches `num_wrapped_lines` except when a glyph is wider than
/// `wrap_width`, where this returns only the rows before that glyph.
pub fn wrapped_lines(item: &Item, wrap_width: usize, highlights: &[Highlight]) -> Vec<String> {
    if wrap_width == 0 {
        return Vec::new();
    }
    match item {
        Item::Single(i) => rows(|col| i.take(col, wrap_width, "", highlights)),
        Item::Multi(i) => rows(|col| i.take(col, wrap_width, "", highlights)),
        Item::Concat(i) => rows(|col| i.take_flat(col, wrap_width, "", highlights)),
        Item::MultiLine(i) => {
            let mut out = Vec::new();
            for (k, child) in i.children().iter().enumerate() {
                let base = i.byte_offset(k);
                let local = rebase(highlights, base..base + child.plain_content().len());
                out.extend(rows(|col| child.take(col, wrap_width, "", &local)));
            }
            out
        }
    }
}

fn rows(mut take: impl FnMut(usize) -> (String, usize)) -> Vec<String> {
    let mut out = Vec::new();
    let mut column = 0usize;
    loop {
        let (row, consumed) = take(column);
        if consumed == 0 {
            break;
        }
        out.push(row);
        column += consumed;
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

fn rebase(highlights: &[Highlight], window: std::ops::Range<usize>) -> Vec<Highlight> {
    highlights
        .iter()
        .filter_map(|h| {
            let start = h.range.start.max(window.start);
            let end = h.range.end.min(window.end);
            (start < end)
                .then(|| Highlight::new(start - window.start..end - window.start, h.style.clone()))
        })
        .collect()
}

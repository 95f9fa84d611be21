//! Property-based tests for width accounting and windowed rendering.

use std::sync::Arc;

use core_item::{ConcatItem, MultiItem, SingleItem};
use core_text::sgr::{self, Token};
use core_text::{char_width, str_width};
use proptest::prelude::*;

// One visible glyph, sometimes carrying a combining mark.
fn glyph() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!['a', 'b', 'z', ' ', '-', '界', '😀', 'é']),
        prop::bool::weighted(0.2),
    )
        .prop_map(|(c, mark)| {
            let mut s = c.to_string();
            if mark {
                s.push('\u{0301}');
            }
            s
        })
}

// Glyph runs interleaved with color sequences that may or may not be reset.
fn styled_line() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (
            prop::option::of(31u8..38),
            prop::collection::vec(glyph(), 0..6),
            any::<bool>(),
        ),
        0..6,
    )
    .prop_map(|segments| {
        let mut line = String::new();
        for (color, glyphs, reset) in segments {
            if let Some(c) = color {
                line.push_str(&format!("\x1b[{c}m"));
            }
            line.extend(glyphs);
            if reset {
                line.push_str("\x1b[0m");
            }
        }
        line
    })
}

// A composite child that may open with, or consist only of, combining marks.
fn child_line() -> impl Strategy<Value = String> {
    (prop::collection::vec(Just('\u{0301}'), 0..3), styled_line()).prop_map(|(marks, line)| {
        let mut child: String = marks.into_iter().collect();
        child.push_str(&line);
        child
    })
}

fn strip(s: &str) -> String {
    sgr::strip_sequences(s).into_owned()
}

fn plain_width(s: &str) -> usize {
    s.chars().map(|c| char_width(c) as usize).sum()
}

// Concatenated plain text of successive windows starting at column 0.
fn sweep<F>(mut take: F) -> String
where
    F: FnMut(usize) -> (String, usize),
{
    let mut out = String::new();
    let mut column = 0usize;
    loop {
        let (fragment, consumed) = take(column);
        if consumed == 0 {
            break;
        }
        out.push_str(&strip(&fragment));
        column += consumed;
    }
    out
}

fn last_sequence_is_reset(s: &str) -> bool {
    sgr::tokens(s)
        .filter_map(|t| match t {
            Token::Sequence(seq) => Some(seq),
            Token::Text(_) => None,
        })
        .last()
        .is_none_or(sgr::is_reset)
}

proptest! {
    #[test]
    fn width_is_sum_of_char_widths(line in styled_line()) {
        let item = SingleItem::new(line);
        prop_assert_eq!(item.width(), plain_width(item.plain_content()));
    }

    #[test]
    fn composite_width_is_sum_of_char_widths(lines in prop::collection::vec(styled_line(), 0..4)) {
        let m = MultiItem::new(lines.into_iter().map(|l| Arc::new(SingleItem::new(l))));
        prop_assert_eq!(m.width(), plain_width(m.plain_content()));
    }

    #[test]
    fn successive_takes_cover_plain_content(line in styled_line(), width in 2usize..12) {
        let item = SingleItem::new(line);
        let covered = sweep(|col| item.take(col, width, "", &[]));
        prop_assert_eq!(covered.as_str(), item.plain_content());
    }

    #[test]
    fn successive_multi_takes_cover_plain_content(
        lines in prop::collection::vec(child_line(), 1..5),
        width in 2usize..12,
    ) {
        let m = MultiItem::new(lines.into_iter().map(|l| Arc::new(SingleItem::new(l))));
        // Marks with no glyph anywhere have nothing to attach to.
        prop_assume!(m.width() > 0);
        let covered = sweep(|col| m.take(col, width, "", &[]));
        prop_assert_eq!(covered.as_str(), m.plain_content());
    }

    #[test]
    fn styling_never_changes_what_is_taken(line in styled_line(), col in 0usize..40, width in 0usize..12) {
        let styled = SingleItem::new(line);
        let bare = SingleItem::new(styled.plain_content());
        let (fragment, consumed) = styled.take(col, width, "", &[]);
        let (expected, expected_consumed) = bare.take(col, width, "", &[]);
        prop_assert_eq!(strip(&fragment), expected);
        prop_assert_eq!(consumed, expected_consumed);
        prop_assert!(last_sequence_is_reset(&fragment));
    }

    #[test]
    fn takes_stay_within_budget(line in styled_line(), col in 0usize..40, width in 0usize..12) {
        let item = SingleItem::new(line);
        let (fragment, consumed) = item.take(col, width, "...", &[]);
        prop_assert!(consumed <= width);
        prop_assert_eq!(str_width(&strip(&fragment)), consumed);
        prop_assert!(last_sequence_is_reset(&fragment));
    }

    #[test]
    fn panning_never_changes_pinned_child(
        pinned in styled_line(),
        rest in styled_line(),
        col in 0usize..40,
        extra in 0usize..10,
    ) {
        let pinned = Arc::new(SingleItem::new(pinned));
        let pinned_width = pinned.width();
        let expected = pinned.take(0, pinned_width, "", &[]).0;
        let c = ConcatItem::new([pinned, Arc::new(SingleItem::new(rest))], 1);
        let (at_zero, _) = c.take(0, pinned_width + extra, "..", &[]);
        let (panned, _) = c.take(col, pinned_width + extra, "..", &[]);
        prop_assert!(at_zero.starts_with(&expected));
        prop_assert!(panned.starts_with(&expected));
    }
}

//! Highlight overlay for already-sliced, already-styled fragments.
//!
//! The overlay walks the fragment once, whatever the number of highlights:
//! it tracks the active style stack and a running plain-byte count, and when
//! the count reaches the next highlight it closes the base style, renders the
//! highlighted text with the highlight's token, and replays the base style.
//! Re-scanning the fragment per highlight turns thousands of one-character
//! matches on a long line into quadratic work; do not do that here.
//!
//! Preconditions for [`overlay`]: spans are relative to the fragment's plain
//! text, lie inside it, and are sorted by start. Overlapping spans are skipped
//! in favor of the earlier one.

use std::ops::Range;

use smallvec::SmallVec;

use crate::sgr::{self, RESET, Token};
use crate::style::StyleToken;

/// A byte range of an item's plain content paired with the style to paint it with.
#[derive(Debug, Clone)]
pub struct Highlight {
    pub range: Range<usize>,
    pub style: StyleToken,
}

impl Highlight {
    pub fn new(range: Range<usize>, style: StyleToken) -> Self {
        Self { range, style }
    }
}

/// A highlight clipped to a fragment, in fragment-relative plain bytes.
#[derive(Debug, Clone)]
pub struct HighlightSpan<'a> {
    pub range: Range<usize>,
    pub style: &'a StyleToken,
}

/// Clip `highlights` (sorted by start) to the plain byte `window`, rebasing
/// onto the window start.
///
/// Ends are not assumed to be ordered: a long highlight may precede shorter
/// ones, so every highlight starting before the window is checked for reach.
pub fn clip<'a>(highlights: &'a [Highlight], window: Range<usize>) -> Vec<HighlightSpan<'a>> {
    if highlights.is_empty() || window.is_empty() {
        return Vec::new();
    }
    let first = highlights.partition_point(|h| h.range.start < window.start);
    let reaching = highlights[..first]
        .iter()
        .filter(|h| h.range.end > window.start);
    let inside = highlights[first..]
        .iter()
        .take_while(|h| h.range.start < window.end);
    reaching
        .chain(inside)
        .filter_map(|h| {
            let start = h.range.start.max(window.start);
            let end = h.range.end.min(window.end);
            (start < end).then(|| HighlightSpan {
                range: start - window.start..end - window.start,
                style: &h.style,
            })
        })
        .collect()
}

struct Open<'a> {
    end: usize,
    style: &'a StyleToken,
    text: String,
}

/// Paint `spans` over `fragment` in a single pass.
pub fn overlay(fragment: &str, spans: &[HighlightSpan<'_>]) -> String {
    if spans.is_empty() {
        return fragment.to_owned();
    }
    let mut out = String::with_capacity(fragment.len() + spans.len() * 8);
    let mut active: SmallVec<[&str; 4]> = SmallVec::new();
    let mut plain = 0usize;
    let mut next = 0usize;
    let mut open: Option<Open<'_>> = None;

    for token in sgr::tokens(fragment) {
        match token {
            Token::Sequence(seq) => {
                if sgr::is_reset(seq) {
                    active.clear();
                } else {
                    active.push(seq);
                }
                // Inside a highlight the sequence only updates the base style
                // that gets replayed once the highlight closes.
                if open.is_none() {
                    out.push_str(seq);
                }
            }
            Token::Text(mut rest) => {
                while !rest.is_empty() {
                    if let Some(cur) = open.as_mut() {
                        let take = (cur.end - plain).min(rest.len());
                        cur.text.push_str(&rest[..take]);
                        plain += take;
                        rest = &rest[take..];
                        if plain == cur.end {
                            out.push_str(&cur.style.render(&cur.text));
                            for seq in &active {
                                out.push_str(seq);
                            }
                            open = None;
                        }
                        continue;
                    }
                    while next < spans.len() && spans[next].range.start < plain {
                        next += 1;
                    }
                    match spans.get(next) {
                        Some(span) if span.range.start < plain + rest.len() => {
                            let lead = span.range.start - plain;
                            out.push_str(&rest[..lead]);
                            plain += lead;
                            rest = &rest[lead..];
                            if !active.is_empty() {
                                out.push_str(RESET);
                            }
                            open = Some(Open {
                                end: span.range.end,
                                style: span.style,
                                text: String::with_capacity(span.range.len()),
                            });
                            next += 1;
                        }
                        _ => {
                            out.push_str(rest);
                            plain += rest.len();
                            rest = "";
                        }
                    }
                }
            }
        }
    }
    if let Some(cur) = open {
        out.push_str(&cur.style.render(&cur.text));
        for seq in &active {
            out.push_str(seq);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RED: &str = "\x1b[31m";

    fn hl(range: Range<usize>, style: &StyleToken) -> Highlight {
        Highlight::new(range, style.clone())
    }

    fn spans<'a>(h: &'a [Highlight]) -> Vec<HighlightSpan<'a>> {
        clip(h, 0..usize::MAX)
    }

    #[test]
    fn plain_fragment_single_highlight() {
        let s = StyleToken::new(|t| format!("[{t}]"));
        let h = vec![hl(6..11, &s)];
        assert_eq!(overlay("hello world", &spans(&h)), "hello [world]");
    }

    #[test]
    fn resumes_base_style_after_highlight() {
        let s = StyleToken::new(|t| format!("[{t}]"));
        let h = vec![hl(1..2, &s)];
        let frag = format!("{RED}abc{RESET}");
        assert_eq!(
            overlay(&frag, &spans(&h)),
            format!("{RED}a{RESET}[b]{RED}c{RESET}")
        );
    }

    #[test]
    fn sequences_inside_highlight_update_replayed_style() {
        let s = StyleToken::new(|t| format!("[{t}]"));
        let h = vec![hl(0..4, &s)];
        let frag = format!("ab{RED}cdef{RESET}");
        assert_eq!(overlay(&frag, &spans(&h)), format!("[abcd]{RED}ef{RESET}"));
    }

    #[test]
    fn overlapping_highlights_keep_first() {
        let s = StyleToken::new(|t| format!("[{t}]"));
        let h = vec![hl(0..2, &s), hl(1..3, &s), hl(3..4, &s)];
        assert_eq!(overlay("aaaa", &spans(&h)), "[aa]a[a]");
    }

    #[test]
    fn adjacent_highlights() {
        let s = StyleToken::new(|t| format!("[{t}]"));
        let h = vec![hl(0..1, &s), hl(1..2, &s)];
        assert_eq!(overlay("xy", &spans(&h)), "[x][y]");
    }

    #[test]
    fn multibyte_text() {
        let s = StyleToken::new(|t| format!("[{t}]"));
        let plain = "a界b";
        let h = vec![hl(1..1 + '界'.len_utf8(), &s)];
        assert_eq!(overlay(plain, &spans(&h)), "a[界]b");
    }

    #[test]
    fn clip_rebases_and_trims() {
        let s = StyleToken::sgr("7");
        let h = vec![hl(0..3, &s), hl(4..8, &s), hl(9..12, &s), hl(20..22, &s)];
        let clipped = clip(&h, 5..10);
        let ranges: Vec<_> = clipped.iter().map(|c| c.range.clone()).collect();
        assert_eq!(ranges, vec![0..3, 4..5]);
    }

    #[test]
    fn clip_finds_highlight_starting_before_window() {
        let s = StyleToken::sgr("7");
        let h = vec![hl(0..2, &s), hl(2..9, &s)];
        let ranges: Vec<_> = clip(&h, 5..7).iter().map(|c| c.range.clone()).collect();
        assert_eq!(ranges, vec![0..2]);
    }

    #[test]
    fn clip_keeps_long_highlight_before_short_ones() {
        let s = StyleToken::sgr("7");
        let h = vec![hl(0..10, &s), hl(1..3, &s), hl(4..5, &s)];
        let ranges: Vec<_> = clip(&h, 6..9).iter().map(|c| c.range.clone()).collect();
        assert_eq!(ranges, vec![0..3]);
        let ranges: Vec<_> = clip(&h, 2..5).iter().map(|c| c.range.clone()).collect();
        assert_eq!(ranges, vec![0..3, 0..1, 2..3]);
    }

    #[test]
    fn many_single_char_highlights_stay_linear() {
        let s = StyleToken::new(|t| t.to_uppercase());
        let line = "a".repeat(20_000);
        let h: Vec<_> = (0..line.len()).map(|i| hl(i..i + 1, &s)).collect();
        let out = overlay(&line, &spans(&h));
        assert_eq!(out, "A".repeat(20_000));
    }
}

//! Continuation markers.
//!
//! A marker overwrites the first or last display columns of a styled fragment
//! to signal content beyond that edge. Replacement is counted in columns and
//! always covers whole glyphs (a glyph plus its trailing zero-width marks).
//! When glyph boundaries do not line up with the marker width, the marker is
//! shrunk by the smallest amount that makes it fit; when even the first glyph
//! is wider than the marker, that glyph is replaced and the gap padded with
//! spaces. The fragment's display width never changes. Style sequences stay
//! in place, so the marker inherits whatever style is active where it lands.

use crate::sgr::{self, Token};
use crate::width::{char_width, str_width};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Leading,
    Trailing,
}

/// Columns to replace given glyph widths walked inward from the edge.
fn replaced_columns(glyph_widths: impl Iterator<Item = usize>, marker_width: usize) -> usize {
    let mut covered = 0usize;
    for w in glyph_widths {
        if covered + w > marker_width {
            return if covered == 0 { w } else { covered };
        }
        covered += w;
    }
    covered
}

/// Leading characters of `marker` that fit in `columns`, space padded to exactly `columns`.
fn fit_marker(marker: &str, columns: usize) -> String {
    let mut out = String::with_capacity(columns);
    let mut used = 0usize;
    for c in marker.chars() {
        let w = char_width(c) as usize;
        if used + w > columns {
            break;
        }
        out.push(c);
        used += w;
    }
    out.extend(std::iter::repeat_n(' ', columns - used));
    out
}

fn visible_widths(fragment: &str) -> Vec<usize> {
    let mut widths = Vec::new();
    for token in sgr::tokens(fragment) {
        if let Token::Text(text) = token {
            widths.extend(
                text.chars()
                    .map(|c| char_width(c) as usize)
                    .filter(|&w| w > 0),
            );
        }
    }
    widths
}

fn overwrite(fragment: &str, marker: &str, edge: Edge) -> String {
    let marker_width = str_width(marker);
    if marker_width == 0 {
        return fragment.to_owned();
    }
    let widths = visible_widths(fragment);
    let total: usize = widths.iter().sum();
    if total == 0 {
        return fragment.to_owned();
    }
    let replace = match edge {
        Edge::Leading => replaced_columns(widths.iter().copied(), marker_width),
        Edge::Trailing => replaced_columns(widths.iter().rev().copied(), marker_width),
    };
    let fitted = fit_marker(marker, replace);
    // Characters whose start column lies in [cut_start, cut_end) are replaced.
    let (cut_start, cut_end) = match edge {
        Edge::Leading => (0, replace),
        Edge::Trailing => (total - replace, total),
    };

    let mut out = String::with_capacity(fragment.len() + fitted.len());
    let mut col = 0usize;
    let mut placed = false;
    let mut dropping = false;
    for token in sgr::tokens(fragment) {
        match token {
            Token::Sequence(seq) => out.push_str(seq),
            Token::Text(text) => {
                for c in text.chars() {
                    let w = char_width(c) as usize;
                    if w == 0 {
                        // Zero-width marks follow the fate of their glyph.
                        if dropping || (!placed && edge == Edge::Leading) {
                            continue;
                        }
                        out.push(c);
                        continue;
                    }
                    let replaced = col >= cut_start && col < cut_end;
                    col += w;
                    if replaced {
                        if !placed {
                            out.push_str(&fitted);
                            placed = true;
                        }
                        dropping = true;
                    } else {
                        dropping = false;
                        out.push(c);
                    }
                }
            }
        }
    }
    out
}

/// Overwrite the first columns of `fragment` with `marker`.
pub fn overwrite_leading(fragment: &str, marker: &str) -> String {
    overwrite(fragment, marker, Edge::Leading)
}

/// Overwrite the last columns of `fragment` with `marker`.
pub fn overwrite_trailing(fragment: &str, marker: &str) -> String {
    overwrite(fragment, marker, Edge::Trailing)
}

//! Property-based tests for the style codec and the sparse width index.

use core_text::sgr;
use core_text::{IndexTuning, WidthIndex, char_width};
use proptest::prelude::*;

fn plain_line() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec!['a', 'Z', ' ', '界', '😀', '\u{0301}', '\u{200D}', 'é']),
        0..80,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

// Text interleaved with well-formed sequences and the odd malformed fragment.
fn styled_line() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            4 => plain_line(),
            1 => Just("\x1b[31m".to_string()),
            1 => Just("\x1b[1;4m".to_string()),
            1 => Just("\x1b[0m".to_string()),
            1 => Just("\x1b[m".to_string()),
            1 => Just("\x1b[3".to_string()),
        ],
        0..8,
    )
    .prop_map(|parts| parts.concat())
}

fn sparse(every: usize) -> IndexTuning {
    IndexTuning {
        dense_threshold: 0,
        dense_sparsity: 1,
        sparsity: every,
    }
}

proptest! {
    #[test]
    fn sparse_and_dense_lookups_agree(line in plain_line(), every in 2usize..12) {
        let dense = WidthIndex::build(&line, &IndexTuning::default());
        let sparse = WidthIndex::build(&line, &sparse(every));
        prop_assert_eq!(dense.width(), sparse.width());
        for idx in 0..=dense.char_count() {
            prop_assert_eq!(dense.column_of_char(idx), sparse.column_of_char(idx));
            prop_assert_eq!(dense.byte_of_char(&line, idx), sparse.byte_of_char(&line, idx));
        }
        for column in 0..=dense.width() + 1 {
            prop_assert_eq!(dense.char_at_column(column), sparse.char_at_column(column));
        }
        for (byte, _) in line.char_indices() {
            prop_assert_eq!(dense.column_at_byte(&line, byte), sparse.column_at_byte(&line, byte));
        }
    }

    #[test]
    fn width_matches_char_widths(line in plain_line()) {
        let idx = WidthIndex::build(&line, &IndexTuning::default());
        let expected: usize = line.chars().map(|c| char_width(c) as usize).sum();
        prop_assert_eq!(idx.width(), expected);
        prop_assert_eq!(idx.char_count(), line.chars().count());
    }

    #[test]
    fn char_at_column_lands_on_glyph_start(line in plain_line(), column in 1usize..120) {
        let idx = WidthIndex::build(&line, &IndexTuning::default());
        let at = idx.char_at_column(column);
        prop_assert!(at == idx.char_count() || idx.char_width(at) > 0);
        prop_assert!(at == idx.char_count() || idx.column_of_char(at) >= column);
    }

    #[test]
    fn stripping_accounts_for_every_byte(s in styled_line()) {
        let plain = sgr::strip_sequences(&s);
        let sequence_bytes: usize = sgr::find_sequence_ranges(&s).iter().map(|r| r.len()).sum();
        prop_assert_eq!(plain.len() + sequence_bytes, s.len());
    }

    #[test]
    fn reapply_preserves_plain_slice(s in styled_line(), a in 0usize..200, b in 0usize..200) {
        let plain = sgr::strip_sequences(&s).into_owned();
        let bounds: Vec<usize> = plain
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(plain.len()))
            .collect();
        let lo = bounds[a % bounds.len()].min(bounds[b % bounds.len()]);
        let hi = bounds[a % bounds.len()].max(bounds[b % bounds.len()]);
        let sequences = sgr::scan(&s);
        let styled = sgr::reapply(&s, &plain[lo..hi], lo, &sequences);
        let stripped_styled = sgr::strip_sequences(&styled);
        prop_assert_eq!(stripped_styled.as_ref(), &plain[lo..hi]);
        let simplified = sgr::simplify(&styled);
        let stripped_simplified = sgr::strip_sequences(&simplified);
        prop_assert_eq!(stripped_simplified.as_ref(), &plain[lo..hi]);
    }
}

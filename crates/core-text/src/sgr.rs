//! Style-sequence (SGR) codec.
//!
//! Recognised form: `ESC '[' [0-9;]* 'm'`. Anything else that starts with ESC
//! is not a style sequence and is treated as literal text, including
//! unterminated sequences at the end of a line.
//!
//! Contract:
//! - `scan` reports sequences in order, non-overlapping, each with the count of
//!   plain bytes preceding it (`plain_offset`).
//! - `len(plain) + sum(sequence lengths) == len(content)` for every input.
//! - `reapply` never lets a non-reset sequence stay open past the end of the
//!   slice it produces.

use std::borrow::Cow;
use std::ops::Range;

const ESC: u8 = 0x1b;

/// Canonical reset sequence appended when a slice would otherwise leak style.
pub const RESET: &str = "\x1b[0m";

/// Length of the style sequence starting at `pos`, if one starts there.
#[inline]
fn sequence_len(bytes: &[u8], pos: usize) -> Option<usize> {
    if bytes.get(pos) != Some(&ESC) || bytes.get(pos + 1) != Some(&b'[') {
        return None;
    }
    let mut end = pos + 2;
    while end < bytes.len() && (bytes[end].is_ascii_digit() || bytes[end] == b';') {
        end += 1;
    }
    if bytes.get(end) == Some(&b'm') {
        Some(end + 1 - pos)
    } else {
        None
    }
}

/// Whether a complete style sequence clears all attributes (`ESC[m`, `ESC[0m`, `ESC[;00m`).
pub fn is_reset(seq: &str) -> bool {
    let Some(params) = seq
        .strip_prefix("\x1b[")
        .and_then(|rest| rest.strip_suffix('m'))
    else {
        return false;
    };
    params.bytes().all(|b| b == b'0' || b == b';')
}

/// A piece of styled text: either one complete style sequence or a maximal run
/// of literal (plain) bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Sequence(&'a str),
    Text(&'a str),
}

/// Iterator over the [`Token`]s of a styled string.
pub struct Tokens<'a> {
    s: &'a str,
    pos: usize,
}

/// Split a styled string into sequence and text tokens.
pub fn tokens(s: &str) -> Tokens<'_> {
    Tokens { s, pos: 0 }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let bytes = self.s.as_bytes();
        let start = self.pos;
        if start >= bytes.len() {
            return None;
        }
        if let Some(n) = sequence_len(bytes, start) {
            self.pos += n;
            return Some(Token::Sequence(&self.s[start..start + n]));
        }
        // A stray ESC here is literal; step past it so the scan always advances.
        let mut end = start + 1;
        while end < bytes.len() {
            match bytes[end..].iter().position(|&b| b == ESC) {
                None => end = bytes.len(),
                Some(p) => {
                    end += p;
                    if sequence_len(bytes, end).is_some() {
                        break;
                    }
                    end += 1;
                }
            }
        }
        // ESC is ASCII, so every cut above lands on a char boundary.
        self.pos = end;
        Some(Token::Text(&self.s[start..end]))
    }
}

/// One style sequence located inside styled content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSequence {
    /// Byte range within the styled content.
    pub range: Range<usize>,
    /// Number of plain bytes that precede the sequence.
    pub plain_offset: usize,
    pub reset: bool,
}

impl StyleSequence {
    pub fn text<'a>(&self, content: &'a str) -> &'a str {
        &content[self.range.clone()]
    }
}

/// Byte ranges of every style sequence in `s`, in order.
pub fn find_sequence_ranges(s: &str) -> Vec<Range<usize>> {
    scan(s).into_iter().map(|seq| seq.range).collect()
}

/// Locate every style sequence together with its position in plain coordinates.
pub fn scan(s: &str) -> Vec<StyleSequence> {
    let mut out = Vec::new();
    let mut styled = 0usize;
    let mut plain = 0usize;
    for token in tokens(s) {
        match token {
            Token::Sequence(seq) => {
                out.push(StyleSequence {
                    range: styled..styled + seq.len(),
                    plain_offset: plain,
                    reset: is_reset(seq),
                });
                styled += seq.len();
            }
            Token::Text(text) => {
                styled += text.len();
                plain += text.len();
            }
        }
    }
    out
}

/// Remove every style sequence, leaving literal text (including malformed
/// escape fragments) untouched.
pub fn strip_sequences(s: &str) -> Cow<'_, str> {
    if !s.as_bytes().contains(&ESC) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len());
    for token in tokens(s) {
        if let Token::Text(text) = token {
            out.push_str(text);
        }
    }
    Cow::Owned(out)
}

/// Tracks whether a non-reset sequence is open so resets are only emitted when
/// they change something.
struct Emitter {
    out: String,
    open: bool,
}

impl Emitter {
    fn sequence(&mut self, seq: &str, reset: bool) {
        if reset {
            if self.open {
                self.out.push_str(seq);
                self.open = false;
            }
        } else {
            self.out.push_str(seq);
            self.open = true;
        }
    }
}

/// Re-insert style sequences into a plain slice.
///
/// `sliced_plain` is `plain[slice_offset..slice_offset + sliced_plain.len()]`
/// and `sequences` is the output of [`scan`] over `original`. Every sequence
/// whose plain offset is at or before a given output position is replayed in
/// order; sequences positioned before the slice are collapsed to those after
/// the last reset. Consecutive resets merge, and a trailing reset is appended
/// when a style is still open at the end.
pub fn reapply(
    original: &str,
    sliced_plain: &str,
    slice_offset: usize,
    sequences: &[StyleSequence],
) -> String {
    let slice_end = slice_offset + sliced_plain.len();
    let before = sequences.partition_point(|seq| seq.plain_offset <= slice_offset);
    let prefix_start = sequences[..before]
        .iter()
        .rposition(|seq| seq.reset)
        .map_or(0, |i| i + 1);

    let mut emit = Emitter {
        out: String::with_capacity(sliced_plain.len() + 16),
        open: false,
    };
    for seq in &sequences[prefix_start..before] {
        emit.sequence(seq.text(original), seq.reset);
    }

    let mut cursor = 0usize;
    for seq in sequences[before..]
        .iter()
        .take_while(|seq| seq.plain_offset <= slice_end)
    {
        let rel = seq.plain_offset - slice_offset;
        emit.out.push_str(&sliced_plain[cursor..rel]);
        cursor = rel;
        emit.sequence(seq.text(original), seq.reset);
    }
    emit.out.push_str(&sliced_plain[cursor..]);
    if emit.open {
        emit.out.push_str(RESET);
    }
    emit.out
}

/// Collapse style no-ops: sequences overridden by a later reset before any
/// text, resets while nothing is open, and sequences left dangling after the
/// last text. A reset is appended if style would otherwise leak.
pub fn simplify(s: &str) -> String {
    if !s.as_bytes().contains(&ESC) {
        return s.to_owned();
    }
    let mut out = String::with_capacity(s.len());
    let mut pending: Vec<&str> = Vec::new();
    let mut pending_reset: Option<&str> = None;
    let mut open = false;
    for token in tokens(s) {
        match token {
            Token::Sequence(seq) if is_reset(seq) => {
                pending.clear();
                pending_reset = Some(seq);
            }
            Token::Sequence(seq) => pending.push(seq),
            Token::Text(text) => {
                if let Some(reset) = pending_reset.take() {
                    if open {
                        out.push_str(reset);
                        open = false;
                    }
                }
                for seq in pending.drain(..) {
                    out.push_str(seq);
                    open = true;
                }
                out.push_str(text);
            }
        }
    }
    if open {
        out.push_str(pending_reset.unwrap_or(RESET));
    }
    out
}

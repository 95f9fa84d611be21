//! Sparse cumulative width index over a plain (unstyled) line.
//!
//! The index keeps the per-character width table packed at 2 bits per entry
//! and samples `(cumulative width, byte offset)` every `sparsity` characters.
//! Any exact offset is rebuilt from the nearest sample with a local scan of at
//! most `sparsity - 1` characters.
//!
//! Invariants:
//! * Sample `k` describes character `k * sparsity`; sample 0 is `(0, 0)` for any
//!   non-empty line.
//! * Sampled cumulative widths are non-decreasing.
//! * The index never owns the text. Byte-oriented queries take the same
//!   `plain` string the index was built from; passing a different string is a
//!   caller bug.

use crate::packed::PackedWidths;
use crate::width::char_width;

/// Sampling knob trading index memory against lookup scan length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexTuning {
    /// Lines whose plain byte length is at or below this use `dense_sparsity`.
    pub dense_threshold: usize,
    pub dense_sparsity: usize,
    pub sparsity: usize,
}

impl IndexTuning {
    pub const DEFAULT_DENSE_THRESHOLD: usize = 1000;
    pub const DEFAULT_DENSE_SPARSITY: usize = 1;
    pub const DEFAULT_SPARSITY: usize = 10;

    /// Sampling interval for a line of `plain_len` bytes (never 0).
    pub fn sparsity_for(&self, plain_len: usize) -> usize {
        let s = if plain_len <= self.dense_threshold {
            self.dense_sparsity
        } else {
            self.sparsity
        };
        s.max(1)
    }
}

impl Default for IndexTuning {
    fn default() -> Self {
        Self {
            dense_threshold: Self::DEFAULT_DENSE_THRESHOLD,
            dense_sparsity: Self::DEFAULT_DENSE_SPARSITY,
            sparsity: Self::DEFAULT_SPARSITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sample {
    width: usize, // cumulative width of all preceding characters
    byte: usize,  // byte offset of the sampled character
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidthIndex {
    widths: PackedWidths,
    samples: Vec<Sample>,
    sparsity: usize,
    total_width: usize,
    plain_len: usize,
}

impl WidthIndex {
    pub fn build(plain: &str, tuning: &IndexTuning) -> Self {
        let sparsity = tuning.sparsity_for(plain.len());
        let mut widths = PackedWidths::with_capacity(plain.len());
        let mut samples = Vec::with_capacity(plain.len() / sparsity + 1);
        let mut cumulative = 0usize;
        for (i, (byte, c)) in plain.char_indices().enumerate() {
            if i % sparsity == 0 {
                samples.push(Sample {
                    width: cumulative,
                    byte,
                });
            }
            let w = char_width(c);
            widths.push(w);
            cumulative += w as usize;
        }
        Self {
            widths,
            samples,
            sparsity,
            total_width: cumulative,
            plain_len: plain.len(),
        }
    }

    /// Total display width of the line.
    pub fn width(&self) -> usize {
        self.total_width
    }

    pub fn char_count(&self) -> usize {
        self.widths.len()
    }

    pub fn sparsity(&self) -> usize {
        self.sparsity
    }

    pub fn char_width(&self, idx: usize) -> u8 {
        self.widths.get(idx)
    }

    fn check_char(&self, idx: usize) {
        assert!(
            idx <= self.char_count(),
            "character index {idx} past end (count {})",
            self.char_count()
        );
    }

    /// Display column at which character `idx` starts (`idx == char_count` is the line end).
    pub fn column_of_char(&self, idx: usize) -> usize {
        self.check_char(idx);
        if idx == self.char_count() {
            return self.total_width;
        }
        let k = idx / self.sparsity;
        let mut col = self.samples[k].width;
        for i in k * self.sparsity..idx {
            col += self.widths.get(i) as usize;
        }
        col
    }

    /// Byte offset of character `idx` within `plain`.
    pub fn byte_of_char(&self, plain: &str, idx: usize) -> usize {
        self.check_char(idx);
        debug_assert_eq!(plain.len(), self.plain_len);
        if idx == self.char_count() {
            return self.plain_len;
        }
        let k = idx / self.sparsity;
        let base = self.samples[k].byte;
        let step = idx - k * self.sparsity;
        base + plain[base..]
            .chars()
            .take(step)
            .map(char::len_utf8)
            .sum::<usize>()
    }

    /// Index of the character starting at `byte`. `byte` must be a character
    /// boundary of `plain` and no greater than its length.
    pub fn char_at_byte(&self, plain: &str, byte: usize) -> usize {
        assert!(
            byte <= self.plain_len && plain.is_char_boundary(byte),
            "byte offset {byte} is not a character boundary (len {})",
            self.plain_len
        );
        if byte == self.plain_len {
            return self.char_count();
        }
        let k = self.samples.partition_point(|s| s.byte <= byte) - 1;
        let mut idx = k * self.sparsity;
        let mut b = self.samples[k].byte;
        for c in plain[b..].chars() {
            if b >= byte {
                break;
            }
            b += c.len_utf8();
            idx += 1;
        }
        idx
    }

    /// Display column of the character starting at `byte`.
    pub fn column_at_byte(&self, plain: &str, byte: usize) -> usize {
        self.column_of_char(self.char_at_byte(plain, byte))
    }

    /// First character starting at or after `column`.
    ///
    /// For `column > 0`, zero-width characters at the resolved position belong
    /// to the preceding glyph and are skipped, so the result is always a glyph
    /// start (or the line end). A column falling inside a double-width glyph
    /// resolves to the glyph after it.
    pub fn char_at_column(&self, column: usize) -> usize {
        let n = self.char_count();
        if column == 0 || n == 0 {
            return 0;
        }
        let k = self.samples.partition_point(|s| s.width < column) - 1;
        let mut idx = k * self.sparsity;
        let mut col = self.samples[k].width;
        while idx < n && col < column {
            col += self.widths.get(idx) as usize;
            idx += 1;
        }
        while idx < n && self.widths.get(idx) == 0 {
            idx += 1;
        }
        idx
    }

    /// Approximate heap footprint of the index.
    pub fn heap_bytes(&self) -> usize {
        self.widths.heap_bytes() + self.samples.capacity() * std::mem::size_of::<Sample>()
    }
}

//! Two-bit packed width table.
//!
//! Stores one width per character in 2 bits (values 0..=3), 32 entries per
//! `u64` word. Long lines keep a quarter-byte per character instead of a full
//! word.

use crate::width::MAX_CHAR_WIDTH;

const BITS: usize = 2;
const PER_WORD: usize = u64::BITS as usize / BITS;
const MASK: u64 = (1 << BITS) - 1;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedWidths {
    words: Vec<u64>,
    len: usize,
}

impl PackedWidths {
    pub fn with_capacity(entries: usize) -> Self {
        Self {
            words: Vec::with_capacity(entries.div_ceil(PER_WORD)),
            len: 0,
        }
    }

    /// Append a width, clamping anything above the 2-bit range.
    pub fn push(&mut self, width: u8) {
        let w = width.min(MAX_CHAR_WIDTH) as u64;
        let slot = self.len % PER_WORD;
        if slot == 0 {
            self.words.push(0);
        }
        let last = self.words.len() - 1;
        self.words[last] |= w << (slot * BITS);
        self.len += 1;
    }

    /// Width at `idx`. Panics when `idx` is past the end.
    #[inline]
    pub fn get(&self, idx: usize) -> u8 {
        assert!(
            idx < self.len,
            "packed width index {idx} out of range (len {})",
            self.len
        );
        let word = self.words[idx / PER_WORD];
        ((word >> ((idx % PER_WORD) * BITS)) & MASK) as u8
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Heap bytes held by the table.
    pub fn heap_bytes(&self) -> usize {
        self.words.capacity() * std::mem::size_of::<u64>()
    }
}

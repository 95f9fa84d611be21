//! Renderable items: styled lines that can be windowed horizontally.
//!
//! A [`SingleItem`] wraps one styled line and its width index. Composites
//! share leaf items by `Arc`:
//! * [`MultiItem`] joins leaves end to end.
//! * [`ConcatItem`] does the same but keeps a pinned prefix at column 0.
//! * [`MultiLineItem`] stacks leaves as separate lines and cannot be taken.
//!
//! [`Item`] is the closed sum over the four. Every item is immutable once
//! built and can be read from any number of threads.
//!
//! `take(column, width, marker, highlights)` is the rendering entry point.
//! Highlights come from [`highlights_from_matches`] over the result of exact or
//! regex match extraction.

pub mod error;
pub mod item;
pub mod matches;
pub mod multi;
pub mod multiline;
mod row;
pub mod single;
mod slice;
pub mod wrap;

pub use error::ItemError;
pub use item::Item;
pub use matches::{Match, highlights_from_matches};
pub use multi::{ConcatItem, MultiItem};
pub use multiline::MultiLineItem;
pub use single::SingleItem;
pub use wrap::wrapped_lines;

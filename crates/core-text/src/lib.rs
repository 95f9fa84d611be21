//! Text primitives for styled line layout.
//!
//! Everything here is a pure function over `&str` or an immutable table built
//! once per line:
//! * [`width`]: per-character display width (the only width authority).
//! * [`sgr`]: find, strip, re-insert and simplify embedded style sequences.
//! * [`packed`] / [`width_index`]: 2-bit width table plus sparse cumulative
//!   index for column <-> character <-> byte lookups.
//! * [`highlight`]: single-pass highlight overlay on styled fragments.
//! * [`marker`]: continuation markers that overwrite edge columns.
//! * [`style`]: opaque host style tokens.

pub mod highlight;
pub mod marker;
pub mod packed;
pub mod sgr;
pub mod style;
pub mod width;
pub mod width_index;

// Re-export the types callers reach for most.
pub use highlight::{Highlight, HighlightSpan};
pub use style::StyleToken;
pub use width::{char_width, str_width};
pub use width_index::{IndexTuning, WidthIndex};

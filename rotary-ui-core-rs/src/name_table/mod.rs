//! Sorted views over the engine's effect and palette name tables.
//!
//! The LED engine keeps its effect and palette names in flash as a single
//! packed JSON-style array per table:
//!
//! ```text
//! ["Solid","Blink","Breathe","Wipe", ...]
//! ```
//!
//! Effects and palettes are addressed by their position in that array (the
//! **raw id**). The encoder UI presents them alphabetically instead, so this
//! module builds two things once at startup:
//!
//! - [`NameTable`] — byte offsets of every name inside the blob. Names are
//!   read in place and end at the next `"`.
//! - [`AlphaIndex`] — a permutation of raw ids in case-insensitive order.
//!   A prefix of entries is pinned in original order: "Solid" for effects
//!   ([`EFFECT_SKIP`]), "Default" plus the leading `*` meta palettes for
//!   palettes ([`palette_skip`]).
//!
//! The comparator receives the table through a closure, so there is no
//! shared "table being sorted" state.

mod error;
mod parser;
mod sort;

pub use error::NameTableError;
pub use parser::NameTable;
pub use sort::{compare_names, palette_skip, AlphaIndex, EFFECT_SKIP};

/// Largest table the UI can index. Raw ids are bytes.
pub const MAX_NAMES: usize = 256;

/// Byte that ends every name inside a table.
pub const TERMINATOR: u8 = b'"';

/// First character of palette names pinned ahead of the sorted ones.
pub const PINNED_PREFIX: u8 = b'*';

use core::fmt;

/// Errors raised while locating entries inside a packed name table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NameTableError {
    /// The engine reported more entries than [`MAX_NAMES`](super::MAX_NAMES).
    TooManyEntries { count: usize },
    /// An element between two commas had no quoted name, or had more than one.
    MalformedEntry { index: usize },
    /// A quoted name was still open when the blob ended.
    UnterminatedEntry { index: usize },
    /// The blob ended before the closing `]`.
    MissingClosingBracket,
    /// The number of elements does not match the expected count.
    CountMismatch { expected: usize, found: usize },
}

impl fmt::Display for NameTableError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NameTableError::TooManyEntries { count } => {
                write!(f, "name table too large ({} entries)", count)
            }
            NameTableError::MalformedEntry { index } => {
                write!(f, "malformed name table entry {}", index)
            }
            NameTableError::UnterminatedEntry { index } => {
                write!(f, "unterminated quote in entry {}", index)
            }
            NameTableError::MissingClosingBracket => write!(f, "name table is missing ']'"),
            NameTableError::CountMismatch { expected, found } => write!(
                f,
                "name table has {} entries, expected {}",
                found, expected
            ),
        }
    }
}

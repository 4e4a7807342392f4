use heapless::Vec;

use super::error::NameTableError;
use super::{MAX_NAMES, TERMINATOR};

/// Entry offsets into a packed, read-only name table.
///
/// The blob looks like `["Solid","Blink","Fade"]`: a bracketed,
/// comma-separated list of double-quoted names with no escaping. Names are
/// never copied out of the blob; each entry is addressed by the byte offset
/// of its first character and runs until the next `"`.
#[derive(Debug, Clone)]
pub struct NameTable<'a> {
    blob: &'a [u8],
    offsets: Vec<usize, MAX_NAMES>,
}

impl<'a> NameTable<'a> {
    /// Locate the `count` entries of `blob`.
    ///
    /// Scanning stops at the first `]` outside quotes (or a NUL byte).
    /// Anything that does not produce exactly `count` quoted entries is
    /// rejected instead of leaving a partially filled table.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotary_ui::name_table::NameTable;
    ///
    /// let table = NameTable::parse(br#"["Solid","Blink","Fade"]"#, 3).unwrap();
    /// assert_eq!(table.offsets(), &[2, 10, 18]);
    /// assert_eq!(table.name(1), Some("Blink"));
    /// ```
    pub fn parse(blob: &'a [u8], count: usize) -> Result<Self, NameTableError> {
        if count > MAX_NAMES {
            return Err(NameTableError::TooManyEntries { count });
        }

        let mut offsets: Vec<usize, MAX_NAMES> = Vec::new();
        let mut index = 0usize;
        let mut inside_quotes = false;
        let mut closed = false;

        for (pos, &byte) in blob.iter().enumerate() {
            match byte {
                0 => break,
                TERMINATOR => {
                    inside_quotes = !inside_quotes;
                    if inside_quotes {
                        // One quoted name per element.
                        if offsets.len() != index {
                            return Err(NameTableError::MalformedEntry { index });
                        }
                        if index >= count {
                            return Err(NameTableError::CountMismatch {
                                expected: count,
                                found: index + 1,
                            });
                        }
                        offsets
                            .push(pos + 1)
                            .map_err(|_| NameTableError::TooManyEntries { count: index + 1 })?;
                    }
                }
                b',' if !inside_quotes => {
                    if offsets.len() != index + 1 {
                        return Err(NameTableError::MalformedEntry { index });
                    }
                    index += 1;
                }
                b']' if !inside_quotes => {
                    closed = true;
                    break;
                }
                _ => {}
            }
        }

        if inside_quotes {
            return Err(NameTableError::UnterminatedEntry { index });
        }
        if !closed {
            return Err(NameTableError::MissingClosingBracket);
        }
        // `[]` is the only table allowed to end without a name in its last element.
        if !(offsets.is_empty() && index == 0) && offsets.len() != index + 1 {
            return Err(NameTableError::MalformedEntry { index });
        }
        if offsets.len() != count {
            return Err(NameTableError::CountMismatch {
                expected: count,
                found: offsets.len(),
            });
        }

        Ok(Self { blob, offsets })
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Byte offset of the first character of every entry, in table order.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// The blob from the start of entry `index` to the end of the table.
    ///
    /// The entry's text ends at the first `"` in the returned slice.
    pub fn entry_bytes(&self, index: usize) -> Option<&'a [u8]> {
        let offset = *self.offsets.get(index)?;
        debug_assert!(offset <= self.blob.len());
        self.blob.get(offset..)
    }

    /// Name of entry `index` without its quotes.
    ///
    /// Returns `None` if `index` is out of range or the name is not UTF-8.
    pub fn name(&self, index: usize) -> Option<&'a str> {
        let bytes = self.entry_bytes(index)?;
        let end = bytes
            .iter()
            .position(|&b| b == TERMINATOR || b == 0)
            .unwrap_or(bytes.len());
        core::str::from_utf8(&bytes[..end]).ok()
    }

    /// First byte of entry `index`, or `None` for an empty name.
    pub fn first_byte(&self, index: usize) -> Option<u8> {
        match self.entry_bytes(index)?.first() {
            Some(&TERMINATOR) | Some(&0) | None => None,
            Some(&b) => Some(b),
        }
    }
}

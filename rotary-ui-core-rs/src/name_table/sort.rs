use core::cmp::Ordering;

use heapless::Vec;

use super::parser::NameTable;
use super::{MAX_NAMES, PINNED_PREFIX, TERMINATOR};

/// Number of effects kept at the front of the effect list ("Solid").
pub const EFFECT_SKIP: usize = 1;

/// Compare two quote-terminated names, ignoring ASCII case.
///
/// Only `a..=z` are folded (to upper case), byte by byte. A name ends at
/// `"` or NUL (or the end of the slice); a name that is a strict prefix of
/// the other sorts first.
pub fn compare_names(a: &[u8], b: &[u8]) -> Ordering {
    let mut i = 0;
    loop {
        let a_val = a.get(i).copied().unwrap_or(0).to_ascii_uppercase();
        let b_val = b.get(i).copied().unwrap_or(0).to_ascii_uppercase();

        let a_end = a_val == TERMINATOR || a_val == 0;
        let b_end = b_val == TERMINATOR || b_val == 0;
        match (a_end, b_end) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }

        match a_val.cmp(&b_val) {
            Ordering::Equal => i += 1,
            other => return other,
        }
    }
}

/// Palette entries kept at the front: "Default" plus the run of
/// `*`-prefixed meta palettes that directly follows it.
pub fn palette_skip(table: &NameTable) -> usize {
    if table.is_empty() {
        return 0;
    }
    let meta = (1..table.len())
        .take_while(|&i| table.first_byte(i) == Some(PINNED_PREFIX))
        .count();
    1 + meta
}

/// Alphabetical presentation order over a [`NameTable`].
///
/// `AlphaIndex[position]` is the raw id shown at `position`. The first
/// `skip` positions map to themselves; the rest are sorted with
/// [`compare_names`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlphaIndex {
    order: Vec<u8, MAX_NAMES>,
    skip: usize,
}

impl AlphaIndex {
    /// Sort `table`, leaving the first `skip` entries in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotary_ui::name_table::{AlphaIndex, NameTable};
    ///
    /// let table = NameTable::parse(br#"["Solid","Zigzag","Blink"]"#, 3).unwrap();
    /// let index = AlphaIndex::sorted(&table, 1);
    /// assert_eq!(index.as_slice(), &[0, 2, 1]);
    /// ```
    pub fn sorted(table: &NameTable, skip: usize) -> Self {
        let count = table.len();
        let skip = skip.min(count);

        // `count <= MAX_NAMES`, so every index fits in a `u8` and in `order`.
        let order: Vec<u8, MAX_NAMES> = (0..count).map(|i| i as u8).collect();
        let mut index = Self { order, skip };

        index.order[skip..].sort_unstable_by(|&a, &b| {
            let a = table.entry_bytes(a as usize).unwrap_or(&[]);
            let b = table.entry_bytes(b as usize).unwrap_or(&[]);
            compare_names(a, b)
        });
        index
    }

    /// Number of pinned entries at the front.
    pub fn skip(&self) -> usize {
        self.skip
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Raw id shown at alphabetical `position`.
    pub fn raw_id(&self, position: usize) -> Option<u8> {
        self.order.get(position).copied()
    }

    /// Alphabetical position of `raw_id` (linear scan).
    pub fn position_of(&self, raw_id: u8) -> Option<usize> {
        self.order.iter().position(|&id| id == raw_id)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names_in_order<'a>(table: &NameTable<'a>, index: &AlphaIndex) -> heapless::Vec<&'a str, 16> {
        index
            .as_slice()
            .iter()
            .map(|&id| table.name(id as usize).unwrap())
            .collect()
    }

    // ── compare_names ────────────────────────────────────────────────

    #[test]
    fn case_is_folded() {
        assert_eq!(compare_names(b"apple\"", b"APPLE\""), Ordering::Equal);
        assert_eq!(compare_names(b"apple\"", b"Banana\""), Ordering::Less);
        assert_eq!(compare_names(b"Zigzag\"", b"apple\""), Ordering::Greater);
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(compare_names(b"Color\"", b"Color Palette\""), Ordering::Less);
        assert_eq!(compare_names(b"Color Palette\"", b"Color\""), Ordering::Greater);
    }

    #[test]
    fn only_ascii_letters_are_folded() {
        // '_' (0x5F) sits between upper and lower case; folding to upper
        // puts it after every letter.
        assert_eq!(compare_names(b"a_\"", b"az\""), Ordering::Greater);
    }

    #[test]
    fn nul_and_slice_end_terminate() {
        assert_eq!(compare_names(b"Fade\0", b"Fade\""), Ordering::Equal);
        assert_eq!(compare_names(b"Fad", b"Fade\""), Ordering::Less);
    }

    #[test]
    fn different_terminators_at_same_position_are_equal() {
        assert_eq!(compare_names(b"Fade", b"fade\""), Ordering::Equal);
        assert_eq!(compare_names(b"Fade\"", b"Fade"), Ordering::Equal);
        assert_eq!(compare_names(b"Fade\"", b"FADE\0"), Ordering::Equal);
        assert_eq!(compare_names(b"Fade\0", b"Fade X\""), Ordering::Less);
    }

    // ── AlphaIndex ───────────────────────────────────────────────────

    #[test]
    fn pinned_entry_stays_first() {
        let table = NameTable::parse(br#"["Solid","Zigzag","Apple","apple"]"#, 4).unwrap();
        let index = AlphaIndex::sorted(&table, EFFECT_SKIP);

        assert_eq!(index.raw_id(0), Some(0));
        assert_eq!(index.raw_id(3), Some(1));
        let middle = [index.raw_id(1).unwrap(), index.raw_id(2).unwrap()];
        assert!(middle == [2, 3] || middle == [3, 2]);
    }

    #[test]
    fn pinned_entry_is_not_moved_even_if_it_sorts_later() {
        let table = NameTable::parse(br#"["Solid","Blink","Android"]"#, 3).unwrap();
        let index = AlphaIndex::sorted(&table, 1);
        assert_eq!(index.as_slice(), &[0, 2, 1]);
    }

    #[test]
    fn result_is_a_sorted_permutation() {
        let table = NameTable::parse(
            br#"["Solid","Fire 2012","blink","Chase","Colorful","Color Wipe","aurora","Bpm"]"#,
            8,
        )
        .unwrap();
        let index = AlphaIndex::sorted(&table, 1);

        let mut seen = [false; 8];
        for &id in index.as_slice() {
            seen[id as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));

        assert_eq!(
            names_in_order(&table, &index).as_slice(),
            &["Solid", "aurora", "blink", "Bpm", "Chase", "Color Wipe", "Colorful", "Fire 2012"]
        );
    }

    #[test]
    fn skip_larger_than_table_is_identity() {
        let table = NameTable::parse(br#"["B","A"]"#, 2).unwrap();
        let index = AlphaIndex::sorted(&table, 5);
        assert_eq!(index.skip(), 2);
        assert_eq!(index.as_slice(), &[0, 1]);
    }

    #[test]
    fn position_of_round_trips() {
        let table = NameTable::parse(br#"["Solid","C","A","B"]"#, 4).unwrap();
        let index = AlphaIndex::sorted(&table, 1);
        for position in 0..index.len() {
            let raw = index.raw_id(position).unwrap();
            assert_eq!(index.position_of(raw), Some(position));
        }
        assert_eq!(index.position_of(9), None);
    }

    // ── palette_skip ─────────────────────────────────────────────────

    #[test]
    fn palette_skip_counts_leading_meta_palettes() {
        let table = NameTable::parse(
            br#"["Default","* Random Cycle","* Color 1","Party","* Late","Cloud"]"#,
            6,
        )
        .unwrap();
        assert_eq!(palette_skip(&table), 3);

        let index = AlphaIndex::sorted(&table, palette_skip(&table));
        assert_eq!(&index.as_slice()[..3], &[0, 1, 2]);
        // "* Late" is not in the leading run, so it is sorted ('*' < 'C').
        assert_eq!(&index.as_slice()[3..], &[4, 5, 3]);
    }

    #[test]
    fn palette_skip_without_meta_palettes() {
        let table = NameTable::parse(br#"["Default","Party","Cloud"]"#, 3).unwrap();
        assert_eq!(palette_skip(&table), 1);
    }

    #[test]
    fn palette_skip_all_meta() {
        let table = NameTable::parse(br#"["Default","* A","* B"]"#, 3).unwrap();
        assert_eq!(palette_skip(&table), 3);
        let empty = NameTable::parse(b"[]", 0).unwrap();
        assert_eq!(palette_skip(&empty), 0);
    }
}

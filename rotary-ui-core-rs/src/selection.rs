//! Alphabetical cursor over one name table (effects or palettes).

use crate::input::Direction;
use crate::name_table::{palette_skip, AlphaIndex, NameTable, NameTableError, EFFECT_SKIP};

/// Outcome of [`SelectionState::reconcile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reconciled {
    /// The cursor already pointed at the engine's id.
    InStep,
    /// The id changed elsewhere; the cursor followed it.
    Moved,
    /// The id is not in the table; the cursor was left alone.
    UnknownId,
}

/// Cursor into an [`AlphaIndex`], kept in step with the engine's raw id.
///
/// The engine stores effects and palettes by raw id and other control
/// surfaces may change them at any time. [`reconcile()`](Self::reconcile)
/// moves the cursor to wherever the engine's id now sits in the
/// alphabetical order; [`step()`](Self::step) moves it one place and
/// returns the raw id to write back.
#[derive(Debug, Clone)]
pub struct SelectionState {
    table: NameTable<'static>,
    order: AlphaIndex,
    cursor: usize,
    known_raw: u8,
}

impl SelectionState {
    /// Wrap a parsed table and its sort order. The cursor starts at 0.
    pub fn new(table: NameTable<'static>, order: AlphaIndex) -> Self {
        let known_raw = order.raw_id(0).unwrap_or(0);
        Self {
            table,
            order,
            cursor: 0,
            known_raw,
        }
    }

    /// Alphabetical position of the current selection.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Raw id at the cursor, as last written or reconciled.
    pub fn raw_id(&self) -> u8 {
        self.known_raw
    }

    pub fn order(&self) -> &AlphaIndex {
        &self.order
    }

    pub fn table(&self) -> &NameTable<'static> {
        &self.table
    }

    /// Returns `true` if the engine's id no longer matches the cursor.
    pub fn is_stale(&self, engine_raw: u8) -> bool {
        self.order.raw_id(self.cursor) != Some(engine_raw)
    }

    /// Move the cursor to `engine_raw` if it changed behind our back.
    ///
    /// An unknown id leaves the cursor where it was; the next call tries
    /// again.
    pub fn reconcile(&mut self, engine_raw: u8) -> Reconciled {
        if !self.is_stale(engine_raw) {
            self.known_raw = engine_raw;
            return Reconciled::InStep;
        }
        match self.order.position_of(engine_raw) {
            Some(position) => {
                self.cursor = position;
                self.known_raw = engine_raw;
                Reconciled::Moved
            }
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("raw id {} not found in alphabetical index", engine_raw);
                Reconciled::UnknownId
            }
        }
    }

    /// Move one place in `direction`, clamped to the table, and return the
    /// raw id now selected.
    pub fn step(&mut self, direction: Direction) -> u8 {
        let last = self.order.len().saturating_sub(1);
        self.cursor = match direction {
            Direction::Clockwise => (self.cursor + 1).min(last),
            Direction::CounterClockwise => self.cursor.saturating_sub(1),
        };
        self.known_raw = self.order.raw_id(self.cursor).unwrap_or(self.known_raw);
        self.known_raw
    }

    /// Display name of the current selection.
    pub fn current_name(&self) -> &'static str {
        self.table.name(self.known_raw as usize).unwrap_or("")
    }
}

/// Alphabetical cursors for both name tables, built once at startup.
#[derive(Debug, Clone)]
pub struct Selections {
    pub effects: SelectionState,
    pub palettes: SelectionState,
}

impl Selections {
    /// Parse and sort the effect and palette tables.
    pub fn build(
        effect_names: &'static [u8],
        effect_count: usize,
        palette_names: &'static [u8],
        palette_count: usize,
    ) -> Result<Self, NameTableError> {
        let effects = NameTable::parse(effect_names, effect_count)?;
        let effect_order = AlphaIndex::sorted(&effects, EFFECT_SKIP);

        let palettes = NameTable::parse(palette_names, palette_count)?;
        let palette_order = AlphaIndex::sorted(&palettes, palette_skip(&palettes));

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "sorted {} effects (skip {}), {} palettes (skip {})",
            effect_order.len(),
            effect_order.skip(),
            palette_order.len(),
            palette_order.skip()
        );

        Ok(Self {
            effects: SelectionState::new(effects, effect_order),
            palettes: SelectionState::new(palettes, palette_order),
        })
    }

    /// Bring both cursors in line with the engine's current ids.
    /// Returns the effect and palette outcomes, in that order.
    pub fn reconcile(&mut self, effect: u8, palette: u8) -> (Reconciled, Reconciled) {
        (self.effects.reconcile(effect), self.palettes.reconcile(palette))
    }
}

//! Optional status display driven by the encoder UI.
//!
//! The UI works without a display. When one is present, every input first
//! goes through [`Display::wake`]: if that reports the display was asleep,
//! the input only woke it and is discarded.

/// Glyph shown next to a mode overlay. Values are the glyph ids of the
/// display's icon font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Glyph {
    Sun = 1,
    SkipForward = 2,
    Fire = 3,
    CustomPalette = 4,
    PuzzlePiece = 5,
    Brush = 7,
    Contrast = 8,
    Star = 10,
    Heart = 11,
}

impl Glyph {
    pub fn id(self) -> u8 {
        self as u8
    }
}

/// Line/column of the marker that points at the value being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mark {
    pub line: u8,
    pub column: u8,
}

impl Mark {
    pub const fn new(line: u8, column: u8) -> Self {
        Self { line, column }
    }
}

/// A value the display should redraw after an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field<'a> {
    Brightness(u8),
    Speed(u8),
    Intensity(u8),
    /// Name of the selected palette.
    Palette(&'a str),
    /// Name of the selected effect.
    Effect(&'a str),
}

/// Display collaborator.
pub trait Display {
    /// Wake the display if it is asleep or dimmed.
    ///
    /// Returns `true` if it was asleep; the caller then drops the input
    /// that caused the call.
    fn wake(&mut self) -> bool;

    /// Restart the idle timer after a handled input.
    fn note_activity(&mut self);

    /// Show `text` with an optional glyph for `duration_ms`.
    fn show_overlay(&mut self, text: &str, duration_ms: u32, glyph: Option<Glyph>);

    /// Show the network details overlay for `duration_ms`.
    fn show_network_info(&mut self, title: &str, duration_ms: u32);

    /// Move (or hide, with `None`) the edit marker.
    fn set_mark_position(&mut self, mark: Option<Mark>);

    fn refresh_field(&mut self, field: Field<'_>);
}

/// Stand-in for hosts without a display. Never asleep, draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDisplay;

impl Display for NoDisplay {
    fn wake(&mut self) -> bool {
        false
    }

    fn note_activity(&mut self) {}

    fn show_overlay(&mut self, _text: &str, _duration_ms: u32, _glyph: Option<Glyph>) {}

    fn show_network_info(&mut self, _title: &str, _duration_ms: u32) {}

    fn set_mark_position(&mut self, _mark: Option<Mark>) {}

    fn refresh_field(&mut self, _field: Field<'_>) {}
}

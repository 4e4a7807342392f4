//! Which parameter the encoder is currently editing.

use crate::display::{Display, Glyph, Mark};

/// How long the mode name stays on the display after a change.
pub const MODE_OVERLAY_MS: u32 = 750;

/// Modes reachable when no display is attached.
pub const MODES_WITHOUT_DISPLAY: u8 = 4;

/// Modes reachable with a display attached.
pub const MODES_WITH_DISPLAY: u8 = 9;

/// Parameter edited by encoder rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Brightness,
    Speed,
    Intensity,
    Palette,
    Effect,
    /// Hue of the primary colour.
    Color,
    Saturation,
    Cct,
    /// Step through the configured preset range.
    Preset,
}

impl Mode {
    /// All modes in menu order.
    pub const ALL: [Mode; 9] = [
        Mode::Brightness,
        Mode::Speed,
        Mode::Intensity,
        Mode::Palette,
        Mode::Effect,
        Mode::Color,
        Mode::Saturation,
        Mode::Cct,
        Mode::Preset,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Mode at menu position `index`, if any.
    pub fn from_index(index: u8) -> Option<Mode> {
        Self::ALL.get(index as usize).copied()
    }

    /// Overlay text announcing the mode.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Brightness => "Brightness",
            Mode::Speed => "Speed",
            Mode::Intensity => "Intensity",
            Mode::Palette => "Color Palette",
            Mode::Effect => "Effect",
            Mode::Color => "Main Color",
            Mode::Saturation => "Saturation",
            Mode::Cct => "CCT",
            Mode::Preset => "Preset",
        }
    }

    pub fn glyph(self) -> Glyph {
        match self {
            Mode::Brightness => Glyph::Sun,
            Mode::Speed => Glyph::SkipForward,
            Mode::Intensity => Glyph::Fire,
            Mode::Palette => Glyph::CustomPalette,
            Mode::Effect => Glyph::PuzzlePiece,
            Mode::Color => Glyph::Brush,
            Mode::Saturation => Glyph::Contrast,
            Mode::Cct => Glyph::Star,
            Mode::Preset => Glyph::Heart,
        }
    }

    /// Where the edit marker sits on the four-line display. Modes without a
    /// value on screen hide the marker.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Mode::Brightness => Some(Mark::new(1, 0)),
            Mode::Speed => Some(Mark::new(1, 4)),
            Mode::Intensity => Some(Mark::new(1, 8)),
            Mode::Palette => Some(Mark::new(2, 0)),
            Mode::Effect => Some(Mark::new(3, 0)),
            Mode::Color | Mode::Saturation | Mode::Cct | Mode::Preset => None,
        }
    }
}

/// Mode state machine. Advances on a click, wrapping to
/// [`Mode::Brightness`].
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuController {
    mode: Mode,
}

impl Default for MenuController {
    fn default() -> Self {
        Self {
            mode: Mode::Brightness,
        }
    }
}

impl MenuController {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The mode a click would move to.
    ///
    /// Without a display only the first [`MODES_WITHOUT_DISPLAY`] modes are
    /// reachable. [`Mode::Preset`] is skipped unless a valid preset range
    /// is configured.
    pub fn next_mode(&self, display_present: bool, presets_valid: bool) -> Mode {
        let visible = if display_present {
            MODES_WITH_DISPLAY
        } else {
            MODES_WITHOUT_DISPLAY
        };
        let next = (self.mode.index() + 1) % visible;
        match Mode::from_index(next) {
            Some(Mode::Preset) if !presets_valid => Mode::Brightness,
            Some(mode) => mode,
            None => Mode::Brightness,
        }
    }

    /// Move to the next mode, announcing it on the display.
    ///
    /// If the display was asleep the click only wakes it and the mode stays
    /// put. Returns `true` if the mode changed.
    pub fn advance<D: Display>(&mut self, display: Option<&mut D>, presets_valid: bool) -> bool {
        let next = self.next_mode(display.is_some(), presets_valid);

        if let Some(display) = display {
            if display.wake() {
                return false;
            }
            display.show_overlay(next.label(), MODE_OVERLAY_MS, Some(next.glyph()));
            display.set_mark_position(next.mark());
        }

        self.mode = next;
        true
    }
}

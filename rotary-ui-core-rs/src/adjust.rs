//! One bounded edit per encoder detent, pushed into the engine.
//!
//! Every adjuster follows the same steps:
//!
//! 1. If a display is attached and [`wake()`](Display::wake) reports it was
//!    asleep, stop: the detent only woke the display.
//! 2. Compute the new value, clamped to `0..=255` (or to the table for
//!    effects and palettes).
//! 3. Write it to all active segments or only the main segment, depending
//!    on [`ParameterAdjusters::apply_to_all`].
//! 4. Announce the change through [`Engine::notify_changed`].
//! 5. Ask the display to redraw the value, where it shows one.

use core::fmt::Write;

use heapless::String;

use crate::color::hue_sat_to_rgb;
use crate::display::{Display, Field};
use crate::engine::{update_segments, Change, Engine, SegmentUpdate};
use crate::input::Direction;
use crate::menu::Mode;
use crate::selection::Selections;

/// Change per detent for all 0–255 parameters.
pub const STEP: u8 = 5;

/// Hue used until the encoder changes it.
pub const DEFAULT_HUE: u8 = 16;

/// Saturation used until the encoder changes it.
pub const DEFAULT_SATURATION: u8 = 255;

/// Highest preset number accepted from the configuration.
pub const MAX_PRESET: u8 = 250;

/// Preset range stepped through in [`Mode::Preset`]. Zero means unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PresetRange {
    pub low: u8,
    pub high: u8,
}

impl PresetRange {
    pub fn new(low: u8, high: u8) -> Self {
        Self {
            low: low.min(MAX_PRESET),
            high: high.min(MAX_PRESET),
        }
    }

    /// Both bounds set and `high > low`.
    pub fn is_valid(&self) -> bool {
        self.low > 0 && self.high > 0 && self.high > self.low
    }

    /// "Play the next preset in range" request for the command interpreter.
    ///
    /// ```
    /// use rotary_ui::adjust::PresetRange;
    /// use rotary_ui::input::Direction;
    ///
    /// let range = PresetRange::new(3, 7);
    /// assert_eq!(range.command(Direction::Clockwise).as_str(), "win&PL=~&P1=3&P2=7");
    /// assert_eq!(range.command(Direction::CounterClockwise).as_str(), "win&PL=~-&P1=3&P2=7");
    /// ```
    pub fn command(&self, direction: Direction) -> String<32> {
        let mut request = String::new();
        let sign = match direction {
            Direction::Clockwise => "",
            Direction::CounterClockwise => "-",
        };
        // At most 26 bytes: "win&PL=~-&P1=250&P2=250".
        let _ = write!(request, "win&PL=~{}&P1={}&P2={}", sign, self.low, self.high);
        request
    }
}

fn step_value(value: u8, direction: Direction) -> u8 {
    match direction {
        Direction::Clockwise => value.saturating_add(STEP),
        Direction::CounterClockwise => value.saturating_sub(STEP),
    }
}

/// The nine parameter adjusters plus the local state some of them keep
/// (hue, saturation and CCT are not read back from the engine).
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParameterAdjusters {
    /// Write segment changes to every active segment instead of only the
    /// main one.
    pub apply_to_all: bool,
    pub presets: PresetRange,
    hue: u8,
    saturation: u8,
    cct: u8,
}

impl Default for ParameterAdjusters {
    fn default() -> Self {
        Self {
            apply_to_all: true,
            presets: PresetRange::default(),
            hue: DEFAULT_HUE,
            saturation: DEFAULT_SATURATION,
            cct: 128,
        }
    }
}

impl ParameterAdjusters {
    pub fn hue(&self) -> u8 {
        self.hue
    }

    pub fn saturation(&self) -> u8 {
        self.saturation
    }

    pub fn cct(&self) -> u8 {
        self.cct
    }

    /// Seed the CCT adjuster from the engine's current value.
    pub fn set_cct(&mut self, cct: u8) {
        self.cct = cct;
    }

    /// Apply one detent in `direction` to the parameter behind `mode`.
    ///
    /// `selections` is `None` until the name tables are sorted; effect and
    /// palette edits are ignored until then. Returns `true` if the engine
    /// was touched.
    pub fn adjust<E, D>(
        &mut self,
        mode: Mode,
        direction: Direction,
        engine: &mut E,
        mut display: Option<&mut D>,
        selections: Option<&mut Selections>,
    ) -> bool
    where
        E: Engine + ?Sized,
        D: Display + ?Sized,
    {
        if let Some(display) = display.as_deref_mut() {
            if display.wake() {
                return false;
            }
            display.note_activity();
        }

        let field = match mode {
            Mode::Brightness => {
                let value = step_value(engine.brightness(), direction);
                engine.set_brightness(value);
                engine.notify_changed(Change::Brightness);
                Some(Field::Brightness(value))
            }
            Mode::Speed => {
                let value = step_value(engine.speed(), direction);
                update_segments(engine, self.apply_to_all, SegmentUpdate::Speed(value));
                engine.notify_changed(Change::Effect);
                Some(Field::Speed(value))
            }
            Mode::Intensity => {
                let value = step_value(engine.intensity(), direction);
                update_segments(engine, self.apply_to_all, SegmentUpdate::Intensity(value));
                engine.notify_changed(Change::Effect);
                Some(Field::Intensity(value))
            }
            Mode::Palette => {
                let Some(selections) = selections else {
                    return false;
                };
                let raw = selections.palettes.step(direction);
                update_segments(engine, self.apply_to_all, SegmentUpdate::Palette(raw));
                engine.notify_changed(Change::Effect);
                Some(Field::Palette(selections.palettes.current_name()))
            }
            Mode::Effect => {
                let Some(selections) = selections else {
                    return false;
                };
                let raw = selections.effects.step(direction);
                update_segments(engine, self.apply_to_all, SegmentUpdate::Effect(raw));
                engine.notify_changed(Change::Effect);
                Some(Field::Effect(selections.effects.current_name()))
            }
            Mode::Color => {
                self.hue = step_value(self.hue, direction);
                self.push_color(engine);
                None
            }
            Mode::Saturation => {
                self.saturation = step_value(self.saturation, direction);
                self.push_color(engine);
                None
            }
            Mode::Cct => {
                self.cct = step_value(self.cct, direction);
                update_segments(engine, self.apply_to_all, SegmentUpdate::Cct(self.cct));
                engine.notify_changed(Change::Color);
                None
            }
            Mode::Preset => {
                if !self.presets.is_valid() {
                    return false;
                }
                engine.apply_command(&self.presets.command(direction));
                engine.notify_changed(Change::Preset);
                None
            }
        };

        if let (Some(field), Some(display)) = (field, display) {
            display.refresh_field(field);
        }
        true
    }

    fn push_color<E: Engine + ?Sized>(&self, engine: &mut E) {
        let color = hue_sat_to_rgb(self.hue, self.saturation);
        update_segments(engine, self.apply_to_all, SegmentUpdate::PrimaryColor(color));
        engine.notify_changed(Change::Color);
    }
}

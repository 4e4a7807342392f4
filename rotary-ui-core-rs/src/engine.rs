//! The LED engine as seen from the encoder UI.
//!
//! The engine owns segments, the effect and palette tables and the colour
//! pipeline. The UI reads the current selection from it, writes changes
//! back through [`Engine::update_segment`] and then calls
//! [`Engine::notify_changed`] so network sync and other interfaces pick
//! the change up.

use rgb::RGB8;

/// A single field written to one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentUpdate {
    /// Effect by raw id.
    Effect(u8),
    Speed(u8),
    Intensity(u8),
    /// Palette by raw id.
    Palette(u8),
    /// Primary colour; the engine keeps its own white channel.
    PrimaryColor(RGB8),
    /// Colour temperature, 0 (warm) to 255 (cold).
    Cct(u8),
}

/// What kind of change is being announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Change {
    Brightness,
    /// Effect, speed, intensity or palette.
    Effect,
    /// Primary colour or CCT.
    Color,
    /// On/off toggle.
    Power,
    /// A preset command was issued.
    Preset,
}

/// Host-owned LED engine state.
///
/// Raw ids are positions in the engine's unsorted name tables.
pub trait Engine {
    /// `true` while the strip is busy; the UI skips its loop then.
    fn is_updating(&self) -> bool {
        false
    }

    fn brightness(&self) -> u8;
    fn set_brightness(&mut self, value: u8);

    fn is_on(&self) -> bool;
    fn set_on(&mut self, on: bool);

    /// Raw id of the main segment's effect.
    fn effect(&self) -> u8;
    /// Raw id of the main segment's palette.
    fn palette(&self) -> u8;
    fn speed(&self) -> u8;
    fn intensity(&self) -> u8;
    /// Colour temperature of the main segment.
    fn cct(&self) -> u8;

    /// Packed effect names, e.g. `["Solid","Blink",...]`.
    fn effect_names(&self) -> &'static [u8];
    fn effect_count(&self) -> usize;
    /// Packed palette names, e.g. `["Default","* Color 1",...]`.
    fn palette_names(&self) -> &'static [u8];
    fn palette_count(&self) -> usize;

    fn segment_count(&self) -> usize;
    fn is_segment_active(&self, id: usize) -> bool;
    fn main_segment(&self) -> usize;
    fn update_segment(&mut self, id: usize, update: SegmentUpdate);

    /// Propagate a direct change to the rest of the firmware.
    fn notify_changed(&mut self, change: Change);

    /// Hand a request string to the host's command interpreter.
    fn apply_command(&mut self, command: &str);
}

/// Write `update` to every active segment, or only to the main segment.
pub fn update_segments<E: Engine + ?Sized>(engine: &mut E, all_segments: bool, update: SegmentUpdate) {
    if all_segments {
        for id in 0..engine.segment_count() {
            if engine.is_segment_active(id) {
                engine.update_segment(id, update);
            }
        }
    } else {
        let main = engine.main_segment();
        engine.update_segment(main, update);
    }
}

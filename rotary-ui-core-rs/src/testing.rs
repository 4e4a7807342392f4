//! Test doubles shared by the unit tests.

use core::cell::Cell;

use heapless::{String, Vec};
use rgb::RGB8;

use crate::display::{Display, Field, Glyph, Mark};
use crate::engine::{Change, Engine, SegmentUpdate};
use crate::input::tests::FakePin;
use crate::pins::{PinManager, PinOwner};
use crate::selection::Selections;

pub(crate) static EFFECT_NAMES: &[u8] = br#"["Solid","Wipe","Blink","Fade","Android"]"#;
pub(crate) static PALETTE_NAMES: &[u8] =
    br#"["Default","* Random Cycle","* Color 1","Party","Cloud"]"#;

// ── Engine ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub(crate) struct FakeSegment {
    pub active: bool,
    pub effect: u8,
    pub palette: u8,
    pub speed: u8,
    pub intensity: u8,
    pub color: RGB8,
    pub cct: u8,
}

impl Default for FakeSegment {
    fn default() -> Self {
        Self {
            active: true,
            effect: 0,
            palette: 0,
            speed: 128,
            intensity: 128,
            color: RGB8::default(),
            cct: 128,
        }
    }
}

/// Three-segment engine with the small name tables above.
pub(crate) struct FakeEngine {
    pub updating: bool,
    pub brightness: u8,
    pub on: bool,
    pub segments: [FakeSegment; 3],
    pub main: usize,
    pub effect_names: &'static [u8],
    pub changes: Vec<Change, 64>,
    pub commands: Vec<String<32>, 8>,
}

impl Default for FakeEngine {
    fn default() -> Self {
        Self {
            updating: false,
            brightness: 128,
            on: true,
            segments: [FakeSegment::default(); 3],
            main: 0,
            effect_names: EFFECT_NAMES,
            changes: Vec::new(),
            commands: Vec::new(),
        }
    }
}

impl FakeEngine {
    pub fn selections(&self) -> Selections {
        Selections::build(EFFECT_NAMES, 5, PALETTE_NAMES, 5).unwrap()
    }

    fn main_segment_ref(&self) -> &FakeSegment {
        &self.segments[self.main]
    }
}

impl Engine for FakeEngine {
    fn is_updating(&self) -> bool {
        self.updating
    }

    fn brightness(&self) -> u8 {
        self.brightness
    }

    fn set_brightness(&mut self, value: u8) {
        self.brightness = value;
    }

    fn is_on(&self) -> bool {
        self.on
    }

    fn set_on(&mut self, on: bool) {
        self.on = on;
    }

    fn effect(&self) -> u8 {
        self.main_segment_ref().effect
    }

    fn palette(&self) -> u8 {
        self.main_segment_ref().palette
    }

    fn speed(&self) -> u8 {
        self.main_segment_ref().speed
    }

    fn intensity(&self) -> u8 {
        self.main_segment_ref().intensity
    }

    fn cct(&self) -> u8 {
        self.main_segment_ref().cct
    }

    fn effect_names(&self) -> &'static [u8] {
        self.effect_names
    }

    fn effect_count(&self) -> usize {
        5
    }

    fn palette_names(&self) -> &'static [u8] {
        PALETTE_NAMES
    }

    fn palette_count(&self) -> usize {
        5
    }

    fn segment_count(&self) -> usize {
        self.segments.len()
    }

    fn is_segment_active(&self, id: usize) -> bool {
        self.segments[id].active
    }

    fn main_segment(&self) -> usize {
        self.main
    }

    fn update_segment(&mut self, id: usize, update: SegmentUpdate) {
        let segment = &mut self.segments[id];
        match update {
            SegmentUpdate::Effect(v) => segment.effect = v,
            SegmentUpdate::Speed(v) => segment.speed = v,
            SegmentUpdate::Intensity(v) => segment.intensity = v,
            SegmentUpdate::Palette(v) => segment.palette = v,
            SegmentUpdate::PrimaryColor(c) => segment.color = c,
            SegmentUpdate::Cct(v) => segment.cct = v,
        }
    }

    fn notify_changed(&mut self, change: Change) {
        let _ = self.changes.push(change);
    }

    fn apply_command(&mut self, command: &str) {
        let mut owned = String::new();
        let _ = owned.push_str(command);
        let _ = self.commands.push(owned);
    }
}

// ── Display ──────────────────────────────────────────────────────────────

/// Records what the UI asked the display to show.
#[derive(Default)]
pub(crate) struct FakeDisplay {
    pub asleep: bool,
    pub activity: u32,
    pub overlay: Option<(String<32>, u32, Option<Glyph>)>,
    pub network_info: Option<(String<32>, u32)>,
    pub mark: Option<Option<Mark>>,
    pub brightness: Option<u8>,
    pub speed: Option<u8>,
    pub intensity: Option<u8>,
    pub palette: Option<String<32>>,
    pub effect: Option<String<32>>,
}

fn owned(text: &str) -> String<32> {
    let mut s = String::new();
    let _ = s.push_str(text);
    s
}

impl Display for FakeDisplay {
    fn wake(&mut self) -> bool {
        core::mem::replace(&mut self.asleep, false)
    }

    fn note_activity(&mut self) {
        self.activity += 1;
    }

    fn show_overlay(&mut self, text: &str, duration_ms: u32, glyph: Option<Glyph>) {
        self.overlay = Some((owned(text), duration_ms, glyph));
    }

    fn show_network_info(&mut self, title: &str, duration_ms: u32) {
        self.network_info = Some((owned(title), duration_ms));
    }

    fn set_mark_position(&mut self, mark: Option<Mark>) {
        self.mark = Some(mark);
    }

    fn refresh_field(&mut self, field: Field<'_>) {
        match field {
            Field::Brightness(v) => self.brightness = Some(v),
            Field::Speed(v) => self.speed = Some(v),
            Field::Intensity(v) => self.intensity = Some(v),
            Field::Palette(name) => self.palette = Some(owned(name)),
            Field::Effect(name) => self.effect = Some(owned(name)),
        }
    }
}

// ── Pins ─────────────────────────────────────────────────────────────────

/// Levels of the three encoder lines, idle high.
pub(crate) struct Lines {
    pub a: Cell<bool>,
    pub b: Cell<bool>,
    pub sw: Cell<bool>,
}

impl Default for Lines {
    fn default() -> Self {
        Self {
            a: Cell::new(true),
            b: Cell::new(true),
            sw: Cell::new(true),
        }
    }
}

/// Pin registry over 40 pins. Pins 18, 5 and 19 read from `lines` in
/// that order; any other pin reads a line that stays high.
pub(crate) struct FakePins<'a> {
    pub lines: &'a Lines,
    pub idle: &'a Cell<bool>,
    pub owners: [Option<PinOwner>; 40],
    pub dt: u8,
    pub clk: u8,
    pub sw: u8,
}

impl<'a> FakePins<'a> {
    pub fn new(lines: &'a Lines, idle: &'a Cell<bool>) -> Self {
        Self {
            lines,
            idle,
            owners: [None; 40],
            dt: 18,
            clk: 5,
            sw: 19,
        }
    }
}

impl<'a> PinManager for FakePins<'a> {
    type Input = FakePin<'a>;

    fn allocate(&mut self, pins: &[u8], owner: PinOwner) -> bool {
        let free = pins
            .iter()
            .all(|&p| (p as usize) < self.owners.len() && self.owners[p as usize].is_none());
        if !free {
            return false;
        }
        for &p in pins {
            self.owners[p as usize] = Some(owner);
        }
        true
    }

    fn deallocate(&mut self, pin: u8, owner: PinOwner) -> bool {
        match self.owners.get_mut(pin as usize) {
            Some(slot) if *slot == Some(owner) => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    fn owner(&self, pin: u8) -> Option<PinOwner> {
        self.owners.get(pin as usize).copied().flatten()
    }

    fn input_pullup(&mut self, pin: u8) -> Option<Self::Input> {
        self.owner(pin)?;
        let level = if pin == self.dt {
            &self.lines.a
        } else if pin == self.clk {
            &self.lines.b
        } else if pin == self.sw {
            &self.lines.sw
        } else {
            self.idle
        };
        Some(FakePin { level })
    }
}

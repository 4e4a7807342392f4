//! Screen model behind the [`Display`] trait.
//!
//! [`FourLineScreen`] holds what the panel should show; it never touches
//! the bus. The refresh loop calls [`tick()`](FourLineScreen::tick) with
//! the current time, takes a [`frame()`](FourLineScreen::frame) and draws
//! it.

use rotary_ui::{Display, Field, Glyph, Mark};

use crate::layout::{fit, Line, ScreenConfig, ScreenState, ValueLines};

#[derive(Debug, Clone, PartialEq, Eq)]
enum OverlayContent {
    Label { text: Line, glyph: Option<Glyph> },
    Network { title: Line },
}

#[derive(Debug, Clone)]
struct Overlay {
    content: OverlayContent,
    shown_at: u32,
    duration_ms: u32,
}

/// Four-line status screen with timed overlays and idle sleep.
#[derive(Debug, Clone)]
pub struct FourLineScreen {
    sleep_timeout_ms: u32,
    now: u32,
    /// `None` until the first [`tick()`](Self::tick) reads the clock.
    last_activity: Option<u32>,
    asleep: bool,
    values: ValueLines,
    address: Line,
    overlay: Option<Overlay>,
}

impl FourLineScreen {
    pub fn new(config: &ScreenConfig) -> Self {
        Self {
            sleep_timeout_ms: config.sleep_timeout_ms,
            now: 0,
            last_activity: None,
            asleep: false,
            values: ValueLines::default(),
            address: Line::new(),
            overlay: None,
        }
    }

    /// Advance the clock: expire the overlay and fall asleep when idle.
    pub fn tick(&mut self, now: u32) {
        self.now = now;
        let first_tick = self.last_activity.is_none();
        let last_activity = *self.last_activity.get_or_insert(now);

        if let Some(overlay) = &mut self.overlay {
            if first_tick {
                overlay.shown_at = now;
            }
            if now.wrapping_sub(overlay.shown_at) >= overlay.duration_ms {
                self.overlay = None;
            }
        }

        if !self.asleep
            && self.sleep_timeout_ms > 0
            && now.wrapping_sub(last_activity) > self.sleep_timeout_ms
        {
            #[cfg(feature = "defmt")]
            defmt::debug!("screen idle, sleeping");
            self.asleep = true;
            self.overlay = None;
        }
    }

    /// Snapshot of what should be on the panel right now.
    pub fn frame(&self) -> ScreenState {
        if self.asleep {
            return ScreenState::Blank;
        }
        match &self.overlay {
            Some(Overlay {
                content: OverlayContent::Label { text, glyph },
                ..
            }) => ScreenState::Label {
                text: text.clone(),
                glyph: *glyph,
            },
            Some(Overlay {
                content: OverlayContent::Network { title },
                ..
            }) => ScreenState::Network {
                title: title.clone(),
                ssid: self.values.header.clone(),
                address: self.address.clone(),
            },
            None => ScreenState::Values(self.values.clone()),
        }
    }

    /// Network name (shown on line 0) and address (network overlay).
    pub fn set_network(&mut self, ssid: &str, address: &str) {
        self.values.header = fit(ssid);
        self.address = fit(address);
    }

    pub fn is_asleep(&self) -> bool {
        self.asleep
    }

    pub fn mark(&self) -> Option<Mark> {
        self.values.mark
    }

    /// Restart the idle timer, unless the clock has not been read yet.
    fn touch(&mut self) {
        if self.last_activity.is_some() {
            self.last_activity = Some(self.now);
        }
    }

    fn show(&mut self, content: OverlayContent, duration_ms: u32) {
        self.asleep = false;
        self.touch();
        self.overlay = Some(Overlay {
            content,
            shown_at: self.now,
            duration_ms,
        });
    }
}

impl Display for FourLineScreen {
    fn wake(&mut self) -> bool {
        self.touch();
        core::mem::replace(&mut self.asleep, false)
    }

    fn note_activity(&mut self) {
        self.touch();
    }

    fn show_overlay(&mut self, text: &str, duration_ms: u32, glyph: Option<Glyph>) {
        self.show(
            OverlayContent::Label {
                text: fit(text),
                glyph,
            },
            duration_ms,
        );
    }

    fn show_network_info(&mut self, title: &str, duration_ms: u32) {
        self.show(OverlayContent::Network { title: fit(title) }, duration_ms);
    }

    fn set_mark_position(&mut self, mark: Option<Mark>) {
        self.values.mark = mark;
    }

    fn refresh_field(&mut self, field: Field<'_>) {
        match field {
            Field::Brightness(v) => self.values.brightness = v,
            Field::Speed(v) => self.values.speed = v,
            Field::Intensity(v) => self.values.intensity = v,
            Field::Palette(name) => self.values.palette = fit(name),
            Field::Effect(name) => self.values.effect = fit(name),
        }
    }
}

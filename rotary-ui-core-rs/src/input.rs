//! Fixed-rate sampling of the encoder's quadrature pins and push button.
//!
//! [`InputPoller`] is called from the host loop as often as it likes; it
//! only samples the pins once every [`POLL_INTERVAL_MS`] and turns pin
//! levels into [`Direction`] and [`ButtonEvent`] values.
//!
//! # Button timing
//!
//! ```text
//! press ─ release ─ (350 ms, no press) ──────────────▶ Click
//! press ─ release ─ press ─ release (within 350 ms) ─▶ DoubleClick
//! press ─ hold > 3000 ms ────────────────────────────▶ LongPress (once)
//! ```
//!
//! Releasing after a long press produces nothing and cancels any pending
//! click.

use embedded_hal::digital::InputPin;

/// Minimum time between two pin samples (500 Hz).
pub const POLL_INTERVAL_MS: u32 = 2;

/// Hold time before a press becomes a long press.
pub const LONG_PRESS_MS: u32 = 3000;

/// Window after a release in which a second press makes a double click.
pub const DOUBLE_CLICK_WINDOW_MS: u32 = 350;

/// Rotation direction of one encoder detent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Increase the active parameter.
    Clockwise,
    /// Decrease the active parameter.
    CounterClockwise,
}

/// Button gestures recognised by [`ButtonDecoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// One press whose double-click window expired.
    Click,
    /// Second release within [`DOUBLE_CLICK_WINDOW_MS`] of the first.
    DoubleClick,
    /// Button held longer than [`LONG_PRESS_MS`].
    LongPress,
}

/// Everything decoded from one pin sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    pub button: Option<ButtonEvent>,
    pub rotation: Option<Direction>,
}

// ── Quadrature ───────────────────────────────────────────────────────────

/// Single-edge quadrature decoder.
///
/// Only a falling edge on pin A counts; pin B's level at that moment picks
/// the direction (low = clockwise). One step per detent, no full
/// four-state tracking.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QuadratureDecoder {
    a_prev: bool,
}

impl QuadratureDecoder {
    /// Start from the current level of pin A.
    pub fn new(a_level: bool) -> Self {
        Self { a_prev: a_level }
    }

    pub fn update(&mut self, a: bool, b: bool) -> Option<Direction> {
        let falling = self.a_prev && !a;
        self.a_prev = a;
        if !falling {
            return None;
        }
        Some(if b {
            Direction::CounterClockwise
        } else {
            Direction::Clockwise
        })
    }
}

// ── Button ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum ButtonState {
    Idle,
    /// Held since `since`; `second` if this press follows a recent release.
    Pressed { since: u32, second: bool },
    /// Long press already reported; waiting for release.
    LongPressed,
    /// Released at `released_at`; a press before the window closes is a
    /// double click.
    Pending { released_at: u32 },
}

/// Press/release state machine for an active-low push button.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonDecoder {
    state: ButtonState,
}

impl Default for ButtonDecoder {
    fn default() -> Self {
        Self {
            state: ButtonState::Idle,
        }
    }
}

impl ButtonDecoder {
    /// Feed the button level at time `now` (ms, wrapping).
    pub fn update(&mut self, pressed: bool, now: u32) -> Option<ButtonEvent> {
        let (next, event) = match (self.state, pressed) {
            (ButtonState::Idle, true) => (
                ButtonState::Pressed {
                    since: now,
                    second: false,
                },
                None,
            ),
            (ButtonState::Idle, false) => (ButtonState::Idle, None),

            (ButtonState::Pressed { since, .. }, true) => {
                if now.wrapping_sub(since) > LONG_PRESS_MS {
                    (ButtonState::LongPressed, Some(ButtonEvent::LongPress))
                } else {
                    (self.state, None)
                }
            }
            (ButtonState::Pressed { second: true, .. }, false) => {
                (ButtonState::Idle, Some(ButtonEvent::DoubleClick))
            }
            (ButtonState::Pressed { second: false, .. }, false) => {
                (ButtonState::Pending { released_at: now }, None)
            }

            (ButtonState::LongPressed, true) => (ButtonState::LongPressed, None),
            (ButtonState::LongPressed, false) => (ButtonState::Idle, None),

            (ButtonState::Pending { .. }, true) => (
                ButtonState::Pressed {
                    since: now,
                    second: true,
                },
                None,
            ),
            (ButtonState::Pending { released_at }, false) => {
                if now.wrapping_sub(released_at) > DOUBLE_CLICK_WINDOW_MS {
                    (ButtonState::Idle, Some(ButtonEvent::Click))
                } else {
                    (self.state, None)
                }
            }
        };
        self.state = next;
        event
    }

    /// Returns `true` while the button is held.
    pub fn is_held(&self) -> bool {
        matches!(
            self.state,
            ButtonState::Pressed { .. } | ButtonState::LongPressed
        )
    }
}

// ── Poller ───────────────────────────────────────────────────────────────

/// The three encoder inputs: quadrature A/B and the push button.
pub struct EncoderPins<P> {
    /// Quadrature A ("DT").
    pub a: P,
    /// Quadrature B ("CLK").
    pub b: P,
    /// Push button ("SW"), active low.
    pub button: P,
}

/// Rate-limited sampler over [`EncoderPins`].
pub struct InputPoller<P> {
    pins: EncoderPins<P>,
    quadrature: QuadratureDecoder,
    button: ButtonDecoder,
    last_sample: u32,
}

impl<P> InputPoller<P>
where
    P: InputPin,
{
    /// Take the pins and latch the current level of pin A.
    pub fn new(mut pins: EncoderPins<P>, now: u32) -> Result<Self, P::Error> {
        let a = pins.a.is_high()?;
        Ok(Self {
            pins,
            quadrature: QuadratureDecoder::new(a),
            button: ButtonDecoder::default(),
            last_sample: now,
        })
    }

    /// Sample the pins if [`POLL_INTERVAL_MS`] has passed since the last
    /// sample. Returns `Ok(None)` when it is not yet time.
    pub fn poll(&mut self, now: u32) -> Result<Option<Sample>, P::Error> {
        if now.wrapping_sub(self.last_sample) < POLL_INTERVAL_MS {
            return Ok(None);
        }
        self.last_sample = now;

        let pressed = self.pins.button.is_low()?;
        let a = self.pins.a.is_high()?;
        let b = self.pins.b.is_high()?;

        Ok(Some(Sample {
            button: self.button.update(pressed, now),
            rotation: self.quadrature.update(a, b),
        }))
    }

    /// Give the pins back, e.g. before releasing them to the pin manager.
    pub fn release(self) -> EncoderPins<P> {
        self.pins
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;

    /// Input pin whose level is set from the test through a shared cell.
    #[derive(Clone, Copy)]
    pub(crate) struct FakePin<'a> {
        pub level: &'a Cell<bool>,
    }

    impl embedded_hal::digital::ErrorType for FakePin<'_> {
        type Error = Infallible;
    }

    impl InputPin for FakePin<'_> {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.level.get())
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.level.get())
        }
    }

    /// Drive a button decoder from a list of (time, pressed) samples and
    /// collect the events it reports.
    fn run(samples: &[(u32, bool)]) -> heapless::Vec<(u32, ButtonEvent), 8> {
        let mut button = ButtonDecoder::default();
        let mut events = heapless::Vec::new();
        for &(t, pressed) in samples {
            if let Some(e) = button.update(pressed, t) {
                events.push((t, e)).unwrap();
            }
        }
        events
    }

    // ── Quadrature ───────────────────────────────────────────────────

    #[test]
    fn falling_edge_with_b_low_is_clockwise() {
        let mut q = QuadratureDecoder::new(true);
        assert_eq!(q.update(false, false), Some(Direction::Clockwise));
    }

    #[test]
    fn falling_edge_with_b_high_is_counter_clockwise() {
        let mut q = QuadratureDecoder::new(true);
        assert_eq!(q.update(false, true), Some(Direction::CounterClockwise));
    }

    #[test]
    fn other_transitions_are_ignored() {
        let mut q = QuadratureDecoder::new(false);
        assert_eq!(q.update(false, false), None); // low → low
        assert_eq!(q.update(true, false), None); // rising
        assert_eq!(q.update(true, true), None); // high → high
        assert_eq!(q.update(false, true), Some(Direction::CounterClockwise));
        assert_eq!(q.update(false, false), None); // still low
    }

    // ── Button ───────────────────────────────────────────────────────

    #[test]
    fn single_click_fires_after_window() {
        let events = run(&[(0, true), (50, false), (300, false), (400, false), (401, false)]);
        assert_eq!(events.as_slice(), &[(401, ButtonEvent::Click)]);
    }

    #[test]
    fn double_click_fires_once_on_second_release() {
        let events = run(&[
            (0, true),
            (50, false),
            (200, true),
            (260, false),
            (700, false),
        ]);
        assert_eq!(events.as_slice(), &[(260, ButtonEvent::DoubleClick)]);
    }

    #[test]
    fn no_double_click_when_window_expires() {
        let events = run(&[(0, true), (50, false), (450, false), (460, true), (500, false)]);
        // The first click is reported, the second press starts a fresh click.
        assert_eq!(events.as_slice(), &[(450, ButtonEvent::Click)]);
    }

    #[test]
    fn long_press_fires_once() {
        let events = run(&[(0, true), (2000, true), (3001, true), (3500, true), (5000, true)]);
        assert_eq!(events.as_slice(), &[(3001, ButtonEvent::LongPress)]);
    }

    #[test]
    fn release_after_long_press_suppresses_clicks() {
        let events = run(&[
            (0, true),
            (3001, true),
            (3100, false),
            (3200, true),
            (3250, false),
            (4000, false),
        ]);
        // Only the long press; the quick re-press is a plain click, never a
        // double click.
        assert_eq!(
            events.as_slice(),
            &[(3001, ButtonEvent::LongPress), (4000, ButtonEvent::Click)]
        );
    }

    #[test]
    fn held_second_press_does_not_expire_window() {
        let events = run(&[(0, true), (50, false), (100, true), (900, true), (950, false)]);
        assert_eq!(events.as_slice(), &[(950, ButtonEvent::DoubleClick)]);
    }

    #[test]
    fn timing_survives_counter_wrap() {
        let start = u32::MAX - 100;
        let events = run(&[
            (start, true),
            (start.wrapping_add(3001), true),
        ]);
        assert_eq!(events.as_slice(), &[(start.wrapping_add(3001), ButtonEvent::LongPress)]);
    }

    // ── Poller ───────────────────────────────────────────────────────

    #[test]
    fn poller_rate_limits_and_decodes() {
        let a = Cell::new(true);
        let b = Cell::new(false);
        let sw = Cell::new(true);
        let pins = EncoderPins {
            a: FakePin { level: &a },
            b: FakePin { level: &b },
            button: FakePin { level: &sw },
        };
        let mut poller = InputPoller::new(pins, 0).unwrap();

        // Too early.
        assert_eq!(poller.poll(1).unwrap(), None);

        a.set(false);
        let sample = poller.poll(2).unwrap().unwrap();
        assert_eq!(sample.rotation, Some(Direction::Clockwise));
        assert_eq!(sample.button, None);

        // Button is active low.
        sw.set(false);
        assert_eq!(poller.poll(3).unwrap(), None);
        let sample = poller.poll(4).unwrap().unwrap();
        assert_eq!(sample.rotation, None);
        assert!(poller.button.is_held());
    }
}

//! Host lifecycle: setup, the polling loop and configuration.
//!
//! ```text
//!   host loop ──► poll(now)
//!                   │  disabled or engine busy? ── return
//!                   │  reconcile effect/palette cursors with the engine,
//!                   │  redraw names that changed elsewhere
//!                   ▼
//!               InputPoller (every 2 ms)
//!                   │
//!        ┌──────────┴──────────┐
//!   button event            rotation
//!        │                      │
//!   Click       ── next mode    ParameterAdjusters::adjust(mode, dir)
//!   DoubleClick ── power toggle         │
//!   LongPress   ── network info         ▼
//!                                    Engine (+ Display)
//! ```

use crate::adjust::ParameterAdjusters;
use crate::config::{RotaryConfig, Settings};
use crate::display::{Display, Field, NoDisplay};
use crate::engine::{Change, Engine};
use crate::error::SetupError;
use crate::input::{ButtonEvent, EncoderPins, InputPoller};
use crate::menu::{MenuController, Mode};
use crate::pins::{PinManager, PinOwner};
use crate::selection::{Reconciled, Selections};

/// Title of the overlay shown on a long press.
pub const NETWORK_INFO_TITLE: &str = "NETWORK INFO";

/// How long the network overlay stays up.
pub const NETWORK_INFO_MS: u32 = 10_000;

const OWNER: PinOwner = PinOwner::RotaryEncoderUi;

/// Rotary encoder UI bound to a host engine, pin registry and optional
/// display.
pub struct RotaryEncoderUi<E, P: PinManager, D = NoDisplay> {
    engine: E,
    pins: P,
    display: Option<D>,
    settings: Settings,
    poller: Option<InputPoller<P::Input>>,
    /// Pins currently allocated under our owner tag.
    pins_held: Option<[u8; 3]>,
    selections: Option<Selections>,
    menu: MenuController,
    adjusters: ParameterAdjusters,
    init_done: bool,
}

impl<E, P> RotaryEncoderUi<E, P, NoDisplay>
where
    E: Engine,
    P: PinManager,
{
    /// UI without a display. Only the first four modes are reachable.
    pub fn new(engine: E, pins: P) -> Self {
        Self::with_display(engine, pins, None)
    }
}

impl<E, P, D> RotaryEncoderUi<E, P, D>
where
    E: Engine,
    P: PinManager,
    D: Display,
{
    pub fn with_display(engine: E, pins: P, display: Option<D>) -> Self {
        Self {
            engine,
            pins,
            display,
            settings: Settings::default(),
            poller: None,
            pins_held: None,
            selections: None,
            menu: MenuController::default(),
            adjusters: ParameterAdjusters::default(),
            init_done: false,
        }
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Claim the pins, latch their levels and sort the name tables.
    ///
    /// On error the module disables itself; `poll()` then does nothing
    /// until a new configuration brings it back.
    pub fn setup(&mut self, now: u32) -> Result<(), SetupError> {
        #[cfg(feature = "defmt")]
        defmt::info!("rotary encoder UI setup, pins {}", self.settings.pins);

        if let Err(e) = self.try_setup(now) {
            #[cfg(feature = "defmt")]
            defmt::error!("rotary encoder UI disabled: {}", e);
            self.settings.enabled = false;
            return Err(e);
        }

        if let Some(display) = self.display.as_mut() {
            display.set_mark_position(self.menu.mode().mark());
        }
        self.show_engine_state();
        self.init_done = true;

        #[cfg(feature = "defmt")]
        defmt::info!("rotary encoder UI ready");
        Ok(())
    }

    fn try_setup(&mut self, now: u32) -> Result<(), SetupError> {
        let numbers = self.settings.pins.numbers().ok_or(SetupError::PinsUnassigned)?;
        if !self.pins.allocate(&numbers, OWNER) {
            #[cfg(feature = "defmt")]
            defmt::warn!("pins {} already in use", numbers);
            return Err(SetupError::PinsUnavailable);
        }
        self.pins_held = Some(numbers);

        let started = self.start_polling(numbers, now).and_then(|()| self.sort_tables());
        if started.is_err() {
            self.release_pins();
        }
        started?;

        self.adjusters.set_cct(self.engine.cct());
        Ok(())
    }

    fn start_polling(&mut self, [dt, clk, sw]: [u8; 3], now: u32) -> Result<(), SetupError> {
        let (Some(a), Some(b), Some(button)) = (
            self.pins.input_pullup(dt),
            self.pins.input_pullup(clk),
            self.pins.input_pullup(sw),
        ) else {
            return Err(SetupError::PinsUnavailable);
        };
        let poller = InputPoller::new(EncoderPins { a, b, button }, now).map_err(|_| SetupError::PinRead)?;
        self.poller = Some(poller);
        Ok(())
    }

    /// The engine's tables never change, so they are sorted once.
    fn sort_tables(&mut self) -> Result<(), SetupError> {
        if self.selections.is_none() {
            self.selections = Some(Selections::build(
                self.engine.effect_names(),
                self.engine.effect_count(),
                self.engine.palette_names(),
                self.engine.palette_count(),
            )?);
        }
        Ok(())
    }

    /// Push every value the display shows, read from the engine.
    fn show_engine_state(&mut self) {
        let Some(display) = self.display.as_mut() else {
            return;
        };
        display.refresh_field(Field::Brightness(self.engine.brightness()));
        display.refresh_field(Field::Speed(self.engine.speed()));
        display.refresh_field(Field::Intensity(self.engine.intensity()));

        if let Some(selections) = self.selections.as_mut() {
            selections.reconcile(self.engine.effect(), self.engine.palette());
            display.refresh_field(Field::Palette(selections.palettes.current_name()));
            display.refresh_field(Field::Effect(selections.effects.current_name()));
        }
    }

    /// One pass of the host loop. Cheap to call at any rate; input is
    /// sampled every [`POLL_INTERVAL_MS`](crate::input::POLL_INTERVAL_MS).
    pub fn poll(&mut self, now: u32) {
        if !self.settings.enabled || self.engine.is_updating() {
            return;
        }
        let Some(poller) = self.poller.as_mut() else {
            return;
        };

        let sample = match poller.poll(now) {
            Ok(Some(sample)) => sample,
            Ok(None) => return,
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("encoder pin read failed");
                return;
            }
        };

        if let Some(selections) = self.selections.as_mut() {
            let (effect, palette) = selections.reconcile(self.engine.effect(), self.engine.palette());
            if let Some(display) = self.display.as_mut() {
                if effect == Reconciled::Moved {
                    display.refresh_field(Field::Effect(selections.effects.current_name()));
                }
                if palette == Reconciled::Moved {
                    display.refresh_field(Field::Palette(selections.palettes.current_name()));
                }
            }
        }

        if let Some(event) = sample.button {
            self.handle_button(event);
        }

        if let Some(direction) = sample.rotation {
            self.adjusters.adjust(
                self.menu.mode(),
                direction,
                &mut self.engine,
                self.display.as_mut(),
                self.selections.as_mut(),
            );
        }
    }

    fn handle_button(&mut self, event: ButtonEvent) {
        match event {
            ButtonEvent::Click => {
                let presets_valid = self.adjusters.presets.is_valid();
                let _advanced = self.menu.advance(self.display.as_mut(), presets_valid);
                #[cfg(feature = "defmt")]
                if _advanced {
                    defmt::debug!("mode -> {}", self.menu.mode());
                }
            }
            ButtonEvent::DoubleClick => {
                let on = !self.engine.is_on();
                self.engine.set_on(on);
                self.engine.notify_changed(Change::Power);
                #[cfg(feature = "defmt")]
                defmt::info!("power {}", on);
            }
            ButtonEvent::LongPress => {
                #[cfg(feature = "defmt")]
                defmt::info!("long press, showing network info");
                if let Some(display) = self.display.as_mut() {
                    display.show_network_info(NETWORK_INFO_TITLE, NETWORK_INFO_MS);
                }
            }
        }
    }

    // ── Configuration ────────────────────────────────────────────────

    /// Load settings from the host's stored section.
    ///
    /// Before the first successful setup this only stores the values.
    /// Afterwards, changed pins are released and set up again; an
    /// unassigned pin disables the module.
    ///
    /// Returns `false` if there is no section, or if it predates the
    /// `apply-2-all-seg` key (the host then saves fresh defaults).
    pub fn read_from_config(&mut self, config: Option<&RotaryConfig>, now: u32) -> bool {
        let Some(config) = config else {
            #[cfg(feature = "defmt")]
            defmt::info!("no rotary encoder config, using defaults");
            return false;
        };

        let previous = self.settings.pins;
        self.settings.merge(config);
        self.adjusters.apply_to_all = self.settings.apply_to_all;
        self.adjusters.presets = self.settings.presets;

        if !self.init_done {
            #[cfg(feature = "defmt")]
            defmt::info!("rotary encoder config loaded");
        } else if self.settings.pins != previous {
            #[cfg(feature = "defmt")]
            defmt::info!("rotary encoder config reloaded, pins {}", self.settings.pins);
            self.release_pins();
            if self.settings.pins.numbers().is_none() {
                self.settings.enabled = false;
                return true;
            }
            // setup() logs and disables on failure.
            let _ = self.setup(now);
        }

        config.apply_to_all.is_some()
    }

    /// Settings snapshot for the host to save under
    /// [`CONFIG_SECTION`](crate::config::CONFIG_SECTION).
    pub fn add_to_config(&self) -> RotaryConfig {
        self.settings.to_config()
    }

    /// Drop the input pins and hand every pin we still own back to the pin
    /// manager. Pins owned by anyone else are left alone.
    pub fn release_pins(&mut self) {
        self.poller = None;
        if let Some(held) = self.pins_held.take() {
            for pin in held {
                if self.pins.owner(pin) == Some(OWNER) {
                    self.pins.deallocate(pin, OWNER);
                }
            }
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    pub fn is_initialized(&self) -> bool {
        self.init_done
    }

    pub fn mode(&self) -> Mode {
        self.menu.mode()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn adjusters(&self) -> &ParameterAdjusters {
        &self.adjusters
    }

    pub fn selections(&self) -> Option<&Selections> {
        self.selections.as_ref()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn pin_manager(&self) -> &P {
        &self.pins
    }

    pub fn pin_manager_mut(&mut self) -> &mut P {
        &mut self.pins
    }

    pub fn display(&self) -> Option<&D> {
        self.display.as_ref()
    }

    pub fn display_mut(&mut self) -> Option<&mut D> {
        self.display.as_mut()
    }
}

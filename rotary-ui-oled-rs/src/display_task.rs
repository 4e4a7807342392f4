//! Shared screen handle and the async refresh loop.
//!
//! The encoder UI and the refresh loop run as separate tasks, so the
//! [`FourLineScreen`] lives in a blocking mutex. Every access is a short
//! critical section; no lock is held across an `.await` or the I2C flush.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};
use embedded_hal_async::i2c::I2c;
use rotary_ui::{Display, Field, Glyph, Mark};

use crate::driver::OledDriver;
use crate::layout::{render_screen, ScreenConfig, ScreenState};
use crate::screen::FourLineScreen;

/// The screen as shared between tasks.
pub type SharedScreen = Mutex<CriticalSectionRawMutex, RefCell<FourLineScreen>>;

/// [`Display`] implementation over a [`SharedScreen`], handed to
/// `RotaryEncoderUi`.
#[derive(Clone, Copy)]
pub struct ScreenHandle {
    screen: &'static SharedScreen,
}

impl ScreenHandle {
    pub fn new(screen: &'static SharedScreen) -> Self {
        Self { screen }
    }

    fn with<R>(&self, f: impl FnOnce(&mut FourLineScreen) -> R) -> R {
        self.screen.lock(|cell| f(&mut cell.borrow_mut()))
    }

    pub fn set_network(&self, ssid: &str, address: &str) {
        self.with(|s| s.set_network(ssid, address));
    }
}

impl Display for ScreenHandle {
    fn wake(&mut self) -> bool {
        self.with(|s| s.wake())
    }

    fn note_activity(&mut self) {
        self.with(|s| s.note_activity());
    }

    fn show_overlay(&mut self, text: &str, duration_ms: u32, glyph: Option<Glyph>) {
        self.with(|s| s.show_overlay(text, duration_ms, glyph));
    }

    fn show_network_info(&mut self, title: &str, duration_ms: u32) {
        self.with(|s| s.show_network_info(title, duration_ms));
    }

    fn set_mark_position(&mut self, mark: Option<Mark>) {
        self.with(|s| s.set_mark_position(mark));
    }

    fn refresh_field(&mut self, field: Field<'_>) {
        self.with(|s| s.refresh_field(field));
    }
}

/// Periodic render loop.
///
/// A plain `async fn`, not an Embassy `#[task]`; wrap it in a concrete
/// task since Embassy tasks cannot be generic:
///
/// ```ignore
/// static SCREEN: SharedScreen = Mutex::new(RefCell::new(...));
///
/// #[embassy_executor::task]
/// async fn oled_task(driver: OledDriver<MyI2c>, config: ScreenConfig) {
///     screen_refresh_task(driver, &SCREEN, config).await;
/// }
/// ```
///
/// Each cycle:
///
/// 1. Advance the screen clock and take a frame (brief lock).
/// 2. Switch the panel off while asleep, on otherwise.
/// 3. Skip if the frame equals the last one drawn.
/// 4. Render into the frame buffer and flush (no lock held).
///
/// Returns if the panel fails to initialise. Render and flush errors are
/// logged and retried next cycle.
pub async fn screen_refresh_task<I2C>(
    mut driver: OledDriver<I2C>,
    screen: &'static SharedScreen,
    config: ScreenConfig,
) where
    I2C: I2c,
{
    if let Err(_e) = driver.init().await {
        #[cfg(feature = "defmt")]
        defmt::error!("OLED init failed: {}", _e);
        return;
    }

    #[cfg(feature = "defmt")]
    defmt::info!("OLED initialised");

    let period = embassy_time::Duration::from_millis(config.update_period_ms());
    let mut last_frame: Option<ScreenState> = None;

    loop {
        embassy_time::Timer::after(period).await;

        let now = embassy_time::Instant::now().as_millis() as u32;
        let frame = screen.lock(|cell| {
            let mut s = cell.borrow_mut();
            s.tick(now);
            s.frame()
        });

        if let Err(_e) = driver.set_on(frame != ScreenState::Blank).await {
            #[cfg(feature = "defmt")]
            defmt::error!("OLED power change failed: {}", _e);
            continue;
        }

        if last_frame.as_ref() == Some(&frame) {
            continue;
        }

        driver.clear_buffer();
        let Some(panel) = driver.panel_mut() else {
            continue;
        };
        if render_screen(panel, &frame, &config).is_err() {
            #[cfg(feature = "defmt")]
            defmt::error!("Render failed");
            continue;
        }

        if let Err(_e) = driver.flush().await {
            #[cfg(feature = "defmt")]
            defmt::error!("Flush failed: {}", _e);
            continue;
        }

        last_frame = Some(frame);
    }
}

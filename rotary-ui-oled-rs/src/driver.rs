//! SSD1306 panel over async I2C, buffered graphics mode.

use display_interface_i2c::I2CInterface;
use embedded_hal_async::i2c::I2c;
use ssd1306::{
    mode::BufferedGraphicsModeAsync, prelude::*, I2CDisplayInterface, Ssd1306Async,
};

use crate::error::OledError;

/// The panel type wrapped by [`OledDriver`].
pub type Panel<I2C> = Ssd1306Async<
    I2CInterface<I2C>,
    DisplaySize128x64,
    BufferedGraphicsModeAsync<DisplaySize128x64>,
>;

/// Power state of the panel as last commanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelState {
    /// Constructed, no I2C traffic yet.
    Uninitialized,
    On,
    /// Pixels off, frame buffer retained.
    Off,
}

/// Async driver for a 128×64 SSD1306 over I2C.
///
/// Construction sends nothing on the bus. Call [`init()`](Self::init)
/// once, draw through [`panel_mut()`](Self::panel_mut), then
/// [`flush()`](Self::flush). [`set_on()`](Self::set_on) blanks the panel
/// while the screen sleeps without losing the frame buffer.
///
/// ```no_run
/// use rotary_ui_oled::OledDriver;
///
/// # async fn example(i2c: impl embedded_hal_async::i2c::I2c) {
/// let mut oled = OledDriver::new(i2c, 0x3C);
/// oled.init().await.unwrap();
/// oled.clear_buffer();
/// oled.flush().await.unwrap();
/// # }
/// ```
pub struct OledDriver<I2C> {
    panel: Panel<I2C>,
    state: PanelState,
}

impl<I2C> OledDriver<I2C>
where
    I2C: I2c,
{
    /// `address` is the 7-bit device address, usually `0x3C` or `0x3D`.
    pub fn new(i2c: I2C, address: u8) -> Self {
        let interface = I2CDisplayInterface::new_custom_address(i2c, address);
        let panel = Ssd1306Async::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        Self {
            panel,
            state: PanelState::Uninitialized,
        }
    }

    /// Send the initialisation sequence. The panel is on afterwards.
    pub async fn init(&mut self) -> Result<(), OledError> {
        self.panel
            .init()
            .await
            .map_err(|_| OledError::InitializationFailed)?;
        self.state = PanelState::On;
        Ok(())
    }

    /// Clear the frame buffer. No bus traffic.
    pub fn clear_buffer(&mut self) {
        self.panel.clear_buffer();
    }

    /// Send the frame buffer to the panel (about 20 ms at 400 kHz).
    pub async fn flush(&mut self) -> Result<(), OledError> {
        if !self.is_initialized() {
            return Err(OledError::NotInitialized);
        }
        self.panel.flush().await?;
        Ok(())
    }

    /// Switch the panel's pixels on or off. Does nothing if it is already
    /// in that state.
    pub async fn set_on(&mut self, on: bool) -> Result<(), OledError> {
        let target = if on { PanelState::On } else { PanelState::Off };
        match self.state {
            PanelState::Uninitialized => Err(OledError::NotInitialized),
            state if state == target => Ok(()),
            _ => {
                self.panel.set_display_on(on).await?;
                self.state = target;
                Ok(())
            }
        }
    }

    /// Frame buffer as an `embedded-graphics` draw target, once
    /// initialised.
    pub fn panel_mut(&mut self) -> Option<&mut Panel<I2C>> {
        if self.is_initialized() {
            Some(&mut self.panel)
        } else {
            None
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state != PanelState::Uninitialized
    }
}

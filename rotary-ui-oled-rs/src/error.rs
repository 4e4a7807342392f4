//! Error types for the status screen.

use core::fmt;

use display_interface::DisplayError;

/// Errors from the SSD1306 panel.
///
/// `ssd1306` folds every bus error into [`DisplayError`], so this enum is
/// not generic over the I2C type.
#[derive(Debug)]
pub enum OledError {
    /// Bus or interface failure.
    Display(DisplayError),
    /// The panel did not accept its initialisation sequence.
    InitializationFailed,
    /// The panel was used before [`OledDriver::init()`](crate::OledDriver::init).
    NotInitialized,
}

impl From<DisplayError> for OledError {
    fn from(e: DisplayError) -> Self {
        OledError::Display(e)
    }
}

impl fmt::Display for OledError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OledError::Display(e) => write!(f, "display interface error: {:?}", e),
            OledError::InitializationFailed => write!(f, "panel initialisation failed"),
            OledError::NotInitialized => write!(f, "panel not initialised"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for OledError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            OledError::Display(_e) => defmt::write!(f, "Display interface error"),
            OledError::InitializationFailed => defmt::write!(f, "Initialization failed"),
            OledError::NotInitialized => defmt::write!(f, "Not initialized"),
        }
    }
}

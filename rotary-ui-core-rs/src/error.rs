//! Startup errors for the encoder UI.

use core::fmt;

use crate::name_table::NameTableError;

/// Reasons [`RotaryEncoderUi::setup()`](crate::RotaryEncoderUi::setup)
/// can fail. Every variant leaves the module disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    /// At least one encoder pin is configured as negative.
    PinsUnassigned,
    /// The pin manager refused the pins or could not configure them as
    /// inputs.
    PinsUnavailable,
    /// Reading the initial pin levels failed.
    PinRead,
    /// The engine's effect or palette table could not be parsed.
    NameTable(NameTableError),
}

impl From<NameTableError> for SetupError {
    fn from(e: NameTableError) -> Self {
        SetupError::NameTable(e)
    }
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SetupError::PinsUnassigned => write!(f, "encoder pins not assigned"),
            SetupError::PinsUnavailable => write!(f, "encoder pins unavailable"),
            SetupError::PinRead => write!(f, "failed to read encoder pins"),
            SetupError::NameTable(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SetupError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            SetupError::PinsUnassigned => defmt::write!(f, "Pins unassigned"),
            SetupError::PinsUnavailable => defmt::write!(f, "Pins unavailable"),
            SetupError::PinRead => defmt::write!(f, "Pin read failed"),
            SetupError::NameTable(e) => defmt::write!(f, "Name table: {}", e),
        }
    }
}

//! Pin ownership and the configured encoder pins.

use embedded_hal::digital::InputPin;

/// Owner tag recorded by the host's pin registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinOwner {
    /// This module.
    RotaryEncoderUi,
    /// Any other subsystem, identified by the host's own tag.
    Other(u8),
}

/// Host pin registry. A pin has at most one owner at a time.
pub trait PinManager {
    type Input: InputPin;

    /// Claim all of `pins` for `owner`, or none of them.
    fn allocate(&mut self, pins: &[u8], owner: PinOwner) -> bool;

    /// Release `pin` if `owner` holds it. Returns `false` otherwise.
    fn deallocate(&mut self, pin: u8, owner: PinOwner) -> bool;

    fn owner(&self, pin: u8) -> Option<PinOwner>;

    /// Configure an allocated pin as an input with pull-up.
    fn input_pullup(&mut self, pin: u8) -> Option<Self::Input>;
}

/// The three encoder pins as stored in the configuration. Negative means
/// unassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// Quadrature A.
    pub dt: i8,
    /// Quadrature B.
    pub clk: i8,
    /// Push button.
    pub sw: i8,
}

impl PinConfig {
    pub const UNASSIGNED: Self = Self {
        dt: -1,
        clk: -1,
        sw: -1,
    };

    /// Pin numbers in `[dt, clk, sw]` order, or `None` if any is unassigned.
    pub fn numbers(&self) -> Option<[u8; 3]> {
        let dt = u8::try_from(self.dt).ok()?;
        let clk = u8::try_from(self.clk).ok()?;
        let sw = u8::try_from(self.sw).ok()?;
        Some([dt, clk, sw])
    }
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            dt: 18,
            clk: 5,
            sw: 19,
        }
    }
}

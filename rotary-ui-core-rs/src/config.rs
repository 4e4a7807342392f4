//! Persisted settings.
//!
//! The host stores the module's settings as one JSON object under
//! [`CONFIG_SECTION`]:
//!
//! ```text
//! "Rotary-Encoder": {
//!   "enabled": true,
//!   "DT-pin": 18, "CLK-pin": 5, "SW-pin": 19,
//!   "preset-low": 0, "preset-high": 0,
//!   "apply-2-all-seg": true
//! }
//! ```
//!
//! Every key is optional on load; a missing key keeps the value already in
//! [`Settings`].

use serde::{Deserialize, Serialize};

use crate::adjust::{PresetRange, MAX_PRESET};
use crate::pins::PinConfig;

/// Section name in the host's configuration file.
pub const CONFIG_SECTION: &str = "Rotary-Encoder";

/// Wire form of the settings, keys as persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RotaryConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(rename = "DT-pin", default, skip_serializing_if = "Option::is_none")]
    pub dt_pin: Option<i8>,

    #[serde(rename = "CLK-pin", default, skip_serializing_if = "Option::is_none")]
    pub clk_pin: Option<i8>,

    #[serde(rename = "SW-pin", default, skip_serializing_if = "Option::is_none")]
    pub sw_pin: Option<i8>,

    #[serde(rename = "preset-low", default, skip_serializing_if = "Option::is_none")]
    pub preset_low: Option<i32>,

    #[serde(rename = "preset-high", default, skip_serializing_if = "Option::is_none")]
    pub preset_high: Option<i32>,

    #[serde(rename = "apply-2-all-seg", default, skip_serializing_if = "Option::is_none")]
    pub apply_to_all: Option<bool>,
}

/// Settings in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    pub enabled: bool,
    pub pins: PinConfig,
    pub presets: PresetRange,
    pub apply_to_all: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            pins: PinConfig::default(),
            presets: PresetRange::default(),
            apply_to_all: true,
        }
    }
}

fn clamp_preset(value: i32) -> u8 {
    value.clamp(0, MAX_PRESET as i32) as u8
}

impl Settings {
    /// Overwrite every field present in `config`. Preset bounds are
    /// clamped to `0..=250`.
    pub fn merge(&mut self, config: &RotaryConfig) {
        if let Some(enabled) = config.enabled {
            self.enabled = enabled;
        }
        if let Some(pin) = config.dt_pin {
            self.pins.dt = pin;
        }
        if let Some(pin) = config.clk_pin {
            self.pins.clk = pin;
        }
        if let Some(pin) = config.sw_pin {
            self.pins.sw = pin;
        }
        if let Some(low) = config.preset_low {
            self.presets.low = clamp_preset(low);
        }
        if let Some(high) = config.preset_high {
            self.presets.high = clamp_preset(high);
        }
        if let Some(all) = config.apply_to_all {
            self.apply_to_all = all;
        }
    }

    /// Full snapshot for saving; every key is written.
    pub fn to_config(&self) -> RotaryConfig {
        RotaryConfig {
            enabled: Some(self.enabled),
            dt_pin: Some(self.pins.dt),
            clk_pin: Some(self.pins.clk),
            sw_pin: Some(self.pins.sw),
            preset_low: Some(self.presets.low as i32),
            preset_high: Some(self.presets.high as i32),
            apply_to_all: Some(self.apply_to_all),
        }
    }
}

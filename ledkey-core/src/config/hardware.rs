//! Hardware configuration types
//!
//! Pin assignments for the three bus lines. The driver never touches pins
//! itself; these are consumed by the platform code that builds the bus.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create a pin with pull-up enabled
    ///
    /// Open-drain DIO lines need this unless the board has its own pull-up.
    pub const fn with_pullup(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: true,
        }
    }
}

/// Parse a pin string from config
///
/// Supports formats:
/// - "gpio11" -> pin 11
/// - "!gpio12" -> pin 12, inverted (active-low)
/// - "^gpio4" -> pin 4, pull-up enabled
///
/// Modifiers may be combined in any order ("!^gpio5").
pub fn parse_pin_string(s: &str) -> Result<PinConfig, ConfigError> {
    let mut s = s.trim();
    let mut inverted = false;
    let mut pull_up = false;

    loop {
        if let Some(rest) = s.strip_prefix('!') {
            inverted = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    let number = s.strip_prefix("gpio").ok_or(ConfigError::InvalidPin)?;
    let pin = number.parse().map_err(|_| ConfigError::InvalidPin)?;

    Ok(PinConfig {
        pin,
        inverted,
        pull_up,
    })
}

/// The three TM1638 bus lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelPins {
    /// Clock
    pub clk: PinConfig,
    /// Bidirectional data
    pub dio: PinConfig,
    /// Strobe
    pub stb: PinConfig,
}

impl Default for PanelPins {
    fn default() -> Self {
        Self {
            clk: PinConfig::new(6),
            dio: PinConfig::with_pullup(7),
            stb: PinConfig::new(8),
        }
    }
}

impl PanelPins {
    /// Check that no pin is used twice
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (clk, dio, stb) = (self.clk.pin, self.dio.pin, self.stb.pin);
        if clk == dio || clk == stb || dio == stb {
            return Err(ConfigError::InvalidPin);
        }
        Ok(())
    }
}

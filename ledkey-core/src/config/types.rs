//! Panel configuration type definitions

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::hardware::PanelPins;
#[cfg(feature = "serde")]
use super::ConfigError;

/// Display brightness (pulse width) level, 0-7
///
/// | level | pulse width |
/// |-------|-------------|
/// | 0     | 1/16        |
/// | 1     | 2/16        |
/// | 2     | 4/16        |
/// | 3     | 10/16       |
/// | 4     | 11/16       |
/// | 5     | 12/16       |
/// | 6     | 13/16       |
/// | 7     | 14/16       |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Brightness(u8);

/// Brightness level out of range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BrightnessError(pub u8);

impl fmt::Display for BrightnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "brightness {} out of range 0-7", self.0)
    }
}

const PULSE_WIDTH_SIXTEENTHS: [u8; 8] = [1, 2, 4, 10, 11, 12, 13, 14];

impl Brightness {
    /// Dimmest setting
    pub const MIN: Self = Self(0);

    /// Brightest setting
    pub const MAX: Self = Self(7);

    /// Create a brightness level
    pub const fn new(level: u8) -> Result<Self, BrightnessError> {
        if level > 7 {
            return Err(BrightnessError(level));
        }
        Ok(Self(level))
    }

    /// Create a brightness level, clamping values above 7
    pub const fn saturating(level: u8) -> Self {
        if level > 7 {
            Self::MAX
        } else {
            Self(level)
        }
    }

    /// Level 0-7
    pub const fn level(self) -> u8 {
        self.0
    }

    /// Duty cycle in sixteenths
    pub const fn pulse_width_sixteenths(self) -> u8 {
        PULSE_WIDTH_SIXTEENTHS[self.0 as usize]
    }
}

impl TryFrom<u8> for Brightness {
    type Error = BrightnessError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<Brightness> for u8 {
    fn from(brightness: Brightness) -> Self {
        brightness.0
    }
}

/// Bit-bang timing of the 3-wire bus
///
/// The TM1638 needs data valid for at least 2 µs after the read command
/// before the first key bit can be clocked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusTiming {
    /// Half clock period (µs)
    pub bit_delay_us: u32,
    /// Wait after switching DIO to input, before the first read clock (µs)
    pub read_settle_us: u32,
    /// Pause after each byte read (µs)
    pub inter_byte_us: u32,
}

impl Default for BusTiming {
    fn default() -> Self {
        Self {
            bit_delay_us: 1,
            read_settle_us: 5,
            inter_byte_us: 2,
        }
    }
}

/// Complete panel configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    /// Bus pin assignment
    pub pins: PanelPins,
    /// Brightness applied at startup
    pub brightness: Brightness,
    /// Turn the display on at startup
    pub display_on: bool,
    /// Bus timing
    pub timing: BusTiming,
    /// Key poll interval (ms); the debounce time is 4 polls
    pub poll_interval_ms: u16,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            pins: PanelPins::default(),
            brightness: Brightness::MIN,
            display_on: true,
            timing: BusTiming::default(),
            poll_interval_ms: 10,
        }
    }
}

/// Maximum postcard-encoded size of a [`PanelConfig`]
pub const MAX_CONFIG_SIZE: usize = 64;

#[cfg(feature = "serde")]
impl PanelConfig {
    /// Serialize to postcard binary into `buf`, returning the used part
    pub fn to_slice<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Serialize)
    }

    /// Deserialize from postcard binary
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)
    }
}

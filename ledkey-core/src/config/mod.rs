//! Configuration types
//!
//! Board-agnostic panel configuration. With the `serde` feature the whole
//! [`PanelConfig`] can be persisted as postcard binary data.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pin string is not of the form `[!][^]gpioNN`
    InvalidPin,
    /// Brightness level outside 0-7
    InvalidBrightness,
    /// Serialization failed (buffer too small)
    Serialize,
    /// Stored bytes are not a valid config
    Deserialize,
}

impl From<BrightnessError> for ConfigError {
    fn from(_: BrightnessError) -> Self {
        ConfigError::InvalidBrightness
    }
}

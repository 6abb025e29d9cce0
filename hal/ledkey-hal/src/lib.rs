//! Ledkey Hardware Abstraction Layer
//!
//! This crate defines the capability set the TM1638 driver needs from a
//! platform. Chip-specific code implements these traits once and the same
//! driver runs on any board.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  ledkey-drivers (TM1638 protocol)       │
//! └─────────────────────────────────────────┘
//!                     │  BusHandle
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ledkey-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │    PinBus     │       │  custom board │
//! │ (3 pins+delay)│       │  BusHandle    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`bus::BusHandle`] - The 3-wire bus capability set (CLK, DIO, STB)
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::FlexPin`] - Digital I/O
//! - [`delay::DelayUs`] - Busy-wait microsecond delays

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod delay;
pub mod embedded;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use bus::{BusHandle, PinBus};
pub use delay::DelayUs;
pub use gpio::{FlexPin, InputPin, OutputPin};

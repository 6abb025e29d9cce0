//! Board-agnostic core logic for TM1638 LED&KEY panels
//!
//! This crate contains everything that does not touch the bus:
//!
//! - 7-segment glyph table and hex/char conversion
//! - Key scan decoding (raw scan registers to logical key mask)
//! - Per-key debounce filter
//! - Panel configuration types

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod debounce;
pub mod keys;
pub mod segment;

pub use debounce::{Debouncer, DEBOUNCE_MAX};
pub use keys::KeyMask;

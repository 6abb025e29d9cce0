//! Hardware driver implementations
//!
//! This crate drives a TM1638 LED/keypad controller through the
//! [`ledkey_hal::BusHandle`] capability set:
//!
//! - Bus transport (strobe framing, LSB-first byte transfer)
//! - Register protocol (data, display control and address instructions)
//! - Display, LED and key scan operations
//! - A simulated chip for host-side testing (`sim` feature)

#![no_std]
#![deny(unsafe_code)]

#[cfg(any(test, feature = "sim"))]
pub mod sim;
pub mod tm1638;

pub use tm1638::{Tm1638, Tm1638Error};

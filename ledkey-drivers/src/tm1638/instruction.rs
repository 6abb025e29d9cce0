//! TM1638 instruction encoding
//!
//! Every transaction starts with one instruction byte. The top two bits
//! select the instruction class:
//!
//! | bits 7-6 | class           | low bits                                  |
//! |----------|-----------------|-------------------------------------------|
//! | 01       | data command    | b1 read keys, b2 fixed address, b3 test   |
//! | 10       | display control | b3 display on, b2-0 brightness            |
//! | 11       | address         | b3-0 register address                     |
//!
//! The 16 display registers interleave digits and LEDs: digit `i` lives at
//! address `2i`, LED `i` at `2i + 1`.

use ledkey_core::config::Brightness;

/// Instruction class and flag bits
pub mod cmd {
    /// Data command class
    pub const DATA: u8 = 0x40;
    /// Display control class
    pub const DISPLAY_CONTROL: u8 = 0x80;
    /// Address command class
    pub const ADDRESS: u8 = 0xC0;
    /// Class selector mask
    pub const CLASS_MASK: u8 = 0xC0;

    /// Data command: read key scan data (else write display registers)
    pub const READ_KEYS: u8 = 0x02;
    /// Data command: fixed address (else auto-increment)
    pub const FIXED_ADDRESS: u8 = 0x04;
    /// Data command: test mode (else normal)
    pub const TEST_MODE: u8 = 0x08;

    /// Display control: display on
    pub const DISPLAY_ON: u8 = 0x08;
    /// Display control: brightness mask
    pub const BRIGHTNESS_MASK: u8 = 0x07;

    /// Address command: register address mask
    pub const ADDRESS_MASK: u8 = 0x0F;
}

/// Number of display registers
pub const REGISTER_COUNT: usize = 16;

/// Number of 7-segment digits
pub const DIGIT_COUNT: usize = 8;

/// Number of discrete LEDs
pub const LED_COUNT: usize = 8;

/// Data command settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataCommand {
    /// Read key scan data instead of writing registers
    pub read_keys: bool,
    /// Keep the address fixed instead of auto-incrementing
    pub fixed_address: bool,
    /// Chip test mode
    pub test_mode: bool,
}

impl DataCommand {
    /// Write registers, auto-increment, normal mode
    pub const WRITE: Self = Self {
        read_keys: false,
        fixed_address: false,
        test_mode: false,
    };

    /// Read key scan data, auto-increment, normal mode
    pub const READ_KEYS: Self = Self {
        read_keys: true,
        fixed_address: false,
        test_mode: false,
    };

    /// Encode as an instruction byte
    pub const fn encode(self) -> u8 {
        let mut byte = cmd::DATA;
        if self.read_keys {
            byte |= cmd::READ_KEYS;
        }
        if self.fixed_address {
            byte |= cmd::FIXED_ADDRESS;
        }
        if self.test_mode {
            byte |= cmd::TEST_MODE;
        }
        byte
    }
}

/// A decoded instruction byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Instruction {
    /// Select read/write mode and addressing
    Data(DataCommand),
    /// Display on/off and brightness
    DisplayControl { brightness: Brightness, on: bool },
    /// Select a register address
    Address(u8),
}

impl Instruction {
    /// Encode as an instruction byte
    pub const fn encode(self) -> u8 {
        match self {
            Instruction::Data(data) => data.encode(),
            Instruction::DisplayControl { brightness, on } => display_control(brightness, on),
            Instruction::Address(addr) => address(addr),
        }
    }

    /// Decode an instruction byte
    ///
    /// Returns `None` for the unassigned `00xxxxxx` class.
    pub const fn decode(byte: u8) -> Option<Self> {
        match byte & cmd::CLASS_MASK {
            cmd::DATA => Some(Instruction::Data(DataCommand {
                read_keys: byte & cmd::READ_KEYS != 0,
                fixed_address: byte & cmd::FIXED_ADDRESS != 0,
                test_mode: byte & cmd::TEST_MODE != 0,
            })),
            cmd::DISPLAY_CONTROL => Some(Instruction::DisplayControl {
                brightness: Brightness::saturating(byte & cmd::BRIGHTNESS_MASK),
                on: byte & cmd::DISPLAY_ON != 0,
            }),
            cmd::ADDRESS => Some(Instruction::Address(byte & cmd::ADDRESS_MASK)),
            _ => None,
        }
    }
}

/// Display control instruction byte
pub const fn display_control(brightness: Brightness, on: bool) -> u8 {
    let mut byte = cmd::DISPLAY_CONTROL | (brightness.level() & cmd::BRIGHTNESS_MASK);
    if on {
        byte |= cmd::DISPLAY_ON;
    }
    byte
}

/// Address instruction byte (address wraps at 16)
pub const fn address(addr: u8) -> u8 {
    cmd::ADDRESS | (addr & cmd::ADDRESS_MASK)
}

/// Register address of digit `position`
pub const fn digit_address(position: u8) -> u8 {
    position * 2
}

/// Register address of LED `index`
pub const fn led_address(index: u8) -> u8 {
    index * 2 + 1
}

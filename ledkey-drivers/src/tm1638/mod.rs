//! TM1638 LED/keypad controller
//!
//! The TM1638 drives 8 seven-segment digits and 8 LEDs and scans up to
//! 24 keys, all through a bit-banged 3-wire bus.
//!
//! # Transactions
//!
//! Every register write is its own transaction: one data command frame
//! selecting auto-increment write mode, then one frame per register with
//! the address instruction and the data byte. This costs throughput but
//! keeps each write independently addressed. There is no local mirror of
//! the display memory; every call goes to the chip.
//!
//! # Blocking
//!
//! All operations busy-wait for their full bit-banged duration. The driver
//! assumes exclusive use of the bus for one call; on a preemptive system,
//! lock the bus around each call.

pub mod instruction;
pub mod transport;

use ledkey_core::config::{Brightness, BusTiming};
use ledkey_core::keys::{KeyMask, SCAN_BYTES};
use ledkey_core::segment;
use ledkey_core::Debouncer;
use ledkey_hal::BusHandle;

use instruction::{digit_address, led_address, DataCommand, Instruction};
pub use instruction::{DIGIT_COUNT, LED_COUNT, REGISTER_COUNT};
use transport::Transport;

/// TM1638 driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tm1638Error {
    /// Digit or LED position past the end of the display
    PositionOutOfRange,
}

/// TM1638 driver
///
/// Borrows the bus for its lifetime; the pins stay owned by the caller.
pub struct Tm1638<'a, B> {
    transport: Transport<'a, B>,
}

impl<'a, B: BusHandle> Tm1638<'a, B> {
    /// Create a driver with default bus timing
    pub fn new(bus: &'a mut B) -> Self {
        Self::with_timing(bus, BusTiming::default())
    }

    /// Create a driver with custom bus timing
    pub fn with_timing(bus: &'a mut B, timing: BusTiming) -> Self {
        Self {
            transport: Transport::new(bus, timing),
        }
    }

    /// Bring up the platform pins
    pub fn init(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::debug!("TM1638 init");

        self.transport.bus().platform_init();
    }

    /// Release the platform pins
    pub fn deinit(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::debug!("TM1638 deinit");

        self.transport.bus().platform_deinit();
    }

    /// Set brightness and on/off, then blank all LEDs and digits
    ///
    /// Blanking happens on every call so that switching the display on never
    /// shows stale register contents.
    pub fn configure_display(&mut self, brightness: Brightness, on: bool) {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "TM1638 display: brightness {}, on {}",
            brightness.level(),
            on
        );

        self.send_instruction(Instruction::DisplayControl { brightness, on });
        self.set_leds(0);
        self.clear_digits();
    }

    /// Write a raw segment pattern to one digit
    pub fn set_digit(&mut self, pattern: u8, position: u8) -> Result<(), Tm1638Error> {
        self.set_digits(&[pattern], position)
    }

    /// Write raw segment patterns to consecutive digits starting at `start`
    pub fn set_digits(&mut self, patterns: &[u8], start: u8) -> Result<(), Tm1638Error> {
        check_range(start, patterns.len(), DIGIT_COUNT)?;
        self.write_digits(patterns, start);
        Ok(())
    }

    /// Write a hex value (0-15 or an ASCII hex letter) to one digit
    ///
    /// Bit 7 of `value` lights the decimal point.
    pub fn set_digit_hex(&mut self, value: u8, position: u8) -> Result<(), Tm1638Error> {
        self.set_digit(segment::hex_pattern(value), position)
    }

    /// Write hex values to consecutive digits starting at `start`
    pub fn set_digits_hex(&mut self, values: &[u8], start: u8) -> Result<(), Tm1638Error> {
        check_range(start, values.len(), DIGIT_COUNT)?;

        let mut patterns = [segment::BLANK; DIGIT_COUNT];
        for (pattern, &value) in patterns.iter_mut().zip(values) {
            *pattern = segment::hex_pattern(value);
        }

        self.write_digits(&patterns[..values.len()], start);
        Ok(())
    }

    /// Write text to consecutive digits starting at `start`
    ///
    /// At most 8 characters are written; the rest of `text` is ignored.
    /// Bit 7 of each byte lights that digit's decimal point. Characters
    /// without a glyph show only the decimal point.
    pub fn set_digits_char(&mut self, text: &[u8], start: u8) -> Result<(), Tm1638Error> {
        let text = &text[..text.len().min(DIGIT_COUNT)];
        check_range(start, text.len(), DIGIT_COUNT)?;

        let mut patterns = [segment::BLANK; DIGIT_COUNT];
        for (pattern, &c) in patterns.iter_mut().zip(text) {
            *pattern = segment::char_pattern(c);
        }

        self.write_digits(&patterns[..text.len()], start);
        Ok(())
    }

    /// Blank all digits
    pub fn clear_digits(&mut self) {
        self.write_digits(&[segment::BLANK; DIGIT_COUNT], 0);
    }

    /// Set all LEDs from a mask (bit 0 = LED 0)
    pub fn set_leds(&mut self, mask: u8) {
        self.send_instruction(Instruction::Data(DataCommand::WRITE));

        for index in 0..LED_COUNT as u8 {
            let on = (mask >> index) & 0x01;
            self.write_register(led_address(index), on);
        }
    }

    /// Set a single LED
    pub fn set_led(&mut self, index: u8, on: bool) -> Result<(), Tm1638Error> {
        check_range(index, 1, LED_COUNT)?;

        self.send_instruction(Instruction::Data(DataCommand::WRITE));
        self.write_register(led_address(index), u8::from(on));
        Ok(())
    }

    /// Read the raw key scan registers
    pub fn read_key_registers(&mut self) -> [u8; SCAN_BYTES] {
        let mut raw = [0u8; SCAN_BYTES];
        let command = Instruction::Data(DataCommand::READ_KEYS).encode();

        self.transport.transaction(|t| {
            t.write_bytes(&[command]);
            t.read_bytes(&mut raw);
        });

        raw
    }

    /// Scan all keys
    pub fn scan_keys(&mut self) -> KeyMask {
        let raw = self.read_key_registers();
        let keys = KeyMask::decode(&raw);

        #[cfg(feature = "defmt")]
        defmt::trace!("TM1638 keys: {=u32:#08x}", keys.bits());

        keys
    }

    /// Scan the keys and feed the result to a debouncer
    ///
    /// Returns the debounced mask. Call once per poll interval.
    pub fn poll_keys<const N: usize>(&mut self, debouncer: &mut Debouncer<N>) -> u32 {
        let keys = self.scan_keys();
        debouncer.update(keys.bits())
    }

    /// Bus timing in use
    pub fn timing(&self) -> BusTiming {
        self.transport.timing()
    }

    fn send_instruction(&mut self, instruction: Instruction) {
        let byte = instruction.encode();
        self.transport.transaction(|t| t.write_bytes(&[byte]));
    }

    fn write_register(&mut self, addr: u8, data: u8) {
        let command = Instruction::Address(addr).encode();
        self.transport.transaction(|t| {
            t.write_bytes(&[command]);
            t.write_bytes(&[data]);
        });
    }

    /// Caller has validated the range
    fn write_digits(&mut self, patterns: &[u8], start: u8) {
        if patterns.is_empty() {
            return;
        }

        self.send_instruction(Instruction::Data(DataCommand::WRITE));

        for (position, &pattern) in (start..).zip(patterns) {
            self.write_register(digit_address(position), pattern);
        }
    }
}

fn check_range(start: u8, count: usize, limit: usize) -> Result<(), Tm1638Error> {
    if start as usize + count > limit || start as usize >= limit {
        return Err(Tm1638Error::PositionOutOfRange);
    }
    Ok(())
}

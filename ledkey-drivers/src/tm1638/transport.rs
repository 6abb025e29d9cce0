//! Bit-level transport for the TM1638 3-wire bus
//!
//! A transaction is framed by STB low ... STB high. Bytes go LSB first;
//! the chip latches DIO on the rising CLK edge and shifts key data out on
//! the falling edge.
//!
//! ```text
//! STB ‾‾\____________________________________/‾‾
//! CLK ‾‾‾‾‾\__/‾‾\__/‾‾\__/ ... \__/‾‾‾‾‾‾‾‾‾‾‾‾
//! DIO ‾‾‾‾‾‾X b0 X b1 X b2  ...  X b7 ‾‾‾‾‾‾‾‾‾‾
//! ```
//!
//! Transactions must be closed before the next one starts; a dangling
//! strobe corrupts every following frame. [`Transport::transaction`]
//! enforces this for a closure.

use ledkey_core::config::BusTiming;
use ledkey_hal::BusHandle;

/// Byte-level access to a borrowed bus
pub struct Transport<'a, B> {
    bus: &'a mut B,
    timing: BusTiming,
}

impl<'a, B: BusHandle> Transport<'a, B> {
    /// Wrap a bus handle
    pub fn new(bus: &'a mut B, timing: BusTiming) -> Self {
        Self { bus, timing }
    }

    /// Bus timing in use
    pub fn timing(&self) -> BusTiming {
        self.timing
    }

    /// Direct access to the bus handle
    pub fn bus(&mut self) -> &mut B {
        &mut *self.bus
    }

    /// Open a transaction (STB low)
    pub fn start_transaction(&mut self) {
        self.bus.strobe_write(false);
    }

    /// Close a transaction (STB high)
    pub fn end_transaction(&mut self) {
        self.bus.strobe_write(true);
    }

    /// Run `f` inside one strobe-framed transaction
    pub fn transaction<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.start_transaction();
        let result = f(self);
        self.end_transaction();
        result
    }

    /// Clock out bytes, LSB first
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        let half_period = self.timing.bit_delay_us;

        self.bus.data_configure_output();

        for &byte in bytes {
            let mut bits = byte;
            for _ in 0..8 {
                self.bus.clock_write(false);
                self.bus.delay_us(half_period);
                self.bus.data_write(bits & 0x01 != 0);
                self.bus.clock_write(true);
                self.bus.delay_us(half_period);
                bits >>= 1;
            }
        }
    }

    /// Clock in `buf.len()` bytes, LSB first
    ///
    /// Must follow a read-keys data command in the same transaction.
    pub fn read_bytes(&mut self, buf: &mut [u8]) {
        let half_period = self.timing.bit_delay_us;

        self.bus.data_configure_input();
        self.bus.delay_us(self.timing.read_settle_us);

        for slot in buf.iter_mut() {
            let mut byte = 0u8;
            for bit in 0..8 {
                self.bus.clock_write(false);
                self.bus.delay_us(half_period);
                self.bus.clock_write(true);
                if self.bus.data_read() {
                    byte |= 1 << bit;
                }
                self.bus.delay_us(half_period);
            }

            *slot = byte;
            self.bus.delay_us(self.timing.inter_byte_us);
        }
    }
}

//! 3-wire bus capability set
//!
//! The TM1638 talks over three lines:
//! - CLK: clock, driven by the host
//! - DIO: bidirectional data, LSB first
//! - STB: strobe, low for the duration of one transaction
//!
//! [`BusHandle`] is the full set of primitives the driver calls. Every method
//! is required, so a platform cannot hand the driver a partial handle.

use crate::delay::DelayUs;
use crate::gpio::{FlexPin, OutputPin};

/// Primitive operations the TM1638 driver needs from the platform
///
/// The driver only borrows a handle; pin ownership stays with the caller.
/// None of these operations can fail: pin-level faults are not observable
/// on this bus.
pub trait BusHandle {
    /// Drive the clock line
    fn clock_write(&mut self, high: bool);

    /// Drive the data line (only meaningful while configured as output)
    fn data_write(&mut self, high: bool);

    /// Sample the data line (only meaningful while configured as input)
    fn data_read(&mut self) -> bool;

    /// Configure the data line as an output
    fn data_configure_output(&mut self);

    /// Configure the data line as an input
    fn data_configure_input(&mut self);

    /// Drive the strobe line
    fn strobe_write(&mut self, high: bool);

    /// Block for `us` microseconds
    fn delay_us(&mut self, us: u32);

    /// Bring the pins into the idle bus state
    fn platform_init(&mut self);

    /// Release the pins
    fn platform_deinit(&mut self);
}

/// Bus handle assembled from three pins and a delay provider
///
/// ```text
///        ┌────────┐
///  CLK ──┤        │
///  DIO ──┤ TM1638 │
///  STB ──┤        │
///        └────────┘
/// ```
pub struct PinBus<CLK, DIO, STB, D> {
    clk: CLK,
    dio: DIO,
    stb: STB,
    delay: D,
}

impl<CLK, DIO, STB, D> PinBus<CLK, DIO, STB, D>
where
    CLK: OutputPin,
    DIO: FlexPin,
    STB: OutputPin,
    D: DelayUs,
{
    /// Create a new pin bus
    ///
    /// Pins are not touched until [`BusHandle::platform_init`] is called.
    pub fn new(clk: CLK, dio: DIO, stb: STB, delay: D) -> Self {
        Self {
            clk,
            dio,
            stb,
            delay,
        }
    }

    /// Give the pins and delay back to the caller
    pub fn release(self) -> (CLK, DIO, STB, D) {
        (self.clk, self.dio, self.stb, self.delay)
    }
}

impl<CLK, DIO, STB, D> BusHandle for PinBus<CLK, DIO, STB, D>
where
    CLK: OutputPin,
    DIO: FlexPin,
    STB: OutputPin,
    D: DelayUs,
{
    fn clock_write(&mut self, high: bool) {
        self.clk.set_state(high);
    }

    fn data_write(&mut self, high: bool) {
        self.dio.set_state(high);
    }

    fn data_read(&mut self) -> bool {
        self.dio.is_high()
    }

    fn data_configure_output(&mut self) {
        self.dio.set_as_output();
    }

    fn data_configure_input(&mut self) {
        self.dio.set_as_input();
    }

    fn strobe_write(&mut self, high: bool) {
        self.stb.set_state(high);
    }

    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    fn platform_init(&mut self) {
        // Idle bus: no transaction open, clock parked high
        self.stb.set_high();
        self.clk.set_high();
        self.dio.set_as_output();
        self.dio.set_high();
    }

    fn platform_deinit(&mut self) {
        self.stb.set_high();
        self.dio.set_as_input();
    }
}

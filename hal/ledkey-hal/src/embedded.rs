//! Adapters for `embedded-hal` 1.0 pins and delays
//!
//! Wrap chip HAL types so they can be fed to [`PinBus`](crate::PinBus):
//!
//! ```ignore
//! let bus = PinBus::new(
//!     EhOutput::new(clk),
//!     EhOpenDrain::new(dio),
//!     EhOutput::new(stb),
//!     EhDelay::new(delay),
//! );
//! ```
//!
//! Only pins with `Error = Infallible` are accepted. The bus has no error
//! path, and GPIO on every supported MCU is infallible anyway.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital;

use crate::delay::DelayUs;
use crate::gpio::{FlexPin, InputPin, OutputPin};

fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// Push-pull output pin (CLK, STB)
pub struct EhOutput<P>(P);

impl<P> EhOutput<P> {
    pub fn new(pin: P) -> Self {
        Self(pin)
    }

    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P> OutputPin for EhOutput<P>
where
    P: digital::OutputPin<Error = Infallible>,
{
    fn set_high(&mut self) {
        infallible(self.0.set_high());
    }

    fn set_low(&mut self) {
        infallible(self.0.set_low());
    }
}

/// Open-drain data pin (DIO) with an external or internal pull-up
///
/// An open-drain line needs no direction switch: releasing it high lets the
/// TM1638 pull it low while it shifts out key data.
pub struct EhOpenDrain<P>(P);

impl<P> EhOpenDrain<P> {
    pub fn new(pin: P) -> Self {
        Self(pin)
    }

    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P> OutputPin for EhOpenDrain<P>
where
    P: digital::OutputPin<Error = Infallible>,
{
    fn set_high(&mut self) {
        infallible(self.0.set_high());
    }

    fn set_low(&mut self) {
        infallible(self.0.set_low());
    }
}

impl<P> InputPin for EhOpenDrain<P>
where
    P: digital::InputPin<Error = Infallible>,
{
    fn is_high(&mut self) -> bool {
        infallible(self.0.is_high())
    }
}

impl<P> FlexPin for EhOpenDrain<P>
where
    P: digital::OutputPin<Error = Infallible> + digital::InputPin<Error = Infallible>,
{
    fn set_as_output(&mut self) {}

    fn set_as_input(&mut self) {
        infallible(self.0.set_high());
    }
}

/// Delay provider backed by `embedded_hal::delay::DelayNs`
pub struct EhDelay<D>(D);

impl<D> EhDelay<D> {
    pub fn new(delay: D) -> Self {
        Self(delay)
    }
}

impl<D: DelayNs> DelayUs for EhDelay<D> {
    fn delay_us(&mut self, us: u32) {
        self.0.delay_us(us);
    }
}

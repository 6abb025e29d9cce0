//! GPIO pin abstractions
//!
//! Provides traits for the digital pins that make up the 3-wire bus.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&mut self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}

/// Pin that switches direction at runtime
///
/// The TM1638 DIO line is written during command/data phases and read
/// during the key scan phase, so the pin must be reconfigurable.
pub trait FlexPin: OutputPin + InputPin {
    /// Switch the pin to output mode
    fn set_as_output(&mut self);

    /// Switch the pin to input mode
    fn set_as_input(&mut self);
}

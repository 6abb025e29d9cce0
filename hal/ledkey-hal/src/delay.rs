//! Blocking delay abstraction

/// Busy-wait delay in microseconds
///
/// The bus timing is driven entirely by these delays. Implementations must
/// block for at least the requested duration.
pub trait DelayUs {
    /// Block for `us` microseconds
    fn delay_us(&mut self, us: u32);
}

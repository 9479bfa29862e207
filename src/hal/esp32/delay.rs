//! Blocking delay backed by the FreeRTOS tick.

use crate::traits::Delay;
use embedded_hal::delay::DelayNs;
use esp_idf_hal::delay::FreeRtos;

/// FreeRTOS-based blocking delay.
///
/// Paces servo ramp steps by yielding to the FreeRTOS scheduler for the
/// requested duration. The control loop is single-threaded, so this stalls
/// the whole loop during a ramp, which is the intended behavior.
#[derive(Default)]
pub struct Esp32Delay;

impl Esp32Delay {
    /// Creates a new FreeRTOS delay instance.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Delay for Esp32Delay {
    fn delay_ms(&mut self, ms: u32) {
        FreeRtos.delay_ms(ms);
    }
}

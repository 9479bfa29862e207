//! UART control port implementation for ESP32.
//!
//! Carries the byte-oriented control protocol to the acquisition host:
//! single-character mode commands in, one status line per tick out.

use crate::traits::ControlPort;
use esp_idf_hal::uart::UartDriver;

/// UART-backed control port.
///
/// Wraps an initialized [`UartDriver`]. Reads are non-blocking (zero-tick
/// timeout); at most one byte is handed to the controller per tick, which
/// matches the one-command-per-tick contract.
///
/// # Example
///
/// ```ignore
/// use esp_idf_hal::uart::{config::Config, UartDriver};
/// use servo_latch::hal::esp32::Esp32Serial;
///
/// let uart = UartDriver::new(
///     peripherals.uart1,
///     peripherals.pins.gpio21, // TX
///     peripherals.pins.gpio20, // RX
///     Option::<AnyIOPin>::None,
///     Option::<AnyIOPin>::None,
///     &Config::default().baudrate(9600.Hz()),
/// )?;
/// let mut port = Esp32Serial::new(uart);
/// ```
pub struct Esp32Serial<'d> {
    uart: UartDriver<'d>,
}

impl<'d> Esp32Serial<'d> {
    /// Wraps an initialized UART driver.
    pub fn new(uart: UartDriver<'d>) -> Self {
        Self { uart }
    }
}

impl ControlPort for Esp32Serial<'_> {
    type Error = esp_idf_hal::sys::EspError;

    fn try_read(&mut self) -> Option<u8> {
        let mut buf = [0u8; 1];
        // Zero timeout: return immediately when nothing is pending
        match self.uart.read(&mut buf, 0) {
            Ok(1) => Some(buf[0]),
            _ => None,
        }
    }

    fn write_line(&mut self, line: &str) -> Result<(), Self::Error> {
        self.uart.write(line.as_bytes())?;
        self.uart.write(b"\n")?;
        Ok(())
    }
}

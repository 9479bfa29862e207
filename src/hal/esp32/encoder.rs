//! Quadrature encoder implementation for ESP32.
//!
//! The wheel encoder produces two phase-shifted signals (A and B). This
//! implementation uses polling-based decoding: on a rising edge of channel
//! A, the level of channel B gives the rotation direction.
//!
//! # Wiring
//!
//! - A → GPIO6
//! - B → GPIO7
//! - VCC → 3.3V
//! - GND → GND

use crate::traits::EncoderInput;
use esp_idf_hal::gpio::{Input, InputPin, OutputPin, PinDriver, Pull};
use esp_idf_hal::peripheral::Peripheral;

/// Polled quadrature encoder for ESP32.
///
/// Call [`sample()`](EncoderInput::sample) once per control loop tick; it
/// polls the lines and returns the accumulated absolute position. Edges
/// arriving between polls (or during a blocking servo ramp) are lost, which
/// the controller tolerates by thresholding deltas rather than counting
/// exact revolutions.
///
/// # Example
///
/// ```ignore
/// use servo_latch::hal::esp32::Esp32Encoder;
/// use servo_latch::traits::EncoderInput;
///
/// let peripherals = Peripherals::take()?;
/// let mut encoder = Esp32Encoder::new(
///     peripherals.pins.gpio6, // A
///     peripherals.pins.gpio7, // B
/// )?;
///
/// loop {
///     let position = encoder.sample();
///     println!("wheel at {}", position);
/// }
/// ```
pub struct Esp32Encoder<'d, A, B>
where
    A: InputPin + OutputPin,
    B: InputPin + OutputPin,
{
    /// Channel A input
    a: PinDriver<'d, A, Input>,
    /// Channel B input
    b: PinDriver<'d, B, Input>,
    /// Last A state for edge detection
    last_a: bool,
    /// Accumulated absolute position
    position: i32,
}

impl<'d, A, B> Esp32Encoder<'d, A, B>
where
    A: InputPin + OutputPin,
    B: InputPin + OutputPin,
{
    /// Creates a new quadrature encoder instance.
    ///
    /// Configures the GPIO pins with internal pull-up resistors (most
    /// encoder boards have open-drain outputs).
    ///
    /// # Errors
    ///
    /// Returns an error if GPIO initialization fails.
    pub fn new(
        a_pin: impl Peripheral<P = A> + 'd,
        b_pin: impl Peripheral<P = B> + 'd,
    ) -> Result<Self, esp_idf_hal::sys::EspError> {
        let mut a = PinDriver::input(a_pin)?;
        let mut b = PinDriver::input(b_pin)?;

        a.set_pull(Pull::Up)?;
        b.set_pull(Pull::Up)?;

        let last_a = a.is_high();

        Ok(Self {
            a,
            b,
            last_a,
            position: 0,
        })
    }

    /// Resets the position counter to zero.
    pub fn reset_position(&mut self) {
        self.position = 0;
    }
}

impl<A, B> EncoderInput for Esp32Encoder<'_, A, B>
where
    A: InputPin + OutputPin,
    B: InputPin + OutputPin,
{
    fn sample(&mut self) -> i32 {
        let a = self.a.is_high();
        let b = self.b.is_high();

        // Detect rising edge on A; B's level gives the direction
        if a && !self.last_a {
            if b {
                self.position -= 1;
            } else {
                self.position += 1;
            }
        }
        self.last_a = a;

        self.position
    }
}

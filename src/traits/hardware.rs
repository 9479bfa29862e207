//! Hardware abstraction traits for the servo actuator, encoder input, and timing.
//!
//! This module defines the hardware interfaces that allow servo-latch to run
//! across different platforms (ESP32, desktop mocks, etc.).
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`ServoActuator`] | PWM-driven hobby servo positioned by angle |
//! | [`EncoderInput`] | Quadrature encoder on the running wheel |
//! | [`Clock`] | Monotonic time source for `no_std` environments |
//! | [`Delay`] | Blocking delay used to pace servo ramps |
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations from
//! [`crate::hal::mock`]. For ESP32 hardware, use the implementations from
//! `hal::esp32` (requires the `esp32` feature).
//!
//! # Example
//!
//! ```rust
//! use servo_latch::traits::ServoActuator;
//! use servo_latch::hal::MockServo;
//!
//! let mut servo = MockServo::new();
//! servo.set_angle(90).unwrap();
//! assert_eq!(servo.angles, vec![90]);
//! ```

/// Servo actuator trait - abstracts a PWM-driven hobby servo.
///
/// Implement this trait for your servo output hardware. The controller
/// positions the latch by writing one angle per ramp step, so `set_angle`
/// is called once per degree during a transition.
///
/// # Implementation Notes
///
/// - Angles are degrees, typically 0-180 for an SG90-class servo
/// - The controller guarantees sequential, single-owner access; no locking
///   is needed inside an implementation
/// - Endpoint validity is the caller's responsibility; out-of-range angles
///   are not checked here
pub trait ServoActuator {
    /// Error type for actuation operations.
    type Error;

    /// Drive the servo to the given angle in degrees.
    fn set_angle(&mut self, angle: u8) -> Result<(), Self::Error>;

    /// Stop holding position (release torque), if the hardware supports it.
    ///
    /// Default implementation does nothing.
    fn disable(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Quadrature encoder input trait.
///
/// Abstracts the two-channel encoder attached to the monitored assembly.
/// One rotation direction increments the position, the other decrements it.
///
/// # Implementation Notes
///
/// - `sample()` should poll the quadrature lines and return the accumulated
///   absolute position; it must not block
/// - Missed or malformed edges simply fail to count - there is no recovery
///   path, the next tick re-evaluates from whatever position was captured
pub trait EncoderInput {
    /// Polls the encoder and returns the absolute accumulated position.
    fn sample(&mut self) -> i32;
}

/// Time source trait for `no_std` compatibility.
///
/// Provides monotonic time in milliseconds for the inactivity timer.
/// On desktop, this can wrap `std::time::Instant`. On embedded, use a
/// hardware timer.
///
/// # Example
///
/// ```rust
/// use servo_latch::traits::Clock;
/// use servo_latch::hal::MockClock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.advance(100);
/// assert_eq!(clock.now_ms(), 100);
/// ```
pub trait Clock {
    /// Returns current time in milliseconds since an arbitrary epoch.
    ///
    /// Must be monotonically increasing.
    fn now_ms(&self) -> u64;
}

/// Blocking delay trait used to pace servo ramps.
///
/// The ramp deliberately occupies the control loop for its full duration
/// (one delay per degree), so this is a plain blocking call rather than
/// an async one.
pub trait Delay {
    /// Block for the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestServo {
        last_angle: Option<u8>,
    }

    impl ServoActuator for TestServo {
        type Error = ();

        fn set_angle(&mut self, angle: u8) -> Result<(), ()> {
            self.last_angle = Some(angle);
            Ok(())
        }
    }

    #[test]
    fn servo_actuator_disable_default_impl() {
        let mut servo = TestServo { last_angle: None };
        servo.set_angle(42).unwrap();

        // Default disable() is a no-op and must not fail
        servo.disable().unwrap();

        assert_eq!(servo.last_angle, Some(42));
    }

    struct TestEncoder {
        position: i32,
    }

    impl EncoderInput for TestEncoder {
        fn sample(&mut self) -> i32 {
            self.position
        }
    }

    #[test]
    fn encoder_input_returns_position() {
        let mut encoder = TestEncoder { position: -7 };
        assert_eq!(encoder.sample(), -7);
        encoder.position = 12;
        assert_eq!(encoder.sample(), 12);
    }
}

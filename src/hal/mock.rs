//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for every hardware and I/O trait,
//! enabling development and testing on desktop without a servo, encoder,
//! or serial adapter.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockServo`] | [`ServoActuator`] | Records every angle written |
//! | [`MockEncoder`] | [`EncoderInput`] | Scriptable absolute position |
//! | [`MockPort`] | [`ControlPort`] | Queued command bytes, captured lines |
//! | [`MockClock`] | [`Clock`] | Controllable time source |
//! | [`MockDelay`] | [`Delay`] | Accumulates requested delay time |
//!
//! # Example
//!
//! ```rust
//! use servo_latch::{LatchConfig, LatchController};
//! use servo_latch::hal::{MockDelay, MockServo};
//!
//! let config = LatchConfig::default().with_inactivity_ms(1_000);
//! let mut controller = LatchController::new(MockServo::new(), MockDelay::new(), config);
//!
//! // Idle long enough: the latch engages with a full ramp
//! controller.tick(None, 0, 0).unwrap();
//! controller.tick(None, 0, 1_000).unwrap();
//!
//! let angles = &controller.motion().servo().angles;
//! assert_eq!(angles.first(), Some(&0));
//! assert_eq!(angles.last(), Some(&90));
//! ```
//!
//! [`ServoActuator`]: crate::traits::ServoActuator
//! [`EncoderInput`]: crate::traits::EncoderInput
//! [`ControlPort`]: crate::traits::ControlPort
//! [`Clock`]: crate::traits::Clock
//! [`Delay`]: crate::traits::Delay

use crate::traits::{Clock, ControlPort, Delay, EncoderInput, ServoActuator};

extern crate alloc;
use alloc::string::String;
use alloc::vec::Vec;

// ============================================================================
// Hardware Mocks
// ============================================================================

/// Mock servo for testing.
///
/// Records every angle written, in order, which makes ramp monotonicity
/// directly assertable. Can be configured to start failing after a number
/// of writes to test error propagation.
///
/// # Example
///
/// ```rust
/// use servo_latch::hal::MockServo;
/// use servo_latch::traits::ServoActuator;
///
/// let mut servo = MockServo::new();
/// servo.set_angle(10).unwrap();
/// servo.set_angle(11).unwrap();
///
/// assert_eq!(servo.angles, vec![10, 11]);
/// ```
#[derive(Debug, Default)]
pub struct MockServo {
    /// Every angle written, in call order.
    pub angles: Vec<u8>,
    /// Whether `disable()` has been called.
    pub disabled: bool,
    /// Fail writes once this many have succeeded, if set.
    fail_after: Option<usize>,
}

impl MockServo {
    /// Creates a new mock servo with no recorded writes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `set_angle` fail after `writes` successful calls.
    pub fn failing_after(mut self, writes: usize) -> Self {
        self.fail_after = Some(writes);
        self
    }

    /// The last angle written, if any.
    pub fn last_angle(&self) -> Option<u8> {
        self.angles.last().copied()
    }
}

impl ServoActuator for MockServo {
    type Error = ();

    fn set_angle(&mut self, angle: u8) -> Result<(), ()> {
        if let Some(limit) = self.fail_after {
            if self.angles.len() >= limit {
                return Err(());
            }
        }
        self.angles.push(angle);
        Ok(())
    }

    fn disable(&mut self) -> Result<(), ()> {
        self.disabled = true;
        Ok(())
    }
}

/// Mock encoder for testing.
///
/// Holds an absolute position that tests move directly, simulating wheel
/// rotation between ticks.
///
/// # Example
///
/// ```rust
/// use servo_latch::hal::MockEncoder;
/// use servo_latch::traits::EncoderInput;
///
/// let mut encoder = MockEncoder::new();
/// assert_eq!(encoder.sample(), 0);
///
/// encoder.turn(5);
/// encoder.turn(-2);
/// assert_eq!(encoder.sample(), 3);
/// ```
#[derive(Debug, Default)]
pub struct MockEncoder {
    position: i32,
}

impl MockEncoder {
    /// Creates a new mock encoder at position 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rotates the wheel by `delta` counts (negative = other direction).
    pub fn turn(&mut self, delta: i32) {
        self.position = self.position.wrapping_add(delta);
    }

    /// Sets the absolute position directly.
    pub fn set_position(&mut self, position: i32) {
        self.position = position;
    }
}

impl EncoderInput for MockEncoder {
    fn sample(&mut self) -> i32 {
        self.position
    }
}

/// Mock clock for testing.
///
/// Provides a controllable time source for testing the inactivity timer.
///
/// # Example
///
/// ```rust
/// use servo_latch::hal::MockClock;
/// use servo_latch::traits::Clock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.set(1000);
/// assert_eq!(clock.now_ms(), 1000);
///
/// clock.advance(500);
/// assert_eq!(clock.now_ms(), 1500);
/// ```
#[derive(Debug, Default)]
pub struct MockClock {
    current_ms: u64,
}

impl MockClock {
    /// Creates a new mock clock starting at 0ms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the current time in milliseconds.
    pub fn set(&mut self, ms: u64) {
        self.current_ms = ms;
    }

    /// Advances the clock by the given duration.
    pub fn advance(&mut self, ms: u64) {
        self.current_ms += ms;
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.current_ms
    }
}

/// Mock delay for testing.
///
/// Does not sleep; accumulates the requested milliseconds so tests can
/// assert total ramp duration and step pacing.
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Sum of all requested delays in milliseconds.
    pub total_ms: u64,
    /// Number of delay calls.
    pub calls: usize,
}

impl MockDelay {
    /// Creates a new mock delay with no accumulated time.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Delay for MockDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += u64::from(ms);
        self.calls += 1;
    }
}

// ============================================================================
// I/O Mocks
// ============================================================================

/// Mock control port for testing.
///
/// Queue incoming command bytes and inspect emitted status lines.
///
/// # Example
///
/// ```rust
/// use servo_latch::hal::MockPort;
/// use servo_latch::traits::ControlPort;
///
/// let mut port = MockPort::new();
/// port.queue_byte(b'b');
///
/// assert_eq!(port.try_read(), Some(b'b'));
/// assert_eq!(port.try_read(), None);
///
/// port.write_line("0;0;locked").unwrap();
/// assert_eq!(port.lines, vec!["0;0;locked"]);
/// ```
#[derive(Debug, Default)]
pub struct MockPort {
    incoming: Vec<u8>,
    /// Every status line written.
    pub lines: Vec<String>,
    /// When set, `write_line` fails (simulates a broken channel).
    pub fail_writes: bool,
}

impl MockPort {
    /// Creates a new mock port with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a single incoming byte.
    pub fn queue_byte(&mut self, byte: u8) {
        self.incoming.push(byte);
    }

    /// Queue several incoming bytes, delivered in order.
    pub fn queue_bytes(&mut self, bytes: &[u8]) {
        self.incoming.extend_from_slice(bytes);
    }

    /// Number of bytes still pending.
    pub fn pending(&self) -> usize {
        self.incoming.len()
    }
}

impl ControlPort for MockPort {
    type Error = ();

    fn try_read(&mut self) -> Option<u8> {
        if self.incoming.is_empty() {
            None
        } else {
            Some(self.incoming.remove(0))
        }
    }

    fn write_line(&mut self, line: &str) -> Result<(), ()> {
        if self.fail_writes {
            return Err(());
        }
        self.lines.push(line.into());
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // MockServo Tests
    // =========================================================================

    #[test]
    fn mock_servo_default() {
        let servo = MockServo::new();
        assert!(servo.angles.is_empty());
        assert!(!servo.disabled);
        assert_eq!(servo.last_angle(), None);
    }

    #[test]
    fn mock_servo_records_writes_in_order() {
        let mut servo = MockServo::new();
        servo.set_angle(10).unwrap();
        servo.set_angle(20).unwrap();
        servo.set_angle(15).unwrap();

        assert_eq!(servo.angles, vec![10, 20, 15]);
        assert_eq!(servo.last_angle(), Some(15));
    }

    #[test]
    fn mock_servo_disable() {
        let mut servo = MockServo::new();
        servo.disable().unwrap();
        assert!(servo.disabled);
    }

    #[test]
    fn mock_servo_failing_after() {
        let mut servo = MockServo::new().failing_after(1);
        assert!(servo.set_angle(1).is_ok());
        assert!(servo.set_angle(2).is_err());
        assert_eq!(servo.angles, vec![1]);
    }

    // =========================================================================
    // MockEncoder Tests
    // =========================================================================

    #[test]
    fn mock_encoder_default() {
        let mut encoder = MockEncoder::new();
        assert_eq!(encoder.sample(), 0);
    }

    #[test]
    fn mock_encoder_turn_accumulates() {
        let mut encoder = MockEncoder::new();
        encoder.turn(5);
        encoder.turn(3);
        assert_eq!(encoder.sample(), 8);

        encoder.turn(-10);
        assert_eq!(encoder.sample(), -2);
    }

    #[test]
    fn mock_encoder_set_position() {
        let mut encoder = MockEncoder::new();
        encoder.set_position(-42);
        assert_eq!(encoder.sample(), -42);
    }

    // =========================================================================
    // MockClock Tests
    // =========================================================================

    #[test]
    fn mock_clock_default() {
        let clock = MockClock::new();
        assert_eq!(clock.now_ms(), 0);
    }

    #[test]
    fn mock_clock_set_and_advance() {
        let mut clock = MockClock::new();
        clock.set(1000);
        assert_eq!(clock.now_ms(), 1000);
        clock.advance(250);
        assert_eq!(clock.now_ms(), 1250);
    }

    // =========================================================================
    // MockDelay Tests
    // =========================================================================

    #[test]
    fn mock_delay_accumulates() {
        let mut delay = MockDelay::new();
        delay.delay_ms(15);
        delay.delay_ms(5);
        assert_eq!(delay.total_ms, 20);
        assert_eq!(delay.calls, 2);
    }

    // =========================================================================
    // MockPort Tests
    // =========================================================================

    #[test]
    fn mock_port_default() {
        let mut port = MockPort::new();
        assert_eq!(port.try_read(), None);
        assert!(port.lines.is_empty());
        assert_eq!(port.pending(), 0);
    }

    #[test]
    fn mock_port_bytes_fifo() {
        let mut port = MockPort::new();
        port.queue_bytes(b"abc");

        assert_eq!(port.try_read(), Some(b'a'));
        assert_eq!(port.try_read(), Some(b'b'));
        assert_eq!(port.try_read(), Some(b'c'));
        assert_eq!(port.try_read(), None);
    }

    #[test]
    fn mock_port_captures_lines() {
        let mut port = MockPort::new();
        port.write_line("1;42;automatic").unwrap();
        port.write_line("0;42;locked").unwrap();

        assert_eq!(port.lines, vec!["1;42;automatic", "0;42;locked"]);
    }

    #[test]
    fn mock_port_failing_writes() {
        let mut port = MockPort::new();
        port.fail_writes = true;
        assert!(port.write_line("0;0;automatic").is_err());
        assert!(port.lines.is_empty());
    }
}

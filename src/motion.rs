//! Servo motion execution: monotonic one-degree ramps with per-direction pacing.
//!
//! A latch transition is executed as a [`Ramp`]: every integral angle between
//! the current angle and the target, inclusive, visited in order with a fixed
//! per-step delay. The delay differs by direction, so engaging the latch can
//! be slower (gentler) than releasing it, or vice versa.
//!
//! The default execution path, [`MotionDriver::move_to`], blocks the calling
//! loop for the whole ramp - the faithful behavior of the original control
//! loop, which suspends encoder sampling and command reads while the servo
//! travels. For callers that want to keep ticking during motion, the driver
//! also exposes a resumable [`begin`](MotionDriver::begin) /
//! [`service`](MotionDriver::service) interface that advances one degree per
//! call and leaves pacing to the caller.
//!
//! # Example
//!
//! ```rust
//! use servo_latch::MotionDriver;
//! use servo_latch::hal::{MockDelay, MockServo};
//!
//! let mut driver = MotionDriver::new(MockServo::new(), MockDelay::new(), 100, 15, 5);
//! driver.move_to(103).unwrap();
//!
//! assert_eq!(driver.servo().angles, vec![100, 101, 102, 103]);
//! assert_eq!(driver.angle(), 103);
//! ```

use crate::traits::{Delay, ServoActuator};

/// Direction of a latch transition, for reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LatchMotion {
    /// Ramp toward the lock-target angle.
    Engage,
    /// Ramp toward the rest angle.
    Release,
}

/// Monotonic angle sequence from a start angle to a target, inclusive.
///
/// Yields every integral degree in order, rising or falling, with no skips,
/// repeats, or direction reversals. A ramp whose endpoints coincide yields
/// that single angle once (the servo position is re-asserted).
///
/// # Example
///
/// ```rust
/// use servo_latch::Ramp;
///
/// let angles: Vec<u8> = Ramp::new(150, 147).collect();
/// assert_eq!(angles, vec![150, 149, 148, 147]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Ramp {
    next: u8,
    target: u8,
    rising: bool,
    done: bool,
}

impl Ramp {
    /// Creates a ramp covering `from..=to` in whichever direction applies.
    pub fn new(from: u8, to: u8) -> Self {
        Self {
            next: from,
            target: to,
            rising: to >= from,
            done: false,
        }
    }

    /// The final angle this ramp will reach.
    #[inline]
    pub fn target(&self) -> u8 {
        self.target
    }

    /// Number of angles still to be yielded.
    pub fn remaining(&self) -> usize {
        if self.done {
            return 0;
        }
        let span = if self.rising {
            self.target - self.next
        } else {
            self.next - self.target
        };
        usize::from(span) + 1
    }
}

impl Iterator for Ramp {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.done {
            return None;
        }
        let current = self.next;
        if current == self.target {
            self.done = true;
        } else if self.rising {
            self.next += 1;
        } else {
            self.next -= 1;
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Ramp {}

/// Executes latch transitions against a servo actuator.
///
/// Owns the servo and the controller's believed angle; every transition
/// passes through here sequentially, so there is never more than one
/// in-flight motion by construction.
///
/// # Type Parameters
///
/// - `S`: servo actuator implementation ([`ServoActuator`])
/// - `D`: delay provider that paces the blocking ramp ([`Delay`])
#[derive(Debug)]
pub struct MotionDriver<S: ServoActuator, D: Delay> {
    servo: S,
    delay: D,
    angle: u8,
    /// Per-degree delay when the angle is increasing.
    rising_step_ms: u32,
    /// Per-degree delay when the angle is decreasing.
    falling_step_ms: u32,
    pending: Option<Ramp>,
}

impl<S: ServoActuator, D: Delay> MotionDriver<S, D> {
    /// Creates a driver with the servo believed to sit at `start_angle`.
    ///
    /// No I/O happens here; call [`engage_angle`](Self::engage_angle) once at
    /// startup to assert the physical position.
    pub fn new(
        servo: S,
        delay: D,
        start_angle: u8,
        rising_step_ms: u32,
        falling_step_ms: u32,
    ) -> Self {
        Self {
            servo,
            delay,
            angle: start_angle,
            rising_step_ms,
            falling_step_ms,
            pending: None,
        }
    }

    /// Writes the believed angle to the servo once, without ramping.
    ///
    /// Used at startup to put the physical servo where the controller
    /// believes it is.
    pub fn engage_angle(&mut self) -> Result<(), S::Error> {
        self.servo.set_angle(self.angle)
    }

    /// Drives the servo to `target`, blocking until the ramp completes.
    ///
    /// Visits every integral angle from the current angle to `target`,
    /// inclusive, one degree per step, delaying after each write by the
    /// per-step delay for the ramp's direction. Once started the ramp
    /// always runs to completion; there is no cancellation.
    pub fn move_to(&mut self, target: u8) -> Result<(), S::Error> {
        let step_ms = self.step_ms_toward(target);
        self.begin(target);
        while self.service()?.is_some() {
            self.delay.delay_ms(step_ms);
        }
        Ok(())
    }

    /// Starts a resumable ramp toward `target` without executing any step.
    ///
    /// Replaces any ramp previously started this way. Use
    /// [`service`](Self::service) to advance one degree at a time; the
    /// caller is responsible for pacing between calls (see
    /// [`step_ms_toward`](Self::step_ms_toward)).
    pub fn begin(&mut self, target: u8) {
        self.pending = Some(Ramp::new(self.angle, target));
    }

    /// Advances an in-flight ramp by one degree.
    ///
    /// Returns `Ok(Some(angle))` after writing the next angle, or `Ok(None)`
    /// when no ramp is pending or the pending ramp is exhausted.
    pub fn service(&mut self) -> Result<Option<u8>, S::Error> {
        let Some(ramp) = self.pending.as_mut() else {
            return Ok(None);
        };
        match ramp.next() {
            Some(angle) => {
                self.servo.set_angle(angle)?;
                self.angle = angle;
                Ok(Some(angle))
            }
            None => {
                self.pending = None;
                Ok(None)
            }
        }
    }

    /// Whether a resumable ramp still has steps (or a trailing drain) left.
    #[inline]
    pub fn is_ramping(&self) -> bool {
        self.pending.is_some()
    }

    /// The per-step delay that a ramp from the current angle toward
    /// `target` would use.
    #[inline]
    pub fn step_ms_toward(&self, target: u8) -> u32 {
        if target >= self.angle {
            self.rising_step_ms
        } else {
            self.falling_step_ms
        }
    }

    /// The controller's believed current servo angle.
    #[inline]
    pub fn angle(&self) -> u8 {
        self.angle
    }

    /// Access the underlying servo.
    pub fn servo(&self) -> &S {
        &self.servo
    }

    /// Mutable access to the underlying servo.
    pub fn servo_mut(&mut self) -> &mut S {
        &mut self.servo
    }

    /// Access the delay provider.
    pub fn delay(&self) -> &D {
        &self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{MockDelay, MockServo};

    fn driver(start: u8) -> MotionDriver<MockServo, MockDelay> {
        MotionDriver::new(MockServo::new(), MockDelay::new(), start, 15, 5)
    }

    #[test]
    fn ramp_rising_inclusive() {
        let angles: Vec<u8> = Ramp::new(100, 150).collect();
        assert_eq!(angles.len(), 51);
        assert_eq!(angles.first(), Some(&100));
        assert_eq!(angles.last(), Some(&150));
        assert!(angles.windows(2).all(|w| w[1] == w[0] + 1));
    }

    #[test]
    fn ramp_falling_inclusive() {
        let angles: Vec<u8> = Ramp::new(150, 100).collect();
        assert_eq!(angles.len(), 51);
        assert_eq!(angles.first(), Some(&150));
        assert_eq!(angles.last(), Some(&100));
        assert!(angles.windows(2).all(|w| w[1] == w[0] - 1));
    }

    #[test]
    fn ramp_degenerate_yields_single_angle() {
        let angles: Vec<u8> = Ramp::new(90, 90).collect();
        assert_eq!(angles, vec![90]);
    }

    #[test]
    fn ramp_len() {
        assert_eq!(Ramp::new(0, 180).len(), 181);
        assert_eq!(Ramp::new(10, 10).len(), 1);
        let mut ramp = Ramp::new(5, 3);
        assert_eq!(ramp.len(), 3);
        ramp.next();
        assert_eq!(ramp.len(), 2);
    }

    #[test]
    fn ramp_endpoints_at_servo_limits() {
        let angles: Vec<u8> = Ramp::new(0, 2).collect();
        assert_eq!(angles, vec![0, 1, 2]);
        let angles: Vec<u8> = Ramp::new(180, 178).collect();
        assert_eq!(angles, vec![180, 179, 178]);
    }

    #[test]
    fn move_to_writes_every_angle() {
        let mut driver = driver(100);
        driver.move_to(150).unwrap();

        let angles = &driver.servo().angles;
        assert_eq!(angles.len(), 51);
        assert_eq!(angles[0], 100);
        assert_eq!(*angles.last().unwrap(), 150);
        assert!(angles.windows(2).all(|w| w[1] == w[0] + 1));
        assert_eq!(driver.angle(), 150);
    }

    #[test]
    fn move_to_paces_by_direction() {
        let mut driver = driver(10);

        // Rising: 15ms per degree, 11 steps
        driver.move_to(20).unwrap();
        assert_eq!(driver.delay.total_ms, 11 * 15);

        // Falling: 5ms per degree, 11 steps
        driver.delay.total_ms = 0;
        driver.move_to(10).unwrap();
        assert_eq!(driver.delay.total_ms, 11 * 5);
    }

    #[test]
    fn begin_and_service_step_one_degree_per_call() {
        let mut driver = driver(0);
        driver.begin(2);

        assert!(driver.is_ramping());
        assert_eq!(driver.service().unwrap(), Some(0));
        assert_eq!(driver.service().unwrap(), Some(1));
        assert_eq!(driver.service().unwrap(), Some(2));
        assert_eq!(driver.service().unwrap(), None);
        assert!(!driver.is_ramping());
        assert_eq!(driver.angle(), 2);
    }

    #[test]
    fn service_without_ramp_is_noop() {
        let mut driver = driver(45);
        assert_eq!(driver.service().unwrap(), None);
        assert!(driver.servo().angles.is_empty());
    }

    #[test]
    fn step_ms_toward_picks_direction() {
        let driver = driver(90);
        assert_eq!(driver.step_ms_toward(120), 15);
        assert_eq!(driver.step_ms_toward(60), 5);
        // Equal target counts as rising (single re-assert step)
        assert_eq!(driver.step_ms_toward(90), 15);
    }

    #[test]
    fn engage_angle_asserts_position_once() {
        let mut driver = driver(30);
        driver.engage_angle().unwrap();
        assert_eq!(driver.servo().angles, vec![30]);
    }

    #[test]
    fn servo_error_propagates_and_stops_ramp() {
        let servo = MockServo::new().failing_after(2);
        let mut driver = MotionDriver::new(servo, MockDelay::new(), 0, 1, 1);

        assert!(driver.move_to(10).is_err());
        // Two writes landed before the fault
        assert_eq!(driver.servo().angles, vec![0, 1]);
    }
}

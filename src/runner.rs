//! The control loop: ties the port, encoder, clock, and controller together.
//!
//! One [`run_tick`](ControlLoop::run_tick) performs the full per-tick flow:
//! read at most one command byte, sample the encoder, evaluate the lock
//! state machine (executing any servo ramp inline), and emit the status
//! line. Pacing between ticks is left to the caller, which typically sleeps
//! for [`LatchConfig::loop_interval_ms`](crate::LatchConfig::loop_interval_ms)
//! between calls.
//!
//! # Example
//!
//! ```rust
//! use servo_latch::{ControlLoop, LatchConfig, LatchController};
//! use servo_latch::hal::{MockClock, MockDelay, MockEncoder, MockPort, MockServo};
//!
//! let controller =
//!     LatchController::new(MockServo::new(), MockDelay::new(), LatchConfig::default());
//! let mut control_loop = ControlLoop::new(
//!     controller,
//!     MockEncoder::new(),
//!     MockPort::new(),
//!     MockClock::new(),
//! );
//!
//! let report = control_loop.run_tick().unwrap();
//! assert_eq!(control_loop.port().lines, vec!["0;0;automatic"]);
//! assert!(report.motion.is_none());
//! ```

use crate::latch::{LatchController, TickReport};
use crate::traits::{Clock, ControlPort, Delay, EncoderInput, ServoActuator};

/// Single-threaded cooperative control loop.
///
/// There is exactly one execution context, so no locking is involved
/// anywhere; the only suspension point is the blocking servo ramp inside
/// the controller, which stalls command reads and encoder sampling for the
/// ramp's wall-clock duration. Events arriving mid-ramp are simply picked
/// up (or lost, for encoder edges) on the next tick.
pub struct ControlLoop<S, D, E, P, C>
where
    S: ServoActuator,
    D: Delay,
    E: EncoderInput,
    P: ControlPort,
    C: Clock,
{
    controller: LatchController<S, D>,
    encoder: E,
    port: P,
    clock: C,
}

impl<S, D, E, P, C> ControlLoop<S, D, E, P, C>
where
    S: ServoActuator,
    D: Delay,
    E: EncoderInput,
    P: ControlPort,
    C: Clock,
{
    /// Assembles a control loop from its collaborators.
    pub fn new(controller: LatchController<S, D>, encoder: E, port: P, clock: C) -> Self {
        Self {
            controller,
            encoder,
            port,
            clock,
        }
    }

    /// Runs one full tick and emits the status line.
    ///
    /// Only servo actuation can fail; a port write failure is swallowed
    /// because an absent or broken serial channel just degrades the system
    /// to automatic-only operation.
    pub fn run_tick(&mut self) -> Result<TickReport, S::Error> {
        let command = self.port.try_read();
        let position = self.encoder.sample();
        let now_ms = self.clock.now_ms();

        let report = self.controller.tick(command, position, now_ms)?;

        // Status loss is tolerated; the channel may be absent entirely
        let _ = self.port.write_line(report.status_line().as_str());

        Ok(report)
    }

    /// Access the controller.
    pub fn controller(&self) -> &LatchController<S, D> {
        &self.controller
    }

    /// Mutable access to the controller.
    pub fn controller_mut(&mut self) -> &mut LatchController<S, D> {
        &mut self.controller
    }

    /// Access the encoder.
    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Mutable access to the encoder.
    pub fn encoder_mut(&mut self) -> &mut E {
        &mut self.encoder
    }

    /// Access the control port.
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Mutable access to the control port.
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Access the clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable access to the clock.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::OperatingMode;
    use crate::config::LatchConfig;
    use crate::hal::{MockClock, MockDelay, MockEncoder, MockPort, MockServo};

    fn control_loop() -> ControlLoop<MockServo, MockDelay, MockEncoder, MockPort, MockClock> {
        let config = LatchConfig::default()
            .with_angles(0, 90)
            .with_position_threshold(2)
            .with_inactivity_ms(1_000);
        let controller = LatchController::new(MockServo::new(), MockDelay::new(), config);
        ControlLoop::new(
            controller,
            MockEncoder::new(),
            MockPort::new(),
            MockClock::new(),
        )
    }

    #[test]
    fn tick_emits_status_line() {
        let mut control_loop = control_loop();
        control_loop.run_tick().unwrap();

        assert_eq!(control_loop.port().lines, vec!["0;0;automatic"]);
    }

    #[test]
    fn tick_consumes_one_command_byte() {
        let mut control_loop = control_loop();
        control_loop.port_mut().queue_bytes(b"bc");

        control_loop.run_tick().unwrap();
        assert_eq!(
            control_loop.controller().mode(),
            OperatingMode::ForcedLocked
        );

        control_loop.clock_mut().advance(20);
        control_loop.run_tick().unwrap();
        assert_eq!(
            control_loop.controller().mode(),
            OperatingMode::ForcedUnlocked
        );
    }

    #[test]
    fn movement_flag_reflects_encoder_delta() {
        let mut control_loop = control_loop();
        control_loop.run_tick().unwrap();

        control_loop.encoder_mut().turn(5);
        control_loop.clock_mut().advance(20);
        let report = control_loop.run_tick().unwrap();

        assert!(report.moved);
        assert_eq!(control_loop.port().lines.last().unwrap(), "1;5;automatic");
    }

    #[test]
    fn broken_port_does_not_stop_the_loop() {
        let mut control_loop = control_loop();
        control_loop.port_mut().fail_writes = true;

        // Loop keeps running and automatic locking still works
        control_loop.run_tick().unwrap();
        control_loop.clock_mut().set(1_000);
        let report = control_loop.run_tick().unwrap();

        assert!(report.motion.is_some());
        assert_eq!(control_loop.controller().angle(), 90);
        assert!(control_loop.port().lines.is_empty());
    }
}

//! Lock state machine: decides, every tick, whether the servo must move.
//!
//! This module provides [`LatchController`], the central component that
//! combines the operating mode, the activity monitor, and the motion driver.
//!
//! # Overview
//!
//! Once per tick the controller:
//! - Decodes at most one pending command byte into a mode selection
//! - Feeds the current encoder position to the activity monitor
//! - Evaluates the transition rules in priority order and, when one fires,
//!   executes the servo ramp before returning
//! - Reports what happened as a [`TickReport`], from which the status line
//!   is rendered
//!
//! # Transition rules (priority order)
//!
//! 1. Automatic, movement detected, latch targeted: ramp back to the rest
//!    angle and clear the targeted flag.
//! 2. Automatic, inactive, not targeted: ramp to the lock-target angle and
//!    set the targeted flag.
//! 3. Mode edge to `ForcedLocked`: ramp to the lock-target angle.
//! 4. Mode edge to `ForcedUnlocked`: ramp to the rest angle.
//! 5. Mode edge to `Automatic`: record the edge only; rules 1-2 drive any
//!    motion from activity.
//!
//! Forced transitions are edge-triggered: repeating a command while the mode
//! is unchanged issues no motion. The machine has no terminal state.
//!
//! # Example
//!
//! ```rust
//! use servo_latch::{LatchConfig, LatchController, OperatingMode};
//! use servo_latch::hal::{MockDelay, MockServo};
//!
//! let config = LatchConfig::default().with_angles(0, 90);
//! let mut controller = LatchController::new(MockServo::new(), MockDelay::new(), config);
//!
//! // Force the latch closed
//! let report = controller.tick(Some(b'b'), 0, 0).unwrap();
//! assert_eq!(report.mode, OperatingMode::ForcedLocked);
//! assert_eq!(controller.angle(), 90);
//!
//! // Repeating the command is a no-op
//! let report = controller.tick(Some(b'b'), 0, 20).unwrap();
//! assert!(report.motion.is_none());
//! ```

use core::fmt::Write;

use crate::activity::ActivityMonitor;
use crate::commands::OperatingMode;
use crate::config::LatchConfig;
use crate::motion::{LatchMotion, MotionDriver};
use crate::traits::{Delay, ServoActuator};

/// Fixed-capacity status line buffer.
///
/// Worst case is `1;-2147483648;automatic` (22 bytes); 32 leaves headroom.
pub type StatusLine = heapless::String<32>;

/// What one evaluation tick observed and did.
#[derive(Clone, Copy, Debug)]
pub struct TickReport {
    /// A qualifying encoder delta was observed on this tick.
    pub moved: bool,
    /// Activity state after this tick.
    pub active: bool,
    /// Raw encoder position sampled for this tick.
    pub position: i32,
    /// Operating mode after command decoding.
    pub mode: OperatingMode,
    /// Servo motion executed on this tick, if any.
    pub motion: Option<LatchMotion>,
}

impl TickReport {
    /// Renders the per-tick status line: `<flag>;<position>;<label>`.
    ///
    /// The flag is `1` only on a tick where movement was detected.
    ///
    /// # Example
    ///
    /// ```rust
    /// use servo_latch::{OperatingMode, TickReport};
    ///
    /// let report = TickReport {
    ///     moved: true,
    ///     active: true,
    ///     position: 42,
    ///     mode: OperatingMode::Automatic,
    ///     motion: None,
    /// };
    /// assert_eq!(report.status_line().as_str(), "1;42;automatic");
    /// ```
    pub fn status_line(&self) -> StatusLine {
        let mut line = StatusLine::new();
        // Cannot overflow the buffer; see the StatusLine capacity note
        let _ = write!(
            line,
            "{};{};{}",
            u8::from(self.moved),
            self.position,
            self.mode.as_str()
        );
        line
    }
}

/// State snapshot for UI or telemetry.
///
/// # Example
///
/// ```rust
/// use servo_latch::{LatchConfig, LatchController, OperatingMode};
/// use servo_latch::hal::{MockDelay, MockServo};
///
/// let controller =
///     LatchController::new(MockServo::new(), MockDelay::new(), LatchConfig::default());
///
/// let state = controller.state();
/// assert_eq!(state.mode, OperatingMode::Automatic);
/// assert!(!state.targeted);
/// ```
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatchState {
    /// Believed servo angle in degrees.
    pub angle: u8,
    /// Current operating mode.
    pub mode: OperatingMode,
    /// Whether the inactivity lock ramp has been issued and not yet revisited.
    pub targeted: bool,
    /// Whether the assembly is currently considered active.
    pub active: bool,
    /// Encoder position at the last qualifying movement.
    pub last_seen_position: i32,
}

/// The lock state machine.
///
/// Owns all mutable control state: mode, previous mode, the targeted flag,
/// the activity monitor, and the motion driver (which in turn owns the servo
/// and the believed angle). Everything runs in a single execution context;
/// the only suspension point is the blocking ramp inside
/// [`MotionDriver::move_to`], which stalls the whole loop by design.
///
/// # Type Parameters
///
/// - `S`: servo actuator implementation ([`ServoActuator`])
/// - `D`: delay provider for ramp pacing ([`Delay`])
pub struct LatchController<S: ServoActuator, D: Delay> {
    motion: MotionDriver<S, D>,
    activity: ActivityMonitor,
    config: LatchConfig,
    mode: OperatingMode,
    /// Last mode for which a forced transition was already executed.
    previous_mode: OperatingMode,
    /// Set once the inactivity lock ramp has been issued, so idle ticks do
    /// not re-issue it.
    targeted: bool,
}

impl<S: ServoActuator, D: Delay> LatchController<S, D> {
    /// Creates a controller with the servo believed to sit at the rest angle.
    pub fn new(servo: S, delay: D, config: LatchConfig) -> Self {
        Self {
            motion: MotionDriver::new(
                servo,
                delay,
                config.rest_angle,
                config.rising_step_ms,
                config.falling_step_ms,
            ),
            activity: ActivityMonitor::new(config.position_threshold, config.inactivity_ms),
            config,
            mode: OperatingMode::Automatic,
            previous_mode: OperatingMode::Automatic,
            targeted: false,
        }
    }

    /// Asserts the rest angle on the physical servo once, at startup.
    pub fn initialize(&mut self) -> Result<(), S::Error> {
        self.motion.engage_angle()
    }

    /// Runs one evaluation tick.
    ///
    /// `command` is the pending byte from the control channel, if any;
    /// `position` is the absolute encoder position; `now_ms` the monotonic
    /// time. When a transition rule fires, the servo ramp executes inside
    /// this call and the calling loop is blocked for its duration.
    pub fn tick(
        &mut self,
        command: Option<u8>,
        position: i32,
        now_ms: u64,
    ) -> Result<TickReport, S::Error> {
        // Unrecognized bytes (and no byte at all) leave the mode unchanged
        if let Some(mode) = command.and_then(OperatingMode::from_command) {
            self.mode = mode;
        }

        let sample = self.activity.update(position, now_ms);
        let mut motion = None;

        if self.mode == OperatingMode::Automatic {
            if sample.moved && self.targeted {
                // Rule 1: movement resumed, release the latch
                self.motion.move_to(self.config.rest_angle)?;
                self.targeted = false;
                motion = Some(LatchMotion::Release);
            } else if !sample.active && !self.targeted {
                // Rule 2: long enough idle, engage the latch
                self.motion.move_to(self.config.lock_angle)?;
                self.targeted = true;
                motion = Some(LatchMotion::Engage);
            }
        } else if sample.moved && self.targeted {
            // Movement invalidates a standing inactivity target even under a
            // forced mode, so re-entering Automatic revisits the decision.
            self.targeted = false;
        }

        // Rules 3-5: act on mode edges exactly once
        if self.mode != self.previous_mode {
            match self.mode {
                OperatingMode::ForcedLocked => {
                    self.motion.move_to(self.config.lock_angle)?;
                    motion = Some(LatchMotion::Engage);
                }
                OperatingMode::ForcedUnlocked => {
                    self.motion.move_to(self.config.rest_angle)?;
                    motion = Some(LatchMotion::Release);
                }
                OperatingMode::Automatic => {}
            }
            self.previous_mode = self.mode;
        }

        Ok(TickReport {
            moved: sample.moved,
            active: sample.active,
            position,
            mode: self.mode,
            motion,
        })
    }

    /// Current state snapshot for UI or telemetry.
    pub fn state(&self) -> LatchState {
        LatchState {
            angle: self.motion.angle(),
            mode: self.mode,
            targeted: self.targeted,
            active: self.activity.is_active(),
            last_seen_position: self.activity.last_seen_position(),
        }
    }

    /// The believed servo angle in degrees.
    #[inline]
    pub fn angle(&self) -> u8 {
        self.motion.angle()
    }

    /// The current operating mode.
    #[inline]
    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// Whether the inactivity lock target is currently standing.
    #[inline]
    pub fn is_targeted(&self) -> bool {
        self.targeted
    }

    /// The active configuration.
    pub fn config(&self) -> &LatchConfig {
        &self.config
    }

    /// Access the motion driver (and through it the servo).
    pub fn motion(&self) -> &MotionDriver<S, D> {
        &self.motion
    }

    /// Mutable access to the motion driver.
    pub fn motion_mut(&mut self) -> &mut MotionDriver<S, D> {
        &mut self.motion
    }
}

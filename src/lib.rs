//! # servo-latch
//!
//! An activity-driven servo latch controller for a running-wheel lock,
//! with a manual override over a serial link.
//!
//! ## Features
//!
//! - **Hardware abstraction**: Traits for servo actuation, quadrature
//!   encoder input, serial control, and timing
//! - **Activity detection**: position-delta threshold plus inactivity timer
//!   with a hysteresis band to tolerate encoder jitter
//! - **Edge-triggered overrides**: forced lock/unlock commands act exactly
//!   once per mode change, never re-issued on repeats
//! - **Monotonic ramps**: servo transitions visit every degree between the
//!   endpoints at a direction-dependent step rate
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Hardware and serial-channel abstractions
//! - `commands` - Operating modes and command byte decoding
//! - `activity` - Movement detection and inactivity timing
//! - `motion` - Ramp execution against the servo
//! - `latch` - The lock state machine that ties everything together
//! - `runner` - The per-tick control loop
//! - `hal` - Concrete implementations (mock for testing, esp32 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use servo_latch::{ControlLoop, LatchConfig, LatchController};
//! use servo_latch::hal::{MockClock, MockDelay, MockEncoder, MockPort, MockServo};
//!
//! let config = LatchConfig::default()
//!     .with_angles(0, 90)
//!     .with_inactivity_ms(30_000);
//!
//! let controller = LatchController::new(MockServo::new(), MockDelay::new(), config);
//! let mut control_loop = ControlLoop::new(
//!     controller,
//!     MockEncoder::new(),
//!     MockPort::new(),
//!     MockClock::new(),
//! );
//!
//! // One tick: read command, sample encoder, evaluate, emit status
//! let report = control_loop.run_tick().unwrap();
//! assert_eq!(report.status_line().as_str(), "0;0;automatic");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Movement detection and inactivity timing.
pub mod activity;
/// Operating modes and serial command decoding.
pub mod commands;
/// Latch controller configuration.
pub mod config;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// The lock state machine and per-tick reporting.
pub mod latch;
/// Servo ramp execution.
pub mod motion;
/// The control loop tying port, encoder, clock, and controller together.
pub mod runner;
/// Core traits for hardware abstraction and the control channel.
pub mod traits;

// Re-exports for convenience
pub use activity::{ActivityMonitor, ActivitySample};
pub use commands::OperatingMode;
pub use config::LatchConfig;
pub use latch::{LatchController, LatchState, StatusLine, TickReport};
pub use motion::{LatchMotion, MotionDriver, Ramp};
pub use runner::ControlLoop;
pub use traits::{Clock, ControlPort, Delay, EncoderInput, ServoActuator};

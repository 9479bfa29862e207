//! Trait definitions for hardware abstraction and the serial control channel.
//!
//! This module defines the core abstractions that allow servo-latch to:
//! - Run on different hardware (ESP32, desktop mock)
//! - Be exercised end-to-end in tests without a servo, encoder, or UART
//!
//! # Submodules
//!
//! - `hardware`: Servo actuation, encoder input, clock, delay
//! - `io`: Serial command/status channel
//!
//! # Hardware Abstraction
//!
//! The key hardware traits are:
//!
//! - [`ServoActuator`]: angle-positioned hobby servo output
//! - [`EncoderInput`]: quadrature encoder absolute position
//! - [`Clock`]: monotonic time source for `no_std` environments
//! - [`Delay`]: blocking delay that paces servo ramps

pub mod hardware;
pub mod io;

pub use hardware::*;
pub use io::*;

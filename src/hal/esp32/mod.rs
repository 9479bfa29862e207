//! ESP32-C3 SuperMini hardware abstraction layer for the servo latch rig.
//!
//! This module provides hardware implementations for the ESP32-C3 SuperMini
//! board driving an SG90-class latch servo and reading the running-wheel
//! quadrature encoder.
//!
//! # Hardware Configuration
//!
//! - **MCU**: ESP32-C3 SuperMini (RISC-V 160MHz, 4MB Flash)
//! - **Servo**: SG90 on LEDC PWM (50 Hz)
//! - **Encoder**: two-channel quadrature encoder on the wheel axle
//! - **Serial**: UART to the acquisition host (commands in, status out)
//!
//! # Pin Assignments
//!
//! See the [`pins`] module for GPIO assignments matching the SuperMini layout.

mod clock;
mod delay;
mod encoder;
mod serial;
mod servo;

pub use clock::Esp32Clock;
pub use delay::Esp32Delay;
pub use encoder::Esp32Encoder;
pub use serial::Esp32Serial;
pub use servo::Esp32Servo;

/// Pin assignments for SuperMini ESP32-C3.
///
/// These constants match the rig wiring:
/// - Latch servo signal on GPIO2
/// - Wheel encoder on GPIO6/7
/// - UART to the acquisition host on GPIO20/21
pub mod pins {
    // =========================================================================
    // Servo (SG90)
    // =========================================================================

    /// Servo PWM signal
    pub const SERVO_PWM: i32 = 2;

    // =========================================================================
    // Wheel Encoder (quadrature)
    // =========================================================================

    /// Encoder channel A
    pub const ENC_A: i32 = 6;

    /// Encoder channel B
    pub const ENC_B: i32 = 7;

    // =========================================================================
    // UART to acquisition host
    // =========================================================================

    /// UART receive (commands from the host)
    pub const UART_RX: i32 = 20;

    /// UART transmit (status lines to the host)
    pub const UART_TX: i32 = 21;
}

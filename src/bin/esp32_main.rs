//! ESP32-C3 SuperMini servo latch controller.
//!
//! This is the main entry point for the physical rig controller.
//! It runs a 50Hz control loop that:
//! - Reads at most one command byte from the host UART
//! - Samples the wheel encoder position
//! - Evaluates the lock state machine (ramping the servo when a rule fires)
//! - Emits one status line per tick to the host
//!
//! # Hardware Setup
//!
//! - Latch servo signal on GPIO2 (LEDC PWM, 50Hz)
//! - Wheel encoder A/B on GPIO6/7
//! - UART to the acquisition host on GPIO20 (RX) / GPIO21 (TX), 9600 baud
//!
//! # Build
//!
//! ```bash
//! cargo build --bin esp32_main --features esp32
//! ```

use esp_idf_hal::gpio::AnyIOPin;
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::prelude::*;
use esp_idf_hal::uart::{config::Config as UartConfig, UartDriver};
use servo_latch::hal::esp32::{Esp32Clock, Esp32Delay, Esp32Encoder, Esp32Serial, Esp32Servo};
use servo_latch::{ControlLoop, LatchConfig, LatchController};
use std::thread;
use std::time::Duration;

/// Host UART baud rate (must match the acquisition software)
const UART_BAUD: u32 = 9600;

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();

    println!();
    println!("================================");
    println!("  servo-latch wheel controller");
    println!("================================");
    println!();

    // =========================================================================
    // Configuration
    // =========================================================================
    // Endpoint angles are calibrated per rig; override at build time
    let config = LatchConfig::default()
        .with_angles(
            parse_env_angle(option_env!("LATCH_REST_ANGLE"), 0),
            parse_env_angle(option_env!("LATCH_LOCK_ANGLE"), 90),
        )
        .with_inactivity_ms(30_000);

    let peripherals = Peripherals::take()?;

    // =========================================================================
    // Initialize Servo (SG90 on GPIO2)
    // =========================================================================
    let servo = Esp32Servo::new(
        peripherals.pins.gpio2,
        peripherals.ledc.timer0,
        peripherals.ledc.channel0,
    )?;
    println!("[OK] Servo initialized (GPIO2 PWM)");

    // =========================================================================
    // Initialize Encoder (GPIO6/7)
    // =========================================================================
    let encoder = Esp32Encoder::new(peripherals.pins.gpio6, peripherals.pins.gpio7)?;
    println!("[OK] Encoder initialized (GPIO6/7)");

    // =========================================================================
    // Initialize Host UART (GPIO20/21)
    // =========================================================================
    let uart = UartDriver::new(
        peripherals.uart1,
        peripherals.pins.gpio21, // TX
        peripherals.pins.gpio20, // RX
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &UartConfig::default().baudrate(UART_BAUD.Hz()),
    )?;
    let port = Esp32Serial::new(uart);
    println!("[OK] Host UART initialized ({UART_BAUD} baud)");

    // =========================================================================
    // Control loop
    // =========================================================================
    let loop_interval = Duration::from_millis(u64::from(config.loop_interval_ms));

    let mut controller = LatchController::new(servo, Esp32Delay::new(), config);
    controller.initialize()?;
    println!(
        "[OK] Latch at rest angle {}°, lock target {}°",
        config.rest_angle, config.lock_angle
    );

    let mut control_loop = ControlLoop::new(controller, encoder, port, Esp32Clock::new());

    println!("[OK] Entering control loop");
    loop {
        if let Err(err) = control_loop.run_tick() {
            // Actuation failures are transient on this rig; log and re-evaluate
            // fresh on the next tick
            println!("[WARN] servo actuation failed: {err}");
        }
        thread::sleep(loop_interval);
    }
}

/// Parses a compile-time angle override, falling back to the default.
fn parse_env_angle(value: Option<&str>, default: u8) -> u8 {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

//! Desktop simulation of a latch session against the mock hardware.
//!
//! Replays a scripted session - the wheel running, going idle past the
//! inactivity threshold, resuming, and a manual override from the host -
//! and prints every status line the controller would emit over the wire.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example desktop_sim
//! ```

use servo_latch::hal::{MockClock, MockDelay, MockEncoder, MockPort, MockServo};
use servo_latch::{ControlLoop, LatchConfig, LatchController};

/// One scripted step: wheel counts turned, optional host command.
struct Step {
    label: &'static str,
    ticks: u32,
    counts_per_tick: i32,
    command: Option<u8>,
}

fn main() -> anyhow::Result<()> {
    println!("=================================");
    println!("  servo-latch desktop simulation");
    println!("=================================");
    println!();

    // Short thresholds so the whole session fits in a few screens
    let config = LatchConfig::default()
        .with_angles(0, 90)
        .with_position_threshold(2)
        .with_inactivity_ms(500);

    let mut controller = LatchController::new(MockServo::new(), MockDelay::new(), config);
    controller
        .initialize()
        .map_err(|_| anyhow::anyhow!("servo init failed"))?;

    let mut control_loop = ControlLoop::new(
        controller,
        MockEncoder::new(),
        MockPort::new(),
        MockClock::new(),
    );

    let script = [
        Step {
            label: "wheel running",
            ticks: 5,
            counts_per_tick: 12,
            command: None,
        },
        Step {
            label: "wheel idle (inactivity elapses)",
            ticks: 30,
            counts_per_tick: 0,
            command: None,
        },
        Step {
            label: "wheel resumes",
            ticks: 3,
            counts_per_tick: 8,
            command: None,
        },
        Step {
            label: "host forces lock ('b')",
            ticks: 2,
            counts_per_tick: 8,
            command: Some(b'b'),
        },
        Step {
            label: "host returns to automatic ('a')",
            ticks: 2,
            counts_per_tick: 0,
            command: Some(b'a'),
        },
    ];

    for step in script {
        println!("--- {} ---", step.label);
        if let Some(byte) = step.command {
            control_loop.port_mut().queue_byte(byte);
        }
        for _ in 0..step.ticks {
            let interval = u64::from(control_loop.controller().config().loop_interval_ms);
            control_loop.encoder_mut().turn(step.counts_per_tick);
            control_loop.clock_mut().advance(interval);
            let report = control_loop
                .run_tick()
                .map_err(|_| anyhow::anyhow!("servo actuation failed"))?;

            let line = control_loop.port().lines.last().cloned().unwrap_or_default();
            match report.motion {
                Some(motion) => println!(
                    "{line}    [{motion:?} -> {}°]",
                    control_loop.controller().angle()
                ),
                None => println!("{line}"),
            }
        }
    }

    println!();
    println!(
        "Session done: {} servo writes, final angle {}°",
        control_loop.controller().motion().servo().angles.len(),
        control_loop.controller().angle()
    );

    Ok(())
}

//! Latch controller configuration.
//!
//! All tuning constants are compiled-in defaults overridable through the
//! builder, matching how the firmware is deployed: endpoint angles and
//! thresholds are calibrated per rig and baked into the binary, not loaded
//! at runtime.
//!
//! # Example
//!
//! ```rust
//! use servo_latch::LatchConfig;
//!
//! // Use defaults
//! let config = LatchConfig::default();
//!
//! // Or customize
//! let config = LatchConfig::default()
//!     .with_angles(10, 100)
//!     .with_inactivity_ms(60_000);
//! ```

/// Latch controller configuration.
///
/// Endpoint validity (whether the configured angles are within the servo's
/// mechanical range) is the deployer's responsibility; see
/// [`ServoActuator`](crate::traits::ServoActuator).
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatchConfig {
    /// Servo angle for the unlocked position (degrees).
    pub rest_angle: u8,
    /// Servo angle for the locked position (degrees).
    pub lock_angle: u8,
    /// Position delta magnitude that must be exceeded to count as movement.
    pub position_threshold: u32,
    /// Idle duration after which the latch engages (milliseconds).
    pub inactivity_ms: u64,
    /// Per-degree ramp delay when the angle is increasing (milliseconds).
    pub rising_step_ms: u32,
    /// Per-degree ramp delay when the angle is decreasing (milliseconds).
    pub falling_step_ms: u32,
    /// Control loop tick interval (milliseconds).
    pub loop_interval_ms: u32,
}

impl Default for LatchConfig {
    fn default() -> Self {
        Self {
            rest_angle: 0,
            lock_angle: 90,
            position_threshold: 2,
            inactivity_ms: 30_000,
            rising_step_ms: 15,
            falling_step_ms: 5,
            loop_interval_ms: 20,
        }
    }
}

impl LatchConfig {
    /// Set the rest (unlocked) and lock-target angles.
    pub fn with_angles(mut self, rest: u8, lock: u8) -> Self {
        self.rest_angle = rest;
        self.lock_angle = lock;
        self
    }

    /// Set the movement detection threshold.
    pub fn with_position_threshold(mut self, threshold: u32) -> Self {
        self.position_threshold = threshold;
        self
    }

    /// Set the inactivity duration before the latch engages.
    pub fn with_inactivity_ms(mut self, ms: u64) -> Self {
        self.inactivity_ms = ms;
        self
    }

    /// Set the per-degree ramp delays for rising and falling motion.
    pub fn with_step_ms(mut self, rising: u32, falling: u32) -> Self {
        self.rising_step_ms = rising;
        self.falling_step_ms = falling;
        self
    }

    /// Set the control loop tick interval.
    pub fn with_loop_interval_ms(mut self, ms: u32) -> Self {
        self.loop_interval_ms = ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = LatchConfig::default();
        assert_eq!(config.rest_angle, 0);
        assert_eq!(config.lock_angle, 90);
        assert_eq!(config.position_threshold, 2);
        assert_eq!(config.inactivity_ms, 30_000);
        assert_eq!(config.rising_step_ms, 15);
        assert_eq!(config.falling_step_ms, 5);
        assert_eq!(config.loop_interval_ms, 20);
    }

    #[test]
    fn builder_pattern() {
        let config = LatchConfig::default()
            .with_angles(10, 170)
            .with_position_threshold(5)
            .with_inactivity_ms(120_000)
            .with_step_ms(20, 8)
            .with_loop_interval_ms(50);

        assert_eq!(config.rest_angle, 10);
        assert_eq!(config.lock_angle, 170);
        assert_eq!(config.position_threshold, 5);
        assert_eq!(config.inactivity_ms, 120_000);
        assert_eq!(config.rising_step_ms, 20);
        assert_eq!(config.falling_step_ms, 8);
        assert_eq!(config.loop_interval_ms, 50);
    }

    #[test]
    fn inverted_angles_allowed() {
        // A rig may mount the latch so that rest sits above lock
        let config = LatchConfig::default().with_angles(120, 30);
        assert_eq!(config.rest_angle, 120);
        assert_eq!(config.lock_angle, 30);
    }
}

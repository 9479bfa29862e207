//! Movement detection and inactivity timing for the monitored assembly.
//!
//! The monitor compares successive encoder positions against a magnitude
//! threshold to decide whether the wheel moved this tick, and measures
//! elapsed idle time against a duration threshold to decide when the
//! assembly has gone inactive.
//!
//! # Hysteresis
//!
//! Two thresholds are deliberate: a coarse position delta tolerates encoder
//! jitter (exact-zero comparison would flap on a single noisy edge), and the
//! idle duration keeps small residual motion from rapidly toggling the latch.
//! Between "just moved" and "long enough idle" the activity state simply
//! holds its previous value.
//!
//! # Example
//!
//! ```rust
//! use servo_latch::ActivityMonitor;
//!
//! let mut monitor = ActivityMonitor::new(2, 1_000);
//!
//! // Startup: presumed active, idle clock starts at the first tick
//! let sample = monitor.update(0, 0);
//! assert!(!sample.moved);
//! assert!(sample.active);
//!
//! // A qualifying delta marks movement and resets the idle clock
//! let sample = monitor.update(10, 500);
//! assert!(sample.moved);
//!
//! // Long enough with no qualifying delta: inactive
//! let sample = monitor.update(10, 1_500);
//! assert!(!sample.active);
//! ```

/// Result of one activity evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivitySample {
    /// A qualifying position delta was observed on this tick.
    pub moved: bool,
    /// The assembly is currently considered active.
    ///
    /// Stays `true` through the hysteresis band after the last qualifying
    /// delta; flips to `false` once the inactivity duration elapses.
    pub active: bool,
}

/// Detects movement bursts and measures elapsed idle time.
///
/// Owned by the latch controller and fed the raw encoder position once per
/// tick. The reference position is only advanced on a qualifying delta, so
/// slow drift below the threshold accumulates until it qualifies.
#[derive(Debug)]
pub struct ActivityMonitor {
    /// Minimum position delta magnitude that counts as movement.
    position_threshold: u32,
    /// Idle duration after which the assembly is declared inactive.
    inactivity_ms: u64,
    /// Position captured at the last qualifying delta.
    last_seen_position: i32,
    /// Time of the last qualifying delta; `None` until the first tick.
    last_movement_ms: Option<u64>,
    /// Current activity state.
    active: bool,
}

impl ActivityMonitor {
    /// Creates a monitor with the given thresholds.
    ///
    /// A delta must be *strictly greater* than `position_threshold` to count
    /// as movement. The assembly is presumed active at startup; the idle
    /// clock starts on the first call to [`update`](Self::update).
    pub fn new(position_threshold: u32, inactivity_ms: u64) -> Self {
        Self {
            position_threshold,
            inactivity_ms,
            last_seen_position: 0,
            last_movement_ms: None,
            active: true,
        }
    }

    /// Evaluates one tick given the current encoder position and time.
    pub fn update(&mut self, position: i32, now_ms: u64) -> ActivitySample {
        let last_movement = *self.last_movement_ms.get_or_insert(now_ms);

        let delta = i64::from(position) - i64::from(self.last_seen_position);
        let moved = delta.unsigned_abs() > u64::from(self.position_threshold);

        if moved {
            self.active = true;
            self.last_movement_ms = Some(now_ms);
            self.last_seen_position = position;
        } else if now_ms.saturating_sub(last_movement) >= self.inactivity_ms {
            self.active = false;
        }
        // Otherwise: hysteresis band, state unchanged

        ActivitySample {
            moved,
            active: self.active,
        }
    }

    /// Returns the current activity state without evaluating a tick.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the position captured at the last qualifying delta.
    #[inline]
    pub fn last_seen_position(&self) -> i32 {
        self.last_seen_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_active() {
        let monitor = ActivityMonitor::new(2, 1_000);
        assert!(monitor.is_active());
    }

    #[test]
    fn delta_at_threshold_does_not_count() {
        let mut monitor = ActivityMonitor::new(2, 1_000);
        monitor.update(0, 0);

        // Exactly at the threshold: not movement
        let sample = monitor.update(2, 10);
        assert!(!sample.moved);
        // Just above: movement
        let sample = monitor.update(3, 20);
        assert!(sample.moved);
    }

    #[test]
    fn negative_delta_counts_by_magnitude() {
        let mut monitor = ActivityMonitor::new(2, 1_000);
        monitor.update(0, 0);

        let sample = monitor.update(-3, 10);
        assert!(sample.moved);
        assert_eq!(monitor.last_seen_position(), -3);
    }

    #[test]
    fn inactivity_declared_after_threshold_elapses() {
        let mut monitor = ActivityMonitor::new(2, 1_000);
        monitor.update(0, 0);

        // Inside the idle window: still active
        let sample = monitor.update(0, 999);
        assert!(sample.active);

        // Exactly at the window boundary: inactive
        let sample = monitor.update(0, 1_000);
        assert!(!sample.active);
    }

    #[test]
    fn movement_resets_idle_clock() {
        let mut monitor = ActivityMonitor::new(2, 1_000);
        monitor.update(0, 0);
        monitor.update(10, 900);

        // 1000ms after start but only 200ms after the last movement
        let sample = monitor.update(10, 1_100);
        assert!(sample.active);

        // 1000ms after the last movement
        let sample = monitor.update(10, 1_900);
        assert!(!sample.active);
    }

    #[test]
    fn reference_position_only_advances_on_qualifying_delta() {
        let mut monitor = ActivityMonitor::new(2, 1_000);
        monitor.update(0, 0);

        // Sub-threshold drift accumulates against the old reference
        assert!(!monitor.update(1, 10).moved);
        assert!(!monitor.update(2, 20).moved);
        assert_eq!(monitor.last_seen_position(), 0);

        // The accumulated drift eventually qualifies
        assert!(monitor.update(3, 30).moved);
        assert_eq!(monitor.last_seen_position(), 3);
    }

    #[test]
    fn reactivates_after_inactivity() {
        let mut monitor = ActivityMonitor::new(2, 1_000);
        monitor.update(0, 0);
        monitor.update(0, 2_000);
        assert!(!monitor.is_active());

        let sample = monitor.update(50, 2_100);
        assert!(sample.moved);
        assert!(sample.active);
    }

    #[test]
    fn first_tick_starts_idle_clock_at_first_now() {
        let mut monitor = ActivityMonitor::new(2, 1_000);

        // First tick arrives late; the idle clock must start here, not at 0
        let sample = monitor.update(0, 5_000);
        assert!(sample.active);

        let sample = monitor.update(0, 5_999);
        assert!(sample.active);
        let sample = monitor.update(0, 6_000);
        assert!(!sample.active);
    }
}

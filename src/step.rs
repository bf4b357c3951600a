//! Step detection on the vertical accelerometer axis.
//!
//! The detector counts a step when accel.y rises above -6.0 m/s² (entering
//! the swing phase) and at least 300 ms have passed since the previous step.
//! The swing phase ends when accel.y drops below -9.0 m/s². Only entry is
//! time-gated.

use crate::motion::MotionSample;

/// Swing-phase entry threshold on accel.y (m/s²).
pub const STEP_ENTRY_THRESHOLD: f32 = -6.0;

/// Swing-phase exit threshold on accel.y (m/s²).
pub const STEP_EXIT_THRESHOLD: f32 = -9.0;

/// Minimum time between counted steps.
pub const MIN_STEP_INTERVAL_MS: u64 = 300;

/// Two-phase step detector.
#[derive(Clone, Debug, Default)]
pub struct StepDetector {
    in_swing: bool,
    last_step_ms: u64,
}

impl StepDetector {
    /// Creates a detector outside the swing phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one sample. Returns `true` when a step is detected.
    pub fn update(&mut self, sample: &MotionSample, now_ms: u64) -> bool {
        let y = sample.accel.y;

        if !self.in_swing {
            if y > STEP_ENTRY_THRESHOLD
                && now_ms.saturating_sub(self.last_step_ms) >= MIN_STEP_INTERVAL_MS
            {
                self.in_swing = true;
                self.last_step_ms = now_ms;
                return true;
            }
        } else if y < STEP_EXIT_THRESHOLD {
            self.in_swing = false;
        }

        false
    }

    /// Whether the detector is inside a swing phase.
    pub fn in_swing(&self) -> bool {
        self.in_swing
    }
}

/// Monotonic step tally.
///
/// Only ever incremented; survives mode switches and is reset only by
/// constructing a new counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepCounter {
    total: u32,
}

impl StepCounter {
    /// Creates a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one step.
    #[inline]
    pub fn record(&mut self) {
        self.total = self.total.saturating_add(1);
    }

    /// Steps counted since boot.
    #[inline]
    pub fn total(&self) -> u32 {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn y(v: f32) -> MotionSample {
        MotionSample::accel(0.0, v, 0.0)
    }

    #[test]
    fn step_counted_on_swing_entry() {
        let mut d = StepDetector::new();
        assert!(d.update(&y(-5.0), 1000));
        assert!(d.in_swing());
        // Still high: no second step until swing exits
        assert!(!d.update(&y(-4.0), 1400));
    }

    #[test]
    fn swing_exit_then_next_step() {
        let mut d = StepDetector::new();
        d.update(&y(-5.0), 1000);
        assert!(!d.update(&y(-9.5), 1100));
        assert!(!d.in_swing());
        assert!(d.update(&y(-5.0), 1300));
    }

    #[test]
    fn entry_gated_by_interval() {
        let mut d = StepDetector::new();
        d.update(&y(-5.0), 1000);
        d.update(&y(-10.0), 1050);
        assert!(!d.update(&y(-5.0), 1200));
        assert!(!d.in_swing());
        assert!(d.update(&y(-5.0), 1300));
    }

    #[test]
    fn exit_threshold_is_strict() {
        let mut d = StepDetector::new();
        d.update(&y(-5.0), 1000);
        d.update(&y(-9.0), 1100);
        assert!(d.in_swing());
    }

    #[test]
    fn counter_is_monotonic() {
        let mut c = StepCounter::new();
        assert_eq!(c.total(), 0);
        c.record();
        c.record();
        assert_eq!(c.total(), 2);
    }
}

//! Repetition detectors, one per exercise type.
//!
//! Every detector is a two-phase edge detector over a single sensor channel:
//!
//! 1. **Arm** when the value crosses the *entry* threshold.
//! 2. **Fire** when, while armed, the value crosses the *release* threshold
//!    in the opposite sense. Firing disarms and records the timestamp.
//!
//! Some exercises add a minimum interval between reps. Lift-type detectors
//! gate the fire phase; the shoulder press gates the arm phase instead.
//!
//! | Exercise | Channel | Entry | Release | Gate |
//! |----------|---------|-------|---------|------|
//! | Bicep curl | accel.z | > 3.0 | < -3.0 | none |
//! | Deadlift | accel.y | > -9.0 | < -12.0 | 800 ms on fire |
//! | Squat | accel.y | < 3.0 | > 6.0 | 800 ms on fire |
//! | Shoulder press | gyro.y | > 2.0 | < -1.0 | 1000 ms on arm |
//! | Lateral raise | gyro.x | > 100.0 | < -80.0 | none |
//!
//! The thresholds were tuned on hardware and must not drift.
//!
//! # Example
//!
//! ```rust
//! use rs_reps::{DetectorBank, ExerciseType, MotionSample, RepDetector};
//!
//! let mut bank = DetectorBank::new();
//! let curl = bank.detector_mut(ExerciseType::BicepCurl);
//!
//! assert!(!curl.detect(&MotionSample::accel(0.0, 0.0, 4.0), 0));  // armed
//! assert!(curl.detect(&MotionSample::accel(0.0, 0.0, -4.0), 50)); // fired
//! ```

use crate::motion::{Axis, Channel, MotionSample};
use crate::workout::ExerciseType;

/// A per-sample repetition classifier.
///
/// Implementations own their hysteresis state. `detect` is called once per
/// new sample while the session is working on the matching exercise.
pub trait RepDetector {
    /// Feeds one sample. Returns `true` exactly when a repetition completes.
    fn detect(&mut self, sample: &MotionSample, now_ms: u64) -> bool;

    /// Clears the armed flag. The last-fire timestamp is kept.
    fn reset(&mut self);
}

/// A strict threshold crossing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Crossing {
    /// Value strictly greater than the threshold.
    Above(f32),
    /// Value strictly less than the threshold.
    Below(f32),
}

impl Crossing {
    /// Returns true if `value` satisfies the crossing.
    #[inline]
    pub fn is_met(&self, value: f32) -> bool {
        match *self {
            Crossing::Above(threshold) => value > threshold,
            Crossing::Below(threshold) => value < threshold,
        }
    }
}

/// Where the minimum-interval check applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntervalGate {
    /// No timing restriction.
    None,
    /// Firing requires this many ms since the last fire.
    Fire(u64),
    /// Arming requires this many ms since the last fire.
    Arm(u64),
}

/// Static description of one exercise's detector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectorProfile {
    /// Sensor channel to watch.
    pub channel: Channel,
    /// Condition that arms the detector.
    pub entry: Crossing,
    /// Condition that fires an armed detector.
    pub release: Crossing,
    /// Minimum-interval rule.
    pub gate: IntervalGate,
}

impl DetectorProfile {
    /// Bicep curl: forearm swing along accel.z.
    pub const BICEP_CURL: Self = Self {
        channel: Channel::Accel(Axis::Z),
        entry: Crossing::Above(3.0),
        release: Crossing::Below(-3.0),
        gate: IntervalGate::None,
    };

    /// Deadlift: vertical travel along accel.y.
    pub const DEADLIFT: Self = Self {
        channel: Channel::Accel(Axis::Y),
        entry: Crossing::Above(-9.0),
        release: Crossing::Below(-12.0),
        gate: IntervalGate::Fire(800),
    };

    /// Squat: vertical travel along accel.y, inverted sense.
    pub const SQUAT: Self = Self {
        channel: Channel::Accel(Axis::Y),
        entry: Crossing::Below(3.0),
        release: Crossing::Above(6.0),
        gate: IntervalGate::Fire(800),
    };

    /// Shoulder press: wrist rotation on gyro.y.
    pub const SHOULDER_PRESS: Self = Self {
        channel: Channel::Gyro(Axis::Y),
        entry: Crossing::Above(2.0),
        release: Crossing::Below(-1.0),
        gate: IntervalGate::Arm(1000),
    };

    /// Lateral raise: arm rotation on gyro.x.
    pub const LATERAL_RAISE: Self = Self {
        channel: Channel::Gyro(Axis::X),
        entry: Crossing::Above(100.0),
        release: Crossing::Below(-80.0),
        gate: IntervalGate::None,
    };

    /// Profile for an exercise type.
    pub const fn for_exercise(exercise: ExerciseType) -> Self {
        match exercise {
            ExerciseType::BicepCurl => Self::BICEP_CURL,
            ExerciseType::Deadlift => Self::DEADLIFT,
            ExerciseType::Squat => Self::SQUAT,
            ExerciseType::LateralRaise => Self::LATERAL_RAISE,
            ExerciseType::ShoulderPress => Self::SHOULDER_PRESS,
        }
    }
}

/// Threshold hysteresis detector driven by a [`DetectorProfile`].
#[derive(Clone, Debug)]
pub struct ThresholdDetector {
    profile: DetectorProfile,
    armed: bool,
    // Boot-relative; starts at 0 so gated detectors cannot fire in the
    // first interval after power-on.
    last_fire_ms: u64,
}

impl ThresholdDetector {
    /// Creates a detector for the given profile.
    pub const fn new(profile: DetectorProfile) -> Self {
        Self {
            profile,
            armed: false,
            last_fire_ms: 0,
        }
    }

    /// Detector for an exercise type.
    pub const fn for_exercise(exercise: ExerciseType) -> Self {
        Self::new(DetectorProfile::for_exercise(exercise))
    }

    /// Bicep curl detector.
    pub const fn bicep_curl() -> Self {
        Self::new(DetectorProfile::BICEP_CURL)
    }

    /// Deadlift detector.
    pub const fn deadlift() -> Self {
        Self::new(DetectorProfile::DEADLIFT)
    }

    /// Squat detector.
    pub const fn squat() -> Self {
        Self::new(DetectorProfile::SQUAT)
    }

    /// Shoulder press detector.
    pub const fn shoulder_press() -> Self {
        Self::new(DetectorProfile::SHOULDER_PRESS)
    }

    /// Lateral raise detector.
    pub const fn lateral_raise() -> Self {
        Self::new(DetectorProfile::LATERAL_RAISE)
    }

    /// The profile this detector runs.
    pub fn profile(&self) -> &DetectorProfile {
        &self.profile
    }

    /// Whether the entry threshold has been crossed and not yet released.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Timestamp of the last fired repetition.
    pub fn last_fire_ms(&self) -> u64 {
        self.last_fire_ms
    }

    fn interval_elapsed(&self, now_ms: u64, min_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_fire_ms) >= min_ms
    }
}

impl RepDetector for ThresholdDetector {
    fn detect(&mut self, sample: &MotionSample, now_ms: u64) -> bool {
        let value = sample.channel(self.profile.channel);

        if !self.armed {
            let gate_open = match self.profile.gate {
                IntervalGate::Arm(min_ms) => self.interval_elapsed(now_ms, min_ms),
                _ => true,
            };
            if gate_open && self.profile.entry.is_met(value) {
                self.armed = true;
            }
            return false;
        }

        if !self.profile.release.is_met(value) {
            return false;
        }
        if let IntervalGate::Fire(min_ms) = self.profile.gate {
            if !self.interval_elapsed(now_ms, min_ms) {
                return false;
            }
        }

        self.armed = false;
        self.last_fire_ms = now_ms;
        true
    }

    fn reset(&mut self) {
        self.armed = false;
    }
}

/// One detector per exercise type, constructed once at boot.
///
/// The session borrows the bank mutably and picks the detector matching the
/// current exercise. Detectors for other exercises keep their state.
#[derive(Clone, Debug)]
pub struct DetectorBank {
    detectors: [ThresholdDetector; ExerciseType::COUNT],
}

impl DetectorBank {
    /// Creates a bank with the stock profile for every exercise.
    pub fn new() -> Self {
        Self {
            detectors: ExerciseType::ALL.map(ThresholdDetector::for_exercise),
        }
    }

    /// The detector for an exercise type.
    pub fn detector(&self, exercise: ExerciseType) -> &ThresholdDetector {
        &self.detectors[exercise.index()]
    }

    /// Mutable access to the detector for an exercise type.
    pub fn detector_mut(&mut self, exercise: ExerciseType) -> &mut dyn RepDetector {
        &mut self.detectors[exercise.index()]
    }

    /// Disarms every detector.
    pub fn reset_all(&mut self) {
        for detector in &mut self.detectors {
            detector.reset();
        }
    }
}

impl Default for DetectorBank {
    fn default() -> Self {
        Self::new()
    }
}

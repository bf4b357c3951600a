//! Workout plan data model.
//!
//! A [`WorkoutPlan`] is exactly [`PLAN_LEN`] validated [`ExerciseSpec`]
//! entries. Plans are built once by the configuration interface and then
//! swapped into the controller whole; nothing mutates a plan in place.
//!
//! # Example
//!
//! ```rust
//! use rs_reps::{ExerciseSpec, ExerciseType, WorkoutPlan};
//!
//! let plan = WorkoutPlan::new([
//!     ExerciseSpec::new(ExerciseType::BicepCurl, 3, 10, 60).unwrap(),
//!     ExerciseSpec::new(ExerciseType::Squat, 3, 12, 90).unwrap(),
//!     ExerciseSpec::new(ExerciseType::ShoulderPress, 2, 8, 60).unwrap(),
//! ]);
//!
//! assert_eq!(plan.get(1).unwrap().name.as_str(), "Squat");
//! ```

use heapless::String as HString;

use crate::error::PlanError;

/// Number of exercises in every plan.
pub const PLAN_LEN: usize = 3;

/// Maximum sets per exercise.
pub const MAX_SETS: u8 = 10;

/// Maximum reps per set.
pub const MAX_REPS: u8 = 50;

/// Shortest allowed rest between sets, seconds.
pub const MIN_REST_SECONDS: u16 = 5;

/// Longest allowed rest between sets, seconds.
pub const MAX_REST_SECONDS: u16 = 300;

/// Capacity of an exercise display name.
pub const MAX_NAME_LEN: usize = 24;

/// Fixed-capacity exercise name.
pub type ExerciseName = HString<MAX_NAME_LEN>;

/// Supported exercise types.
///
/// The discriminants are the values used by the configuration form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum ExerciseType {
    /// Dumbbell bicep curl.
    BicepCurl = 0,
    /// Barbell deadlift.
    Deadlift = 1,
    /// Squat.
    Squat = 2,
    /// Dumbbell lateral raise.
    LateralRaise = 3,
    /// Overhead shoulder press.
    ShoulderPress = 4,
}

impl ExerciseType {
    /// Number of exercise types.
    pub const COUNT: usize = 5;

    /// All exercise types in form order.
    pub const ALL: [ExerciseType; Self::COUNT] = [
        ExerciseType::BicepCurl,
        ExerciseType::Deadlift,
        ExerciseType::Squat,
        ExerciseType::LateralRaise,
        ExerciseType::ShoulderPress,
    ];

    /// Looks up a type by its form value.
    ///
    /// ```
    /// use rs_reps::ExerciseType;
    ///
    /// assert_eq!(ExerciseType::from_index(2), Some(ExerciseType::Squat));
    /// assert_eq!(ExerciseType::from_index(5), None);
    /// ```
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// The form value of this type.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Snake-case key used in the status JSON.
    pub const fn as_str(self) -> &'static str {
        match self {
            ExerciseType::BicepCurl => "bicep_curl",
            ExerciseType::Deadlift => "deadlift",
            ExerciseType::Squat => "squat",
            ExerciseType::LateralRaise => "lateral_raise",
            ExerciseType::ShoulderPress => "shoulder_press",
        }
    }

    /// Display name from the fixed name table.
    pub const fn display_name(self) -> &'static str {
        match self {
            ExerciseType::BicepCurl => "Bicep Curl",
            ExerciseType::Deadlift => "Deadlift",
            ExerciseType::Squat => "Squat",
            ExerciseType::LateralRaise => "Lateral Raise",
            ExerciseType::ShoulderPress => "Shoulder Press",
        }
    }
}

/// One validated exercise entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExerciseSpec {
    /// Display name, taken from the exercise type.
    pub name: ExerciseName,
    /// Which detector to run.
    pub exercise_type: ExerciseType,
    /// Number of sets, 1..=10.
    pub sets: u8,
    /// Reps per set, 1..=50.
    pub reps: u8,
    /// Rest between sets, 5..=300 seconds.
    pub rest_seconds: u16,
}

impl ExerciseSpec {
    /// Validates the bounds and builds an entry.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError`] if any value is outside its allowed range.
    pub fn new(
        exercise_type: ExerciseType,
        sets: u8,
        reps: u8,
        rest_seconds: u16,
    ) -> Result<Self, PlanError> {
        if !(1..=MAX_SETS).contains(&sets) {
            return Err(PlanError::SetsOutOfRange(sets as u16));
        }
        if !(1..=MAX_REPS).contains(&reps) {
            return Err(PlanError::RepsOutOfRange(reps as u16));
        }
        if !(MIN_REST_SECONDS..=MAX_REST_SECONDS).contains(&rest_seconds) {
            return Err(PlanError::RestOutOfRange(rest_seconds));
        }

        let mut name = ExerciseName::new();
        // Every table entry fits MAX_NAME_LEN
        let _ = name.push_str(exercise_type.display_name());

        Ok(Self {
            name,
            exercise_type,
            sets,
            reps,
            rest_seconds,
        })
    }
}

/// An ordered, fixed-length workout.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkoutPlan {
    exercises: [ExerciseSpec; PLAN_LEN],
}

impl WorkoutPlan {
    /// Builds a plan from exactly [`PLAN_LEN`] entries.
    pub fn new(exercises: [ExerciseSpec; PLAN_LEN]) -> Self {
        Self { exercises }
    }

    /// Entry at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&ExerciseSpec> {
        self.exercises.get(index)
    }

    /// All entries in order.
    pub fn exercises(&self) -> &[ExerciseSpec; PLAN_LEN] {
        &self.exercises
    }

    /// Total reps across every set of every exercise.
    pub fn total_reps(&self) -> u32 {
        self.exercises
            .iter()
            .map(|e| e.sets as u32 * e.reps as u32)
            .sum()
    }
}

impl core::ops::Index<usize> for WorkoutPlan {
    type Output = ExerciseSpec;

    fn index(&self, index: usize) -> &ExerciseSpec {
        &self.exercises[index]
    }
}

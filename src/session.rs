//! Workout session state machine and mode controller.
//!
//! This module provides [`WorkoutController`], the central component that
//! owns the workout plan, session counters, detectors, and step tally, and
//! advances them from button toggles, plan submissions, and motion samples.
//!
//! # Modes
//!
//! ```text
//!              toggle (plan set)           toggle
//!  StepCounting ───────────────▶ Ready ───────────▶ Working ◀──┐
//!      ▲  ▲                                  │  rep target   │ rest over
//!      │  │          toggle (pause)          ▼               │
//!      │  └──────────────────────────── Resting ─────────────┘
//!      │                                     │ last set of last exercise
//!      └──────── 3 s dwell ─────────── Complete
//! ```
//!
//! Submitting a plan moves any mode to `Ready` with counters at (0, 1, 0).
//!
//! # Example
//!
//! ```rust
//! use rs_reps::{
//!     ExerciseSpec, ExerciseType, Mode, MotionSample, WorkoutController, WorkoutPlan,
//! };
//!
//! let mut controller = WorkoutController::new();
//! assert_eq!(controller.mode(), Mode::StepCounting);
//!
//! let spec = ExerciseSpec::new(ExerciseType::BicepCurl, 1, 1, 5).unwrap();
//! controller.configure(WorkoutPlan::new([spec.clone(), spec.clone(), spec]), 0);
//! controller.toggle(0);
//! assert_eq!(controller.mode(), Mode::Working);
//!
//! // One curl: up then down
//! controller.tick(&MotionSample::accel(0.0, 0.0, 4.0), 100);
//! controller.tick(&MotionSample::accel(0.0, 0.0, -4.0), 200);
//! assert_eq!(controller.mode(), Mode::Resting);
//! ```

use crate::config::SessionConfig;
use crate::detector::DetectorBank;
use crate::motion::MotionSample;
use crate::step::{StepCounter, StepDetector};
use crate::workout::{ExerciseName, ExerciseType, WorkoutPlan, PLAN_LEN};

/// Device operating mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Mode {
    /// Waiting on the configuration page. Toggles are ignored.
    Configuring,
    /// Plan loaded, waiting for the button to start.
    Ready,
    /// Counting reps of the current exercise.
    Working,
    /// Counting down the rest between sets.
    Resting,
    /// Whole plan finished; shown for a fixed dwell.
    Complete,
    /// Pedometer mode. Initial mode at boot.
    #[default]
    StepCounting,
}

impl Mode {
    /// Returns the mode as a lowercase string.
    ///
    /// ```
    /// use rs_reps::Mode;
    ///
    /// assert_eq!(Mode::StepCounting.as_str(), "step_counting");
    /// assert_eq!(Mode::Resting.as_str(), "resting");
    /// ```
    pub const fn as_str(&self) -> &'static str {
        match self {
            Mode::Configuring => "configuring",
            Mode::Ready => "ready",
            Mode::Working => "working",
            Mode::Resting => "resting",
            Mode::Complete => "complete",
            Mode::StepCounting => "step_counting",
        }
    }

    /// Whether the mode handler consumes motion samples.
    #[inline]
    pub const fn samples_motion(&self) -> bool {
        matches!(self, Mode::Working | Mode::StepCounting)
    }
}

/// Session counters.
///
/// `exercise_index`, `set_number`, and `rep_number` are only meaningful in
/// `Working`, `Resting`, and `Complete`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionState {
    /// Current mode.
    pub mode: Mode,
    /// Index into the plan, 0..PLAN_LEN.
    pub exercise_index: usize,
    /// Current set, starting at 1.
    pub set_number: u8,
    /// Reps done in the current set.
    pub rep_number: u8,
    /// When the current rest began.
    pub rest_started_ms: u64,
}

impl SessionState {
    fn reset_counters(&mut self) {
        self.exercise_index = 0;
        self.set_number = 1;
        self.rep_number = 0;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            mode: Mode::StepCounting,
            exercise_index: 0,
            set_number: 1,
            rep_number: 0,
            rest_started_ms: 0,
        }
    }
}

/// Result of a button toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// StepCounting → Ready.
    Ready,
    /// Ready → Working with fresh counters.
    Started,
    /// Working/Resting → StepCounting, counters kept.
    Paused,
    /// No transition from this mode (e.g. no plan configured).
    Ignored,
}

/// Something notable that happened during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// Nothing changed.
    None,
    /// A step was added to the tally.
    StepCounted,
    /// A rep was counted and the set continues.
    RepCounted,
    /// A set finished and rest began.
    RestStarted,
    /// Rest elapsed; back to work.
    RestFinished,
    /// The last set of the last exercise finished.
    WorkoutComplete,
    /// Completion dwell elapsed; back to step counting.
    ReturnedToSteps,
}

/// Main workout controller.
///
/// Owns all device state touched by the control loop. Not thread-safe; plan
/// submissions from other threads go through an inbox and are applied with
/// [`configure`](Self::configure) from the loop.
#[derive(Clone, Debug)]
pub struct WorkoutController {
    plan: Option<WorkoutPlan>,
    session: SessionState,
    detectors: DetectorBank,
    step_detector: StepDetector,
    steps: StepCounter,
    completed_at_ms: u64,
    config: SessionConfig,
}

impl WorkoutController {
    /// Create a controller in step-counting mode with no plan.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Create a controller with custom session settings.
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            plan: None,
            session: SessionState::default(),
            detectors: DetectorBank::new(),
            step_detector: StepDetector::new(),
            steps: StepCounter::new(),
            completed_at_ms: 0,
            config,
        }
    }

    /// Replace the plan and move to `Ready` with counters at (0, 1, 0).
    ///
    /// Accepted in every mode.
    pub fn configure(&mut self, plan: WorkoutPlan, now_ms: u64) {
        log::info!(
            "plan configured at {}ms: {} / {} / {}",
            now_ms,
            plan[0].name,
            plan[1].name,
            plan[2].name
        );
        self.plan = Some(plan);
        self.session.reset_counters();
        self.session.mode = Mode::Ready;
    }

    /// Handle a debounced button toggle.
    pub fn toggle(&mut self, now_ms: u64) -> ToggleOutcome {
        let outcome = match self.session.mode {
            Mode::Ready => {
                self.session.reset_counters();
                if self.config.reset_detectors_on_resume {
                    self.detectors.reset_all();
                }
                self.session.mode = Mode::Working;
                ToggleOutcome::Started
            }
            Mode::Working | Mode::Resting => {
                self.session.mode = Mode::StepCounting;
                ToggleOutcome::Paused
            }
            Mode::StepCounting if self.plan.is_some() => {
                self.session.mode = Mode::Ready;
                ToggleOutcome::Ready
            }
            _ => ToggleOutcome::Ignored,
        };

        if outcome != ToggleOutcome::Ignored {
            log::info!("toggle at {}ms: {:?} -> {}", now_ms, outcome, self.session.mode.as_str());
        }
        outcome
    }

    /// Run the handler for the current mode on one sample.
    ///
    /// Call once per loop iteration with a fresh sample.
    pub fn tick(&mut self, sample: &MotionSample, now_ms: u64) -> SessionEvent {
        match self.session.mode {
            Mode::Working => self.tick_working(sample, now_ms),
            Mode::Resting => self.tick_resting(now_ms),
            Mode::Complete => self.tick_complete(now_ms),
            Mode::StepCounting => {
                if self.step_detector.update(sample, now_ms) {
                    self.steps.record();
                    SessionEvent::StepCounted
                } else {
                    SessionEvent::None
                }
            }
            Mode::Ready | Mode::Configuring => SessionEvent::None,
        }
    }

    fn tick_working(&mut self, sample: &MotionSample, now_ms: u64) -> SessionEvent {
        let Some(plan) = self.plan.as_ref() else {
            return SessionEvent::None;
        };
        let spec = &plan[self.session.exercise_index];

        if !self
            .detectors
            .detector_mut(spec.exercise_type)
            .detect(sample, now_ms)
        {
            return SessionEvent::None;
        }

        let session = &mut self.session;
        session.rep_number += 1;
        if session.rep_number < spec.reps {
            return SessionEvent::RepCounted;
        }

        session.set_number += 1;
        session.rep_number = 0;

        if session.set_number > spec.sets {
            if session.exercise_index + 1 >= PLAN_LEN {
                session.mode = Mode::Complete;
                self.completed_at_ms = now_ms;
                log::info!("workout complete at {}ms", now_ms);
                return SessionEvent::WorkoutComplete;
            }
            session.exercise_index += 1;
            session.set_number = 1;
        }

        session.mode = Mode::Resting;
        session.rest_started_ms = now_ms;
        SessionEvent::RestStarted
    }

    fn tick_resting(&mut self, now_ms: u64) -> SessionEvent {
        let Some(plan) = self.plan.as_ref() else {
            return SessionEvent::None;
        };
        let rest_seconds = plan[self.session.exercise_index].rest_seconds as u64;

        if self.rest_elapsed_s(now_ms) >= rest_seconds {
            self.session.mode = Mode::Working;
            SessionEvent::RestFinished
        } else {
            SessionEvent::None
        }
    }

    fn tick_complete(&mut self, now_ms: u64) -> SessionEvent {
        let dwell = self.config.complete_dwell_ms as u64;
        if now_ms.saturating_sub(self.completed_at_ms) >= dwell {
            self.session.mode = Mode::StepCounting;
            SessionEvent::ReturnedToSteps
        } else {
            SessionEvent::None
        }
    }

    fn rest_elapsed_s(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.session.rest_started_ms) / 1000
    }

    /// Seconds of rest left, clamped at zero. `None` outside `Resting`.
    pub fn rest_remaining_s(&self, now_ms: u64) -> Option<u16> {
        if self.session.mode != Mode::Resting {
            return None;
        }
        let plan = self.plan.as_ref()?;
        let rest = plan[self.session.exercise_index].rest_seconds as u64;
        Some(rest.saturating_sub(self.rest_elapsed_s(now_ms)) as u16)
    }

    /// Get the current state for display/API.
    pub fn state(&self, now_ms: u64) -> WorkoutState {
        let spec = self
            .plan
            .as_ref()
            .and_then(|p| p.get(self.session.exercise_index));

        WorkoutState {
            mode: self.session.mode,
            plan_configured: self.plan.is_some(),
            exercise_name: spec.map(|s| s.name.clone()).unwrap_or_default(),
            exercise_type: spec.map(|s| s.exercise_type),
            exercise_index: self.session.exercise_index,
            set_number: self.session.set_number,
            total_sets: spec.map(|s| s.sets).unwrap_or(0),
            rep_number: self.session.rep_number,
            target_reps: spec.map(|s| s.reps).unwrap_or(0),
            rest_remaining_s: self.rest_remaining_s(now_ms).unwrap_or(0),
            steps: self.steps.total(),
        }
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.session.mode
    }

    /// Session counters.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// The active plan, if one was submitted.
    pub fn plan(&self) -> Option<&WorkoutPlan> {
        self.plan.as_ref()
    }

    /// Steps counted since boot.
    pub fn steps(&self) -> u32 {
        self.steps.total()
    }

    /// The detector bank.
    pub fn detectors(&self) -> &DetectorBank {
        &self.detectors
    }
}

impl Default for WorkoutController {
    fn default() -> Self {
        Self::new()
    }
}

/// Full state snapshot for display/API.
///
/// Exercise fields describe the current plan entry and are zero/empty when
/// no plan is loaded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkoutState {
    /// Current mode.
    pub mode: Mode,
    /// Whether a plan has been submitted since boot.
    pub plan_configured: bool,
    /// Name of the current exercise.
    pub exercise_name: ExerciseName,
    /// Type of the current exercise.
    pub exercise_type: Option<ExerciseType>,
    /// Index of the current exercise.
    pub exercise_index: usize,
    /// Current set, starting at 1.
    pub set_number: u8,
    /// Sets planned for the current exercise.
    pub total_sets: u8,
    /// Reps done in the current set.
    pub rep_number: u8,
    /// Reps planned per set.
    pub target_reps: u8,
    /// Rest countdown in seconds, never negative.
    pub rest_remaining_s: u16,
    /// Steps counted since boot.
    pub steps: u32,
}

//! State shared between the web server and the device loop.
//!
//! The web server never touches the controller. It only drops a whole
//! validated [`WorkoutPlan`] into an inbox; the loop takes it at the start of
//! its next iteration and publishes a [`WorkoutState`] snapshot back for the
//! status endpoint.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use rs_reps::services::SharedDeviceState;
//!
//! let shared = Arc::new(SharedDeviceState::new());
//!
//! // Web handler
//! shared.submit_plan(plan);
//!
//! // Device loop
//! let report = device.poll(shared.take_plan());
//! shared.publish_state(report.state);
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::session::WorkoutState;
use crate::workout::WorkoutPlan;

// ============================================================================
// Plan Inbox Trait
// ============================================================================

/// Access the web handlers need to the running device.
///
/// This abstraction allows the same handler logic to sit on top of different
/// state sharing strategies.
pub trait PlanInbox: Send + Sync {
    /// Hand a validated plan to the device loop, replacing any plan not yet
    /// picked up.
    fn submit_plan(&self, plan: WorkoutPlan);

    /// Latest state published by the device loop.
    fn snapshot(&self) -> WorkoutState;
}

// ============================================================================
// Shared Device State
// ============================================================================

/// Plan inbox plus the last published state snapshot.
///
/// The two halves have separate locks so a slow status request never delays
/// a submission.
#[derive(Debug, Default)]
pub struct SharedDeviceState {
    inbox: Mutex<Option<WorkoutPlan>>,
    snapshot: Mutex<WorkoutState>,
}

impl SharedDeviceState {
    /// Create an empty inbox with a default snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a plan for the loop. A plan not yet taken is replaced.
    pub fn submit_plan(&self, plan: WorkoutPlan) {
        *lock(&self.inbox) = Some(plan);
    }

    /// Take the pending plan, leaving the inbox empty.
    pub fn take_plan(&self) -> Option<WorkoutPlan> {
        lock(&self.inbox).take()
    }

    /// Whether a plan is waiting to be picked up.
    pub fn has_pending_plan(&self) -> bool {
        lock(&self.inbox).is_some()
    }

    /// Publish the loop's latest state.
    pub fn publish_state(&self, state: WorkoutState) {
        *lock(&self.snapshot) = state;
    }

    /// Latest published state.
    pub fn state(&self) -> WorkoutState {
        lock(&self.snapshot).clone()
    }
}

/// A panicked holder cannot leave a half-written plan or snapshot behind, so
/// a poisoned lock is still safe to use.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl PlanInbox for SharedDeviceState {
    fn submit_plan(&self, plan: WorkoutPlan) {
        SharedDeviceState::submit_plan(self, plan);
    }

    fn snapshot(&self) -> WorkoutState {
        self.state()
    }
}

impl<T: PlanInbox + ?Sized> PlanInbox for Arc<T> {
    fn submit_plan(&self, plan: WorkoutPlan) {
        (**self).submit_plan(plan);
    }

    fn snapshot(&self) -> WorkoutState {
        (**self).snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Mode;
    use crate::workout::{ExerciseSpec, ExerciseType};

    fn plan(sets: u8) -> WorkoutPlan {
        let spec = ExerciseSpec::new(ExerciseType::Squat, sets, 10, 60).unwrap();
        WorkoutPlan::new([spec.clone(), spec.clone(), spec])
    }

    #[test]
    fn inbox_starts_empty() {
        let shared = SharedDeviceState::new();
        assert!(!shared.has_pending_plan());
        assert!(shared.take_plan().is_none());
    }

    #[test]
    fn take_empties_inbox() {
        let shared = SharedDeviceState::new();
        shared.submit_plan(plan(3));
        assert!(shared.has_pending_plan());
        assert_eq!(shared.take_plan().map(|p| p[0].sets), Some(3));
        assert!(shared.take_plan().is_none());
    }

    #[test]
    fn later_submission_replaces_pending() {
        let shared = SharedDeviceState::new();
        shared.submit_plan(plan(3));
        shared.submit_plan(plan(5));
        assert_eq!(shared.take_plan().map(|p| p[0].sets), Some(5));
    }

    #[test]
    fn snapshot_round_trip() {
        let shared = Arc::new(SharedDeviceState::new());
        assert_eq!(shared.snapshot().mode, Mode::StepCounting);

        shared.publish_state(WorkoutState {
            mode: Mode::Resting,
            steps: 42,
            ..Default::default()
        });
        let state = PlanInbox::snapshot(&shared);
        assert_eq!(state.mode, Mode::Resting);
        assert_eq!(state.steps, 42);
    }

    #[test]
    fn shared_across_threads() {
        let shared = Arc::new(SharedDeviceState::new());
        let web = Arc::clone(&shared);
        std::thread::spawn(move || web.submit_plan(plan(2)))
            .join()
            .unwrap();
        assert!(shared.take_plan().is_some());
    }
}

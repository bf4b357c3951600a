//! Edge case and boundary condition tests for plans, detectors, and timers

use rs_reps::{
    parse_plan_form, Debouncer, DetectorBank, ExerciseSpec, ExerciseType, FormError, Mode,
    MotionSample, PlanError, RepDetector, SessionEvent, StepDetector, ThresholdDetector,
    ToggleOutcome, WorkoutController, WorkoutPlan,
};

fn form(sets: &str, reps: &str, rest: &str) -> String {
    (0..3)
        .map(|i| format!("exercise{i}=0&sets{i}={sets}&reps{i}={reps}&rest{i}={rest}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn curls(sets: u8, reps: u8, rest: u16) -> WorkoutPlan {
    let spec = ExerciseSpec::new(ExerciseType::BicepCurl, sets, reps, rest).unwrap();
    WorkoutPlan::new([spec.clone(), spec.clone(), spec])
}

// ============================================================================
// Plan Boundary Values
// ============================================================================

#[test]
fn sets_boundaries() {
    let new = |sets| ExerciseSpec::new(ExerciseType::Squat, sets, 10, 60);
    assert_eq!(new(0), Err(PlanError::SetsOutOfRange(0)));
    assert!(new(1).is_ok());
    assert!(new(10).is_ok());
    assert_eq!(new(11), Err(PlanError::SetsOutOfRange(11)));
}

#[test]
fn reps_boundaries() {
    let new = |reps| ExerciseSpec::new(ExerciseType::Squat, 3, reps, 60);
    assert_eq!(new(0), Err(PlanError::RepsOutOfRange(0)));
    assert!(new(1).is_ok());
    assert!(new(50).is_ok());
    assert_eq!(new(51), Err(PlanError::RepsOutOfRange(51)));
}

#[test]
fn rest_boundaries() {
    let new = |rest| ExerciseSpec::new(ExerciseType::Squat, 3, 10, rest);
    assert_eq!(new(4), Err(PlanError::RestOutOfRange(4)));
    assert!(new(5).is_ok());
    assert!(new(300).is_ok());
    assert_eq!(new(301), Err(PlanError::RestOutOfRange(301)));
}

#[test]
fn form_accepts_extreme_valid_values() {
    let plan = parse_plan_form(&form("10", "50", "300")).unwrap();
    assert_eq!(plan.total_reps(), 3 * 10 * 50);

    let plan = parse_plan_form(&form("1", "1", "5")).unwrap();
    assert_eq!(plan.total_reps(), 3);
}

#[test]
fn form_values_beyond_u8_report_submitted_value() {
    let err = parse_plan_form(&form("300", "10", "60")).unwrap_err();
    assert_eq!(
        err,
        FormError::Plan {
            slot: 0,
            error: PlanError::SetsOutOfRange(300)
        }
    );
}

#[test]
fn form_values_beyond_u16_are_invalid() {
    let err = parse_plan_form(&form("3", "10", "70000")).unwrap_err();
    assert_eq!(
        err,
        FormError::InvalidNumber {
            field: "rest",
            slot: 0
        }
    );
}

#[test]
fn form_rejects_negative_and_fractional() {
    assert!(matches!(
        parse_plan_form(&form("-1", "10", "60")),
        Err(FormError::InvalidNumber { field: "sets", .. })
    ));
    assert!(matches!(
        parse_plan_form(&form("3", "2.5", "60")),
        Err(FormError::InvalidNumber { field: "reps", .. })
    ));
}

#[test]
fn form_rejects_empty_value() {
    assert!(matches!(
        parse_plan_form(&form("3", "", "60")),
        Err(FormError::MissingField { field: "reps", slot: 0 })
    ));
}

#[test]
fn form_slot_keys_must_match_exactly() {
    // "sets0x" is not "sets0"
    let body = form("3", "10", "60").replace("sets0=", "sets0x=");
    assert!(matches!(
        parse_plan_form(&body),
        Err(FormError::MissingField { field: "sets", slot: 0 })
    ));
}

#[test]
fn empty_body_reports_first_field() {
    assert_eq!(
        parse_plan_form(""),
        Err(FormError::MissingField {
            field: "exercise",
            slot: 0
        })
    );
}

// ============================================================================
// Detector Thresholds
// ============================================================================

#[test]
fn exact_threshold_values_do_not_trigger() {
    let mut bank = DetectorBank::new();

    // Deadlift: entry > -9.0, release < -12.0
    let deadlift = bank.detector_mut(ExerciseType::Deadlift);
    assert!(!deadlift.detect(&MotionSample::accel(0.0, -9.0, 0.0), 5_000));
    assert!(!deadlift.detect(&MotionSample::accel(0.0, -12.5, 0.0), 5_100));

    // Lateral raise: entry > 100, release < -80
    let raise = bank.detector_mut(ExerciseType::LateralRaise);
    assert!(!raise.detect(&MotionSample::gyro(100.0, 0.0, 0.0), 0));
    assert!(!raise.detect(&MotionSample::gyro(-90.0, 0.0, 0.0), 10));
    assert!(!raise.detect(&MotionSample::gyro(100.5, 0.0, 0.0), 20));
    assert!(!raise.detect(&MotionSample::gyro(-80.0, 0.0, 0.0), 30));
    assert!(raise.detect(&MotionSample::gyro(-80.5, 0.0, 0.0), 40));
}

#[test]
fn gated_detectors_hold_off_right_after_boot() {
    let mut press = ThresholdDetector::shoulder_press();
    // Arm gate: 1000 ms since the boot-time fire stamp
    press.detect(&MotionSample::gyro(0.0, 3.0, 0.0), 999);
    assert!(!press.is_armed());
    press.detect(&MotionSample::gyro(0.0, 3.0, 0.0), 1_000);
    assert!(press.is_armed());
    assert!(press.detect(&MotionSample::gyro(0.0, -2.0, 0.0), 1_050));
}

#[test]
fn detectors_keep_state_across_exercises() {
    let mut bank = DetectorBank::new();
    bank.detector_mut(ExerciseType::BicepCurl)
        .detect(&MotionSample::accel(0.0, 0.0, 4.0), 0);

    // Feeding another detector leaves the curl armed
    bank.detector_mut(ExerciseType::Squat)
        .detect(&MotionSample::accel(0.0, 1.0, 0.0), 10);
    assert!(bank.detector(ExerciseType::BicepCurl).is_armed());

    bank.reset_all();
    assert!(!bank.detector(ExerciseType::BicepCurl).is_armed());
    assert!(!bank.detector(ExerciseType::Squat).is_armed());
}

// ============================================================================
// Timing Edge Cases
// ============================================================================

#[test]
fn rest_countdown_never_negative() {
    let mut c = WorkoutController::new();
    c.configure(curls(2, 1, 5), 0);
    c.toggle(0);
    c.tick(&MotionSample::accel(0.0, 0.0, 4.0), 100);
    c.tick(&MotionSample::accel(0.0, 0.0, -4.0), 110);
    assert_eq!(c.mode(), Mode::Resting);

    // Long stall between ticks
    assert_eq!(c.rest_remaining_s(60_000), Some(0));
    assert_eq!(c.state(60_000).rest_remaining_s, 0);
    assert_eq!(c.tick(&MotionSample::default(), 60_000), SessionEvent::RestFinished);
}

#[test]
fn clock_behind_rest_start_saturates() {
    let mut c = WorkoutController::new();
    c.configure(curls(2, 1, 5), 0);
    c.toggle(0);
    c.tick(&MotionSample::accel(0.0, 0.0, 4.0), 1_000);
    c.tick(&MotionSample::accel(0.0, 0.0, -4.0), 1_010);

    assert_eq!(c.rest_remaining_s(500), Some(5));
    assert_eq!(c.tick(&MotionSample::default(), 500), SessionEvent::None);
}

#[test]
fn timestamps_near_u64_max() {
    let mut steps = StepDetector::new();
    let late = u64::MAX - 1_000;
    assert!(steps.update(&MotionSample::accel(0.0, -5.0, 0.0), late));
    steps.update(&MotionSample::accel(0.0, -10.0, 0.0), late + 100);
    assert!(!steps.update(&MotionSample::accel(0.0, -5.0, 0.0), late + 200));
    assert!(steps.update(&MotionSample::accel(0.0, -5.0, 0.0), late + 300));
}

#[test]
fn debounce_window_is_strict() {
    let mut button = Debouncer::active_low(250);
    assert!(!button.update(false, 1_000));
    assert!(!button.update(false, 1_250));
    assert!(button.update(false, 1_251));
}

// ============================================================================
// Mode Controller No-ops
// ============================================================================

#[test]
fn toggles_ignored_in_timer_modes() {
    let mut c = WorkoutController::new();
    c.configure(curls(1, 1, 5), 0);
    c.toggle(0);

    let mut t = 100;
    for _ in 0..2 {
        c.tick(&MotionSample::accel(0.0, 0.0, 4.0), t);
        c.tick(&MotionSample::accel(0.0, 0.0, -4.0), t + 10);
        t += 6_000;
        c.tick(&MotionSample::default(), t);
        t += 100;
    }
    c.tick(&MotionSample::accel(0.0, 0.0, 4.0), t);
    c.tick(&MotionSample::accel(0.0, 0.0, -4.0), t + 10);
    assert_eq!(c.mode(), Mode::Complete);

    assert_eq!(c.toggle(t + 100), ToggleOutcome::Ignored);
    assert_eq!(c.mode(), Mode::Complete);
}

#[test]
fn ready_ignores_motion() {
    let mut c = WorkoutController::new();
    c.configure(curls(1, 1, 5), 0);
    assert_eq!(
        c.tick(&MotionSample::accel(0.0, -5.0, 0.0), 1_000),
        SessionEvent::None
    );
    assert_eq!(c.steps(), 0);
    assert_eq!(c.mode(), Mode::Ready);
}

//! # rs-reps
//!
//! Firmware core for a wrist-worn fitness tracker: a pedometer by default,
//! and a guided rep counter for a three-exercise workout configured from a
//! phone over WiFi.
//!
//! ## Features
//!
//! - **Hardware abstraction**: Traits for the motion sensor, toggle button, clock, and display
//! - **Rep detection**: Per-exercise threshold detectors on one accelerometer or gyroscope axis
//! - **Step counting**: Hysteresis step detector running whenever no workout is active
//! - **Session state machine**: Ready, working, resting, and completion with rest timers
//! - **Web configuration**: Form parsing and an HTTP handler shared by desktop and ESP32
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Hardware abstractions
//! - `motion` - Motion samples and axis selection
//! - `detector` / `step` - Rep and step detection
//! - `workout` - Plan types and validation
//! - `session` - Mode controller and workout state machine
//! - `device` - Cooperative control loop tying peripherals to the controller
//! - `hal` - Concrete implementations (mock for testing, esp32 for hardware)
//! - `services` - Plan inbox and configuration page handlers
//!
//! ## Example
//!
//! ```rust
//! use rs_reps::{
//!     hal::{MockButton, MockClock, MockDisplay, MockSensor},
//!     Config, Device, ExerciseSpec, ExerciseType, Mode, WorkoutPlan,
//! };
//!
//! let mut device = Device::start(
//!     MockSensor::new(),
//!     MockButton::new(),
//!     MockDisplay::new(),
//!     MockClock::new(),
//!     Config::default(),
//! )
//! .unwrap();
//!
//! // A plan arriving from the web server
//! let spec = ExerciseSpec::new(ExerciseType::Squat, 3, 12, 60).unwrap();
//! let plan = WorkoutPlan::new([spec.clone(), spec.clone(), spec]);
//!
//! let report = device.poll(Some(plan));
//! assert!(report.plan_applied);
//! assert_eq!(report.state.mode, Mode::Ready);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Debounced toggle button.
pub mod debounce;
/// Rep detectors for each supported exercise.
pub mod detector;
/// Cooperative device loop over the hardware traits.
pub mod device;
/// Error types for plan validation, form parsing, and startup.
pub mod error;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Motion samples from the 6-axis sensor.
pub mod motion;
/// Workout session state machine and mode controller.
pub mod session;
/// Step detection and step tally.
pub mod step;
/// Core traits for hardware abstraction.
pub mod traits;
/// Exercise types and workout plans.
pub mod workout;

/// Shared configuration system for desktop and ESP32.
pub mod config;

/// Form parsing for the configuration page.
#[cfg(feature = "std")]
pub mod parsing;

/// Plan inbox and HTTP handlers for the configuration page.
#[cfg(feature = "std")]
pub mod services;

// Re-exports for convenience
pub use debounce::Debouncer;
pub use detector::{Crossing, DetectorBank, DetectorProfile, IntervalGate, RepDetector, ThresholdDetector};
pub use device::{Device, PollReport};
pub use error::{FormError, PlanError, StartupError};
pub use motion::{Axis, Channel, MotionSample, Vector3};
pub use session::{Mode, SessionEvent, SessionState, ToggleOutcome, WorkoutController, WorkoutState};
pub use step::{StepCounter, StepDetector};
pub use traits::{ButtonInput, Clock, MotionSensor, WorkoutDisplay};
pub use workout::{ExerciseName, ExerciseSpec, ExerciseType, WorkoutPlan, PLAN_LEN};

// Config re-exports
pub use config::{Config, DeviceConfig, SessionConfig, TimingConfig, WebConfig, WifiConfig};

// Parsing re-exports
#[cfg(feature = "std")]
pub use parsing::{parse_plan_form, PlanForm};

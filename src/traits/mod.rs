//! Trait definitions for hardware abstraction.
//!
//! This module defines the core abstractions that allow rs-reps to run on
//! different hardware (ESP32, desktop mock).
//!
//! # Submodules
//!
//! - `hardware`: Motion sensor, button input, clock
//! - `display`: Display rendering trait
//!
//! # Hardware Abstraction
//!
//! The key hardware traits are:
//!
//! - [`MotionSensor`]: 6-axis accelerometer/gyroscope
//! - [`ButtonInput`]: Raw toggle button level
//! - [`Clock`]: Time source for `no_std` environments
//! - [`WorkoutDisplay`]: Small screen showing the session

pub mod display;
pub mod hardware;

pub use display::*;
pub use hardware::*;

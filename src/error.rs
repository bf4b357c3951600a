//! Error types for plan validation, form parsing, and device startup.

extern crate alloc;

use alloc::string::String;
use core::fmt;

/// A plan entry value outside its allowed range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanError {
    /// Exercise type value not in the name table.
    UnknownExercise(u16),
    /// Sets not in 1..=10.
    SetsOutOfRange(u16),
    /// Reps not in 1..=50.
    RepsOutOfRange(u16),
    /// Rest not in 5..=300 seconds.
    RestOutOfRange(u16),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownExercise(v) => write!(f, "unknown exercise type {}", v),
            Self::SetsOutOfRange(v) => write!(f, "sets must be 1-10, got {}", v),
            Self::RepsOutOfRange(v) => write!(f, "reps must be 1-50, got {}", v),
            Self::RestOutOfRange(v) => write!(f, "rest must be 5-300 seconds, got {}", v),
        }
    }
}

/// Why a configuration form submission was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormError {
    /// A required field was absent or empty.
    MissingField {
        /// Field prefix, e.g. `"reps"`.
        field: &'static str,
        /// Exercise slot.
        slot: usize,
    },
    /// A field was present but not a non-negative integer.
    InvalidNumber {
        /// Field prefix, e.g. `"reps"`.
        field: &'static str,
        /// Exercise slot.
        slot: usize,
    },
    /// The body could not be decoded as a form (e.g. a repeated key).
    Malformed,
    /// Values parsed but failed plan validation.
    Plan {
        /// Exercise slot.
        slot: usize,
        /// Validation failure.
        error: PlanError,
    },
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field, slot } => write!(f, "missing field {}{}", field, slot),
            Self::InvalidNumber { field, slot } => {
                write!(f, "field {}{} is not a valid number", field, slot)
            }
            Self::Malformed => write!(f, "form body could not be decoded"),
            Self::Plan { slot, error } => write!(f, "exercise {}: {}", slot + 1, error),
        }
    }
}

/// A peripheral the device cannot run without failed to initialize.
///
/// The library never halts on its own; the integrating binary decides
/// whether to stop, retry, or degrade.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StartupError {
    /// Inertial sensor did not respond or rejected configuration.
    Sensor(String),
    /// Display controller failed to initialize.
    Display(String),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "motion sensor init failed: {}", e),
            Self::Display(e) => write!(f, "display init failed: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlanError {}

#[cfg(feature = "std")]
impl std::error::Error for FormError {}

#[cfg(feature = "std")]
impl std::error::Error for StartupError {}

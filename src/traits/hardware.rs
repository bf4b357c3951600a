//! Hardware abstraction traits for the motion sensor, button, and clock.
//!
//! This module defines the core hardware interfaces that allow rs-reps to
//! work across different platforms (ESP32, desktop mocks, etc.).
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`MotionSensor`] | 6-axis inertial sensor (accel + gyro) |
//! | [`ButtonInput`] | Raw level of the toggle button |
//! | [`Clock`] | Time source for `no_std` environments |
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations
//! from [`crate::hal::mock`]. For ESP32 hardware, use the
//! implementations from `hal::esp32` (requires `esp32` feature).
//!
//! # Example
//!
//! ```rust
//! use rs_reps::traits::MotionSensor;
//! use rs_reps::hal::MockSensor;
//! use rs_reps::MotionSample;
//!
//! let mut sensor = MockSensor::new();
//! sensor.init().unwrap();
//! sensor.push(MotionSample::accel(0.0, -9.8, 0.0));
//!
//! let sample = sensor.read().unwrap();
//! assert_eq!(sample.accel.y, -9.8);
//! ```

use core::fmt::Debug;

use crate::motion::MotionSample;

/// Inertial sensor trait - abstracts a 6-axis accelerometer/gyroscope.
///
/// Implementations return acceleration in m/s² and angular rate in deg/s.
/// Drivers that report rad/s should convert with
/// [`MotionSample::from_si`].
///
/// # Example Implementation
///
/// ```rust,ignore
/// use rs_reps::traits::MotionSensor;
/// use rs_reps::{MotionSample, Vector3};
///
/// struct MyImu { /* bus handle */ }
///
/// impl MotionSensor for MyImu {
///     type Error = ();
///
///     fn init(&mut self) -> Result<(), ()> {
///         // Wake the chip, set ranges...
///         Ok(())
///     }
///
///     fn read(&mut self) -> Result<MotionSample, ()> {
///         // Burst-read the data registers...
///         Ok(MotionSample::default())
///     }
/// }
/// ```
pub trait MotionSensor {
    /// Error type for sensor operations.
    type Error: Debug;

    /// Bring the sensor up and configure its ranges.
    ///
    /// Called once at startup. A failure here is fatal to the device.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Read one fresh sample.
    fn read(&mut self) -> Result<MotionSample, Self::Error>;
}

/// Toggle button input.
///
/// Returns the raw, undebounced level. Debouncing is done by
/// [`Debouncer`](crate::Debouncer).
pub trait ButtonInput {
    /// Returns true if the input pin reads high.
    fn is_high(&self) -> bool;

    /// Returns true if the input pin reads low.
    ///
    /// With the usual pull-up wiring this means "pressed".
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Time source trait for `no_std` compatibility.
///
/// Provides monotonic time in milliseconds for detector gates, rest timers,
/// and debouncing. On desktop, this can wrap `std::time::Instant`. On
/// embedded, use a hardware timer.
///
/// # Example
///
/// ```rust
/// use rs_reps::traits::Clock;
/// use rs_reps::hal::MockClock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.advance(100);
/// assert_eq!(clock.now_ms(), 100);
/// ```
pub trait Clock {
    /// Returns current time in milliseconds since an arbitrary epoch.
    ///
    /// Must be monotonically increasing.
    fn now_ms(&self) -> u64;
}

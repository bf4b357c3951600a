//! Motion samples produced by the inertial sensor.
//!
//! A [`MotionSample`] carries one reading of linear acceleration (m/s²) and
//! angular rate (deg/s). Detectors compare single axes of these vectors
//! against fixed thresholds, so the units here are part of the contract.
//!
//! # Example
//!
//! ```rust
//! use rs_reps::{MotionSample, Vector3};
//!
//! // Gyro reported in rad/s is converted to deg/s
//! let sample = MotionSample::from_si(
//!     Vector3::new(0.0, -9.8, 0.0),
//!     Vector3::new(core::f32::consts::PI, 0.0, 0.0),
//! );
//! assert!((sample.gyro.x - 180.0).abs() < 0.001);
//! ```

/// Degrees per radian, used to convert gyro readings to deg/s.
pub const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// A three-axis vector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector3 {
    /// X axis component.
    pub x: f32,
    /// Y axis component.
    pub y: f32,
    /// Z axis component.
    pub z: f32,
}

impl Vector3 {
    /// Creates a vector from its components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Returns the component on the given axis.
    #[inline]
    pub const fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

/// Sensor axis selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// X axis.
    X,
    /// Y axis.
    Y,
    /// Z axis.
    Z,
}

/// Which sensor a detector reads from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    /// Linear acceleration, m/s².
    Accel(Axis),
    /// Angular rate, deg/s.
    Gyro(Axis),
}

/// One reading from the inertial sensor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionSample {
    /// Linear acceleration in m/s².
    pub accel: Vector3,
    /// Angular rate in deg/s.
    pub gyro: Vector3,
}

impl MotionSample {
    /// Creates a sample from acceleration (m/s²) and angular rate (deg/s).
    #[inline]
    pub const fn new(accel: Vector3, gyro: Vector3) -> Self {
        Self { accel, gyro }
    }

    /// Creates a sample from SI readings, converting gyro rad/s to deg/s.
    pub fn from_si(accel: Vector3, gyro_rad_s: Vector3) -> Self {
        Self {
            accel,
            gyro: Vector3::new(
                gyro_rad_s.x * RAD_TO_DEG,
                gyro_rad_s.y * RAD_TO_DEG,
                gyro_rad_s.z * RAD_TO_DEG,
            ),
        }
    }

    /// Sample with only acceleration set (gyro at rest).
    pub const fn accel(x: f32, y: f32, z: f32) -> Self {
        Self::new(Vector3::new(x, y, z), Vector3::new(0.0, 0.0, 0.0))
    }

    /// Sample with only angular rate set (acceleration at zero).
    pub const fn gyro(x: f32, y: f32, z: f32) -> Self {
        Self::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(x, y, z))
    }

    /// Reads a single channel.
    #[inline]
    pub const fn channel(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Accel(axis) => self.accel.axis(axis),
            Channel::Gyro(axis) => self.gyro.axis(axis),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_selects_axis() {
        let sample = MotionSample::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(4.0, 5.0, 6.0));
        assert_eq!(sample.channel(Channel::Accel(Axis::X)), 1.0);
        assert_eq!(sample.channel(Channel::Accel(Axis::Z)), 3.0);
        assert_eq!(sample.channel(Channel::Gyro(Axis::Y)), 5.0);
    }

    #[test]
    fn from_si_converts_gyro_only() {
        let sample = MotionSample::from_si(
            Vector3::new(0.5, -9.8, 1.0),
            Vector3::new(1.0, -0.5, 0.0),
        );
        assert_eq!(sample.accel, Vector3::new(0.5, -9.8, 1.0));
        assert!((sample.gyro.x - 57.29578).abs() < 0.001);
        assert!((sample.gyro.y + 28.64789).abs() < 0.001);
        assert_eq!(sample.gyro.z, 0.0);
    }
}

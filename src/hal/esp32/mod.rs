//! ESP32-C3 SuperMini hardware abstraction layer for the wearable.
//!
//! This module provides hardware implementations for the ESP32-C3 SuperMini
//! board worn on the wrist, reading an MPU6050 and driving a small OLED.
//!
//! # Hardware Configuration
//!
//! - **MCU**: ESP32-C3 SuperMini (RISC-V 160MHz, 4MB Flash)
//! - **IMU**: MPU6050 6-axis accelerometer/gyroscope (I2C)
//! - **Display**: SSD1306 128x64 OLED (same I2C bus)
//! - **Button**: Momentary push button to ground, internal pull-up
//!
//! # Pin Assignments
//!
//! See the [`pins`] module for GPIO assignments matching the SuperMini layout.

mod bus;
mod button;
mod clock;
mod imu;

pub use bus::{SharedBus, SharedI2c};
pub use button::Esp32Button;
pub use clock::Esp32Clock;
pub use imu::Mpu6050;

#[cfg(feature = "display")]
mod display;
#[cfg(feature = "display")]
pub use display::{DisplayError, Esp32Display};

#[cfg(feature = "wifi")]
mod wifi;
#[cfg(feature = "wifi")]
pub use wifi::Esp32Wifi;

#[cfg(feature = "esp32-http")]
mod http;
#[cfg(feature = "esp32-http")]
pub use http::Esp32HttpServer;

/// Pin assignments for SuperMini ESP32-C3.
///
/// - Toggle button on GPIO10
/// - I2C bus (IMU + OLED) on GPIO8, 9
pub mod pins {
    // =========================================================================
    // Toggle Button
    // =========================================================================

    /// Push button to ground (active low, internal pull-up)
    pub const BUTTON: i32 = 10;

    // =========================================================================
    // I2C Bus (MPU6050 + SSD1306)
    // =========================================================================

    /// I2C data line (also has onboard blue LED - will flicker during I2C)
    pub const I2C_SDA: i32 = 8;

    /// I2C clock line (also shared with BOOT button - only affects programming)
    pub const I2C_SCL: i32 = 9;

    /// I2C bus speed in kHz
    pub const I2C_BAUD_KHZ: u32 = 400;

    /// Default I2C address for SSD1306 OLED
    pub const OLED_I2C_ADDR: u8 = 0x3C;

    /// Default I2C address for MPU6050 (AD0 low)
    pub const MPU6050_I2C_ADDR: u8 = 0x68;
}

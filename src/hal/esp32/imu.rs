//! MPU6050 register-level driver over the shared I2C bus.
//!
//! Configures accel ±8 g, gyro ±500 °/s and the 21 Hz low-pass filter, then
//! burst-reads all six axes in one 14-byte transfer.

use std::sync::PoisonError;

use anyhow::{bail, Context};
use esp_idf_hal::delay::TickType;

use super::bus::SharedBus;
use super::pins::MPU6050_I2C_ADDR;
use crate::motion::{MotionSample, Vector3};
use crate::traits::MotionSensor;

// MPU6050 register addresses
const REG_PWR_MGMT_1: u8 = 0x6B;
const REG_CONFIG: u8 = 0x1A;
const REG_GYRO_CONFIG: u8 = 0x1B;
const REG_ACCEL_CONFIG: u8 = 0x1C;
const REG_ACCEL_XOUT_H: u8 = 0x3B; // Start of 14-byte sensor burst
const REG_WHO_AM_I: u8 = 0x75;
const WHO_AM_I_EXPECTED: u8 = 0x68;

/// LSB per g at ±8 g.
const ACCEL_SCALE_8G: f32 = 4096.0;
/// LSB per °/s at ±500 °/s.
const GYRO_SCALE_500: f32 = 65.5;
/// Standard gravity in m/s².
const STANDARD_GRAVITY: f32 = 9.806_65;

const I2C_TIMEOUT_MS: u64 = 100;

/// MPU6050 on the shared bus.
///
/// # Example
///
/// ```ignore
/// use rs_reps::hal::esp32::Mpu6050;
/// use rs_reps::traits::MotionSensor;
///
/// let mut imu = Mpu6050::new(i2c_bus);
/// imu.init()?;
/// let sample = imu.read()?;
/// log::info!("accel z = {:.2} m/s²", sample.accel.z);
/// ```
pub struct Mpu6050 {
    bus: SharedBus,
    timeout: u32,
}

impl Mpu6050 {
    /// Creates a driver at the default address. No bus traffic yet.
    pub fn new(bus: SharedBus) -> Self {
        Self {
            bus,
            timeout: TickType::new_millis(I2C_TIMEOUT_MS).ticks(),
        }
    }

    fn write_register(&self, reg: u8, value: u8) -> anyhow::Result<()> {
        let mut bus = self.bus.lock().unwrap_or_else(PoisonError::into_inner);
        bus.write(MPU6050_I2C_ADDR, &[reg, value], self.timeout)
            .with_context(|| format!("write register 0x{:02X}", reg))?;
        Ok(())
    }

    fn read_registers(&self, start: u8, buf: &mut [u8]) -> anyhow::Result<()> {
        let mut bus = self.bus.lock().unwrap_or_else(PoisonError::into_inner);
        bus.write_read(MPU6050_I2C_ADDR, &[start], buf, self.timeout)
            .with_context(|| format!("read from register 0x{:02X}", start))?;
        Ok(())
    }
}

impl MotionSensor for Mpu6050 {
    type Error = anyhow::Error;

    /// Verify WHO_AM_I, wake the sensor, and set ranges.
    fn init(&mut self) -> anyhow::Result<()> {
        let mut id = [0u8; 1];
        self.read_registers(REG_WHO_AM_I, &mut id)?;
        if id[0] != WHO_AM_I_EXPECTED {
            bail!("unexpected WHO_AM_I 0x{:02X}", id[0]);
        }

        // Wake up (clear SLEEP bit)
        self.write_register(REG_PWR_MGMT_1, 0x00)?;
        // DLPF bandwidth 21 Hz
        self.write_register(REG_CONFIG, 0x04)?;
        // Gyroscope: ±500 °/s
        self.write_register(REG_GYRO_CONFIG, 0x08)?;
        // Accelerometer: ±8 g
        self.write_register(REG_ACCEL_CONFIG, 0x10)?;

        log::info!("MPU6050 initialised (±8g, ±500°/s, DLPF 21Hz)");
        Ok(())
    }

    fn read(&mut self) -> anyhow::Result<MotionSample> {
        let mut raw = [0u8; 14];
        self.read_registers(REG_ACCEL_XOUT_H, &mut raw)?;

        let word = |i: usize| i16::from_be_bytes([raw[i], raw[i + 1]]) as f32;
        let accel = |i: usize| word(i) / ACCEL_SCALE_8G * STANDARD_GRAVITY;
        let gyro = |i: usize| word(i) / GYRO_SCALE_500;

        // raw[6..8] is temperature
        Ok(MotionSample::new(
            Vector3::new(accel(0), accel(2), accel(4)),
            Vector3::new(gyro(8), gyro(10), gyro(12)),
        ))
    }
}

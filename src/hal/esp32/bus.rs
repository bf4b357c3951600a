//! I2C bus shared between the IMU and the OLED.
//!
//! Both devices sit on the same two wires. The driver lives for the whole
//! program inside a `Mutex`; each device takes the lock for one transaction
//! at a time.

use std::sync::{Mutex, PoisonError};

use embedded_hal::i2c::{Error as _, ErrorKind, ErrorType, I2c, Operation};
use esp_idf_hal::i2c::I2cDriver;

/// Thread-safe handle to the shared I2C bus.
pub type SharedBus = &'static Mutex<I2cDriver<'static>>;

/// `embedded-hal` I2C device on top of a [`SharedBus`].
///
/// Hands the display driver its own `I2c` implementor while the IMU keeps
/// using the bus directly.
#[derive(Clone, Copy)]
pub struct SharedI2c {
    bus: SharedBus,
}

impl SharedI2c {
    /// Wraps the shared bus.
    pub fn new(bus: SharedBus) -> Self {
        Self { bus }
    }
}

impl ErrorType for SharedI2c {
    type Error = ErrorKind;
}

impl I2c for SharedI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        // A panic elsewhere cannot leave the driver mid-transaction
        let mut bus = self.bus.lock().unwrap_or_else(PoisonError::into_inner);
        I2c::transaction(&mut *bus, address, operations).map_err(|e| e.kind())
    }
}

//! Toggle button implementation for ESP32.
//!
//! # Wiring
//!
//! - One leg → GPIO10
//! - Other leg → GND
//!
//! The internal pull-up holds the pin high; pressing pulls it low.

use crate::traits::ButtonInput;
use esp_idf_hal::gpio::{Input, InputPin, OutputPin, PinDriver, Pull};
use esp_idf_hal::peripheral::Peripheral;

/// Push button on a GPIO with the internal pull-up enabled.
///
/// Reports the raw level; debouncing happens in the device loop.
///
/// # Example
///
/// ```ignore
/// use rs_reps::hal::esp32::Esp32Button;
/// use rs_reps::traits::ButtonInput;
///
/// let peripherals = Peripherals::take()?;
/// let button = Esp32Button::new(peripherals.pins.gpio10)?;
///
/// if button.is_low() {
///     log::info!("pressed");
/// }
/// ```
pub struct Esp32Button<'d, P>
where
    P: InputPin + OutputPin,
{
    pin: PinDriver<'d, P, Input>,
}

impl<'d, P> Esp32Button<'d, P>
where
    P: InputPin + OutputPin,
{
    /// Configures the pin as an input with pull-up.
    ///
    /// # Errors
    ///
    /// Returns an error if GPIO initialization fails.
    pub fn new(pin: impl Peripheral<P = P> + 'd) -> Result<Self, esp_idf_hal::sys::EspError> {
        let mut pin = PinDriver::input(pin)?;
        pin.set_pull(Pull::Up)?;
        Ok(Self { pin })
    }
}

impl<P> ButtonInput for Esp32Button<'_, P>
where
    P: InputPin + OutputPin,
{
    #[inline]
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

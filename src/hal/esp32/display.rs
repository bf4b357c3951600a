//! SSD1306 OLED display implementation for ESP32.
//!
//! Provides a 128x64 pixel display showing the workout state:
//! - Step tally or waiting prompt
//! - Exercise, set and rep counters with a progress bar
//! - Rest countdown
//! - Completion banner
//!
//! # Wiring
//!
//! - SDA → GPIO8 (shared with the MPU6050)
//! - SCL → GPIO9 (shared with the MPU6050)
//! - VCC → 3.3V
//! - GND → GND

use crate::session::WorkoutState;
use crate::traits::{Screen, WorkoutDisplay};
use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, ascii::FONT_9X15_BOLD, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::Text,
};
use ssd1306::{mode::BufferedGraphicsMode, prelude::*, I2CDisplayInterface, Ssd1306};

use super::bus::{SharedBus, SharedI2c};

/// SSD1306 display type alias for cleaner code.
type DisplayDriver = Ssd1306<
    I2CInterface<SharedI2c>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

/// Width of the progress bar in pixels (4px margin each side).
const BAR_WIDTH: u32 = 120;

/// SSD1306 OLED display for ESP32.
///
/// Shares the I2C bus with the IMU through [`SharedI2c`].
///
/// # Display Layout
///
/// ```text
/// ┌────────────────────────────┐
/// │ Squat                      │  Title
/// │                            │
/// │ Set 2/3                    │  Body (large font)
/// │ Rep 5/12                   │  Footer
/// │████████████░░░░░░░░░░░░░░░░│  Progress bar (working only)
/// └────────────────────────────┘
/// ```
pub struct Esp32Display {
    display: DisplayDriver,
}

impl Esp32Display {
    /// Creates a new display instance. No bus traffic until [`init`](WorkoutDisplay::init).
    ///
    /// # Arguments
    ///
    /// * `bus` - Shared I2C bus configured for GPIO8/9
    pub fn new(bus: SharedBus) -> Self {
        let interface = I2CDisplayInterface::new(SharedI2c::new(bus));
        let display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();

        Self { display }
    }
}

impl WorkoutDisplay for Esp32Display {
    type Error = DisplayError;

    fn init(&mut self) -> Result<(), Self::Error> {
        self.display.init()?;
        self.clear()
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.display.clear(BinaryColor::Off)?;
        self.display.flush()?;
        Ok(())
    }

    fn render(&mut self, state: &WorkoutState) -> Result<(), Self::Error> {
        let screen = Screen::for_state(state);

        self.display.clear(BinaryColor::Off)?;

        let small = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let large = MonoTextStyle::new(&FONT_9X15_BOLD, BinaryColor::On);

        Text::new(&screen.title, Point::new(4, 10), small).draw(&mut self.display)?;
        Text::new(&screen.body, Point::new(4, 32), large).draw(&mut self.display)?;
        Text::new(&screen.footer, Point::new(4, 46), small).draw(&mut self.display)?;

        if let Some(pct) = screen.progress {
            let outline = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
            Rectangle::new(Point::new(4, 54), Size::new(BAR_WIDTH, 8))
                .into_styled(outline)
                .draw(&mut self.display)?;

            let filled = BAR_WIDTH * pct as u32 / 100;
            if filled > 0 {
                Rectangle::new(Point::new(4, 54), Size::new(filled, 8))
                    .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
                    .draw(&mut self.display)?;
            }
        }

        self.display.flush()?;
        Ok(())
    }

    fn show_message(&mut self, line1: &str, line2: Option<&str>) -> Result<(), Self::Error> {
        self.display.clear(BinaryColor::Off)?;

        let text_style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);

        // Center the text vertically
        Text::new(line1, Point::new(4, 24), text_style).draw(&mut self.display)?;

        if let Some(l2) = line2 {
            Text::new(l2, Point::new(4, 40), text_style).draw(&mut self.display)?;
        }

        self.display.flush()?;
        Ok(())
    }
}

/// Display error type.
#[derive(Debug)]
pub struct DisplayError;

impl From<display_interface::DisplayError> for DisplayError {
    fn from(_: display_interface::DisplayError) -> Self {
        DisplayError
    }
}

//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for all hardware traits, enabling
//! development and testing on desktop without physical hardware.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockSensor`] | [`MotionSensor`] | Queued motion samples |
//! | [`MockButton`] | [`ButtonInput`] | Settable raw level |
//! | [`MockClock`] | [`Clock`] | Controllable time source |
//! | [`MockDisplay`] | [`WorkoutDisplay`] | Tracks render calls |
//!
//! # Example
//!
//! ```rust
//! use rs_reps::hal::{MockButton, MockClock, MockDisplay, MockSensor};
//! use rs_reps::Device;
//!
//! let mut device = Device::start(
//!     MockSensor::new(),
//!     MockButton::new(),
//!     MockDisplay::new(),
//!     MockClock::new(),
//!     Default::default(),
//! )
//! .unwrap();
//!
//! device.poll(None);
//! assert_eq!(device.display().render_count, 1);
//! ```
//!
//! [`MotionSensor`]: crate::traits::MotionSensor
//! [`ButtonInput`]: crate::traits::ButtonInput
//! [`Clock`]: crate::traits::Clock
//! [`WorkoutDisplay`]: crate::traits::WorkoutDisplay

extern crate alloc;
use alloc::collections::VecDeque;
use alloc::string::String;

use crate::motion::MotionSample;
use crate::session::WorkoutState;
use crate::traits::{ButtonInput, Clock, MotionSensor, WorkoutDisplay};

// ============================================================================
// Hardware Mocks
// ============================================================================

/// Standard gravity on the vertical axis of a wrist at rest.
pub const RESTING_SAMPLE: MotionSample = MotionSample::accel(0.0, -9.81, 0.0);

/// Mock motion sensor for testing.
///
/// Returns queued samples in FIFO order, then [`idle`](Self::idle) once the
/// queue is empty. Failure flags simulate a dead bus.
///
/// # Example
///
/// ```rust
/// use rs_reps::hal::MockSensor;
/// use rs_reps::traits::MotionSensor;
/// use rs_reps::MotionSample;
///
/// let mut sensor = MockSensor::new();
/// sensor.push(MotionSample::accel(0.0, 0.0, 4.0));
///
/// assert_eq!(sensor.read().unwrap().accel.z, 4.0);
/// assert_eq!(sensor.read().unwrap(), sensor.idle); // queue drained
/// assert_eq!(sensor.read_count, 2);
/// ```
#[derive(Debug)]
pub struct MockSensor {
    samples: VecDeque<MotionSample>,
    /// Sample returned when the queue is empty.
    pub idle: MotionSample,
    /// Make `init()` fail.
    pub fail_init: bool,
    /// Make `read()` fail.
    pub fail_reads: bool,
    /// Whether init() was called successfully.
    pub initialized: bool,
    /// Number of times read() was called.
    pub read_count: usize,
}

impl MockSensor {
    /// Creates a sensor at rest with an empty queue.
    pub fn new() -> Self {
        Self {
            samples: VecDeque::new(),
            idle: RESTING_SAMPLE,
            fail_init: false,
            fail_reads: false,
            initialized: false,
            read_count: 0,
        }
    }

    /// Creates a sensor whose `init()` fails.
    pub fn failing() -> Self {
        Self {
            fail_init: true,
            ..Self::new()
        }
    }

    /// Queue one sample.
    pub fn push(&mut self, sample: MotionSample) {
        self.samples.push_back(sample);
    }

    /// Queue several samples.
    pub fn extend(&mut self, samples: &[MotionSample]) {
        self.samples.extend(samples.iter().copied());
    }

    /// Samples still queued.
    pub fn pending(&self) -> usize {
        self.samples.len()
    }
}

impl Default for MockSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionSensor for MockSensor {
    type Error = &'static str;

    fn init(&mut self) -> Result<(), Self::Error> {
        if self.fail_init {
            return Err("no ack from sensor");
        }
        self.initialized = true;
        Ok(())
    }

    fn read(&mut self) -> Result<MotionSample, Self::Error> {
        self.read_count += 1;
        if self.fail_reads {
            return Err("bus read failed");
        }
        Ok(self.samples.pop_front().unwrap_or(self.idle))
    }
}

/// Mock push button for testing.
///
/// Idles high like a pull-up input; [`press`](Self::press) pulls it low.
///
/// # Example
///
/// ```rust
/// use rs_reps::hal::MockButton;
/// use rs_reps::traits::ButtonInput;
///
/// let mut button = MockButton::new();
/// assert!(button.is_high());
///
/// button.press();
/// assert!(button.is_low());
/// ```
#[derive(Debug)]
pub struct MockButton {
    /// Raw pin level.
    pub level: bool,
}

impl MockButton {
    /// Creates a released button (pin high).
    pub fn new() -> Self {
        Self { level: true }
    }

    /// Pull the pin low.
    pub fn press(&mut self) {
        self.level = false;
    }

    /// Let the pin float back high.
    pub fn release(&mut self) {
        self.level = true;
    }
}

impl Default for MockButton {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonInput for MockButton {
    fn is_high(&self) -> bool {
        self.level
    }
}

/// Mock clock for testing.
///
/// Provides a controllable time source for testing time-dependent behavior.
///
/// # Example
///
/// ```rust
/// use rs_reps::hal::MockClock;
/// use rs_reps::traits::Clock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.set(1000);
/// assert_eq!(clock.now_ms(), 1000);
///
/// clock.advance(500);
/// assert_eq!(clock.now_ms(), 1500);
/// ```
#[derive(Debug)]
pub struct MockClock {
    current_ms: u64,
}

impl MockClock {
    /// Creates a new mock clock starting at 0ms.
    pub fn new() -> Self {
        Self { current_ms: 0 }
    }

    /// Creates a mock clock starting at the given time.
    pub fn starting_at(ms: u64) -> Self {
        Self { current_ms: ms }
    }

    /// Sets the current time in milliseconds.
    pub fn set(&mut self, ms: u64) {
        self.current_ms = ms;
    }

    /// Advances the clock by the given duration.
    pub fn advance(&mut self, ms: u64) {
        self.current_ms += ms;
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.current_ms
    }
}

// ============================================================================
// Display Mocks
// ============================================================================

/// Mock display for testing UI rendering.
///
/// Tracks render calls and stores the last rendered state for verification.
///
/// # Example
///
/// ```
/// use rs_reps::hal::MockDisplay;
/// use rs_reps::traits::WorkoutDisplay;
///
/// let mut display = MockDisplay::new();
/// display.init().unwrap();
/// assert_eq!(display.render_count, 0);
/// ```
#[derive(Debug, Default)]
pub struct MockDisplay {
    /// The last state that was rendered.
    pub last_state: Option<WorkoutState>,
    /// Number of times render() was called.
    pub render_count: usize,
    /// Last message shown via show_message().
    pub last_message: Option<(String, Option<String>)>,
    /// Whether init() was called.
    pub initialized: bool,
    /// Make `init()` fail.
    pub fail_init: bool,
    /// Make `render()` fail.
    pub fail_render: bool,
}

impl MockDisplay {
    /// Creates a new mock display.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a display whose `init()` fails.
    pub fn failing() -> Self {
        Self {
            fail_init: true,
            ..Self::default()
        }
    }
}

impl WorkoutDisplay for MockDisplay {
    type Error = &'static str;

    fn init(&mut self) -> Result<(), Self::Error> {
        if self.fail_init {
            return Err("display controller not found");
        }
        self.initialized = true;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.last_state = None;
        Ok(())
    }

    fn render(&mut self, state: &WorkoutState) -> Result<(), Self::Error> {
        if self.fail_render {
            return Err("i2c write failed");
        }
        self.last_state = Some(state.clone());
        self.render_count += 1;
        Ok(())
    }

    fn show_message(&mut self, line1: &str, line2: Option<&str>) -> Result<(), Self::Error> {
        self.last_message = Some((line1.into(), line2.map(Into::into)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Mode;

    // =========================================================================
    // MockSensor Tests
    // =========================================================================

    #[test]
    fn mock_sensor_fifo_then_idle() {
        let mut sensor = MockSensor::new();
        sensor.extend(&[
            MotionSample::accel(1.0, 0.0, 0.0),
            MotionSample::accel(2.0, 0.0, 0.0),
        ]);
        assert_eq!(sensor.pending(), 2);

        assert_eq!(sensor.read().unwrap().accel.x, 1.0);
        assert_eq!(sensor.read().unwrap().accel.x, 2.0);
        assert_eq!(sensor.read().unwrap(), RESTING_SAMPLE);
        assert_eq!(sensor.read_count, 3);
    }

    #[test]
    fn mock_sensor_failures() {
        let mut sensor = MockSensor::failing();
        assert!(sensor.init().is_err());
        assert!(!sensor.initialized);

        let mut sensor = MockSensor::new();
        sensor.fail_reads = true;
        assert!(sensor.read().is_err());
        assert_eq!(sensor.read_count, 1);
    }

    // =========================================================================
    // MockButton / MockClock Tests
    // =========================================================================

    #[test]
    fn mock_button_press_release() {
        let mut button = MockButton::new();
        assert!(button.is_high());
        button.press();
        assert!(!button.is_high());
        button.release();
        assert!(button.is_high());
    }

    #[test]
    fn mock_clock_starting_at() {
        let mut clock = MockClock::starting_at(5000);
        assert_eq!(clock.now_ms(), 5000);
        clock.advance(10);
        assert_eq!(clock.now_ms(), 5010);
    }

    // =========================================================================
    // MockDisplay Tests
    // =========================================================================

    #[test]
    fn mock_display_tracks_renders() {
        let mut display = MockDisplay::new();
        display.init().unwrap();
        assert!(display.initialized);

        let state = WorkoutState {
            mode: Mode::Ready,
            ..Default::default()
        };
        display.render(&state).unwrap();
        display.render(&state).unwrap();

        assert_eq!(display.render_count, 2);
        assert_eq!(display.last_state.as_ref().map(|s| s.mode), Some(Mode::Ready));

        display.clear().unwrap();
        assert!(display.last_state.is_none());
    }

    #[test]
    fn mock_display_message() {
        let mut display = MockDisplay::new();
        display.show_message("Hello", Some("World")).unwrap();
        assert_eq!(
            display.last_message,
            Some(("Hello".into(), Some("World".into())))
        );
    }

    #[test]
    fn mock_display_failures() {
        let mut display = MockDisplay::failing();
        assert!(display.init().is_err());

        let mut display = MockDisplay::new();
        display.fail_render = true;
        assert!(display.render(&WorkoutState::default()).is_err());
        assert_eq!(display.render_count, 0);
    }
}

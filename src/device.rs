//! The device control loop.
//!
//! [`Device`] bundles the peripherals with the [`WorkoutController`] and runs
//! one cooperative loop iteration per [`poll`](Device::poll), always in this
//! order:
//!
//! 1. Apply a plan handed over by the web server, if any.
//! 2. Sample and debounce the button; a toggle goes to the mode controller.
//! 3. Run the handler for the current mode on a fresh motion sample.
//! 4. Render the display.
//!
//! The caller sleeps for [`PollReport::delay_ms`] between iterations. Startup
//! failures of the sensor or display are returned as [`StartupError`]; the
//! library never halts on its own.
//!
//! # Example
//!
//! ```rust
//! use rs_reps::hal::{MockButton, MockClock, MockDisplay, MockSensor};
//! use rs_reps::{Config, Device, Mode, StartupError};
//!
//! let result = Device::start(
//!     MockSensor::failing(),
//!     MockButton::new(),
//!     MockDisplay::new(),
//!     MockClock::new(),
//!     Config::default(),
//! );
//! assert!(matches!(result, Err(StartupError::Sensor(_))));
//!
//! let mut device = Device::start(
//!     MockSensor::new(),
//!     MockButton::new(),
//!     MockDisplay::new(),
//!     MockClock::new(),
//!     Config::default(),
//! )
//! .unwrap();
//!
//! let report = device.poll(None);
//! assert_eq!(report.state.mode, Mode::StepCounting);
//! assert_eq!(report.delay_ms, 50);
//! ```

extern crate alloc;
use alloc::format;

use crate::config::{Config, TimingConfig};
use crate::debounce::Debouncer;
use crate::error::StartupError;
use crate::motion::MotionSample;
use crate::session::{Mode, SessionEvent, ToggleOutcome, WorkoutController, WorkoutState};
use crate::traits::{ButtonInput, Clock, MotionSensor, WorkoutDisplay};
use crate::workout::WorkoutPlan;

/// What happened during one loop iteration.
#[derive(Clone, Debug)]
pub struct PollReport {
    /// A submitted plan was applied.
    pub plan_applied: bool,
    /// Outcome of a debounced button toggle, if one occurred.
    pub toggle: Option<ToggleOutcome>,
    /// Result of the mode handler.
    pub event: SessionEvent,
    /// State after the iteration, as rendered.
    pub state: WorkoutState,
    /// How long the caller should wait before the next poll.
    pub delay_ms: u32,
}

/// A running device: peripherals plus controller.
pub struct Device<S, B, D, C> {
    sensor: S,
    button: B,
    display: D,
    clock: C,
    debouncer: Debouncer,
    controller: WorkoutController,
    timing: TimingConfig,
}

impl<S, B, D, C> Device<S, B, D, C>
where
    S: MotionSensor,
    B: ButtonInput,
    D: WorkoutDisplay,
    C: Clock,
{
    /// Bring up the display and sensor and build the controller.
    ///
    /// The display comes up first so a sensor failure can be shown on it.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError`] if either peripheral fails to initialize.
    pub fn start(
        mut sensor: S,
        button: B,
        mut display: D,
        clock: C,
        config: Config,
    ) -> Result<Self, StartupError> {
        display
            .init()
            .map_err(|e| StartupError::Display(format!("{:?}", e)))?;
        log::info!("display ready");

        if let Err(e) = sensor.init() {
            let _ = display.show_message("Sensor error", Some("Check wiring"));
            return Err(StartupError::Sensor(format!("{:?}", e)));
        }
        log::info!("motion sensor ready");

        if let Err(e) = display.show_message(config.device.name.as_str(), Some("Starting")) {
            log::warn!("boot message failed: {:?}", e);
        }

        Ok(Self {
            sensor,
            button,
            display,
            clock,
            debouncer: Debouncer::active_low(config.timing.debounce_ms as u64),
            controller: WorkoutController::with_config(config.session),
            timing: config.timing,
        })
    }

    /// Run one loop iteration.
    ///
    /// `pending_plan` is whatever the web server left in the inbox since the
    /// last call.
    pub fn poll(&mut self, pending_plan: Option<WorkoutPlan>) -> PollReport {
        let now_ms = self.clock.now_ms();

        let plan_applied = match pending_plan {
            Some(plan) => {
                self.controller.configure(plan, now_ms);
                true
            }
            None => false,
        };

        let toggle = self
            .debouncer
            .update(self.button.is_high(), now_ms)
            .then(|| self.controller.toggle(now_ms));

        let event = match self.next_sample() {
            Some(sample) => self.controller.tick(&sample, now_ms),
            None => SessionEvent::None,
        };
        if event != SessionEvent::None {
            log::debug!("{:?} at {}ms", event, now_ms);
        }

        let state = self.controller.state(now_ms);
        if let Err(e) = self.display.render(&state) {
            log::warn!("display render failed: {:?}", e);
        }

        let delay_ms = if state.mode == Mode::StepCounting {
            self.timing.step_pacing_ms
        } else {
            self.timing.loop_interval_ms
        };

        PollReport {
            plan_applied,
            toggle,
            event,
            state,
            delay_ms,
        }
    }

    /// Reads the sensor only when the current mode uses motion. Timer-driven
    /// modes tick on a neutral sample so a flaky bus cannot stall them.
    fn next_sample(&mut self) -> Option<MotionSample> {
        if !self.controller.mode().samples_motion() {
            return Some(MotionSample::default());
        }
        match self.sensor.read() {
            Ok(sample) => Some(sample),
            Err(e) => {
                log::warn!("motion sensor read failed: {:?}", e);
                None
            }
        }
    }

    /// The workout controller.
    pub fn controller(&self) -> &WorkoutController {
        &self.controller
    }

    /// The display.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Mutable access to the display.
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// The motion sensor.
    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    /// Mutable access to the motion sensor.
    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    /// Mutable access to the button.
    pub fn button_mut(&mut self) -> &mut B {
        &mut self.button
    }

    /// Mutable access to the clock.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}

//! Desktop server example for trying the configuration page without hardware.
//!
//! This example runs the web server next to a simulated device, allowing you to:
//! - Open the configuration form at http://localhost:8080
//! - Submit a workout and watch `/api/state` follow it
//! - See steps accumulate from a synthetic walking pattern
//!
//! # Simulation
//!
//! The device loop runs on its own thread with mock peripherals. Motion is
//! synthesized from the current mode: a walking sway while step counting,
//! and the matching detector's entry/release pattern while working. The
//! mock button is pressed automatically a few seconds after the device
//! becomes ready.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example desktop_server --features web
//! ```

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use rs_reps::hal::{MockButton, MockDisplay, MockSensor, RESTING_SAMPLE};
use rs_reps::services::{run_server, SharedDeviceState, WebServerConfig};
use rs_reps::traits::Clock;
use rs_reps::{
    Axis, Channel, Config, Crossing, DetectorProfile, Device, Mode, MotionSample, SessionEvent,
};

/// Half-period of the synthetic walking sway.
const STEP_HALF_PERIOD_MS: u64 = 400;

/// Half-period of the synthetic rep pattern.
const REP_HALF_PERIOD_MS: u64 = 700;

/// How long the simulated user waits before pressing the button.
const PRESS_AFTER_MS: u64 = 3000;

/// How long the simulated press is held.
const PRESS_HOLD_MS: u64 = 500;

/// Wall clock since program start.
struct SystemClock {
    start: Instant,
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

fn main() -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;

    println!("=================================");
    println!("  rs-reps Desktop Server");
    println!("=================================");
    println!();

    // Central configuration - modify this for your setup
    let config = Config::default();
    // Example of customization:
    // let config = Config::default()
    //     .with_web(rs_reps::WebConfig::default().with_port(3000))
    //     .with_session(rs_reps::SessionConfig::default().with_reset_detectors_on_resume(true));

    let shared = Arc::new(SharedDeviceState::new());

    let device_state = Arc::clone(&shared);
    let device_config = config.clone();
    thread::Builder::new()
        .name("device".into())
        .spawn(move || {
            if let Err(e) = run_simulated_device(device_state, device_config) {
                eprintln!("Device stopped: {}", e);
            }
        })?;

    let server_config = WebServerConfig::from_config(&config.web);

    println!("Starting web server on http://localhost:{}", config.web.port);
    println!();
    println!("Endpoints:");
    println!("  GET  /            - Configuration form");
    println!("  POST /submit      - Submit a workout plan");
    println!("  GET  /api/state   - Current device state");
    println!();

    rt.block_on(run_server(shared, server_config))?;
    Ok(())
}

/// Drives a mock device with synthetic motion until the process exits.
fn run_simulated_device(shared: Arc<SharedDeviceState>, config: Config) -> anyhow::Result<()> {
    let clock = SystemClock {
        start: Instant::now(),
    };
    let mut device = Device::start(
        MockSensor::new(),
        MockButton::new(),
        MockDisplay::new(),
        clock,
        config,
    )?;

    let start = Instant::now();
    let mut press_at: Option<u64> = None;

    loop {
        let now = start.elapsed().as_millis() as u64;
        let state = device.controller().state(now);

        // Simulated thumb on the button
        match press_at {
            Some(at) if now >= at + PRESS_HOLD_MS => {
                device.button_mut().release();
                press_at = None;
            }
            Some(at) if now >= at => device.button_mut().press(),
            None if state.mode == Mode::Ready => press_at = Some(now + PRESS_AFTER_MS),
            _ => {}
        }

        // Only modes that sample motion consume the queue
        if state.mode.samples_motion() {
            device.sensor_mut().push(synthetic_sample(&state, now));
        }

        let report = device.poll(shared.take_plan());
        if report.plan_applied {
            println!("[device] plan received");
        }
        match report.event {
            SessionEvent::None | SessionEvent::StepCounted => {}
            event => println!("[device] {:?} -> {}", event, report.state.mode.as_str()),
        }

        shared.publish_state(report.state);
        thread::sleep(Duration::from_millis(report.delay_ms as u64));
    }
}

/// Motion the simulated wearer produces in the current mode.
fn synthetic_sample(state: &rs_reps::WorkoutState, now: u64) -> MotionSample {
    match (state.mode, state.exercise_type) {
        (Mode::Working, Some(exercise)) => {
            let profile = DetectorProfile::for_exercise(exercise);
            let phase = if (now / REP_HALF_PERIOD_MS) % 2 == 0 {
                profile.entry
            } else {
                profile.release
            };
            with_channel(RESTING_SAMPLE, profile.channel, satisfying(phase))
        }
        _ => {
            let y = if (now / STEP_HALF_PERIOD_MS) % 2 == 0 { -5.0 } else { -10.5 };
            MotionSample::accel(0.0, y, 0.0)
        }
    }
}

fn satisfying(crossing: Crossing) -> f32 {
    match crossing {
        Crossing::Above(t) => t + t.abs().max(1.0) * 0.5,
        Crossing::Below(t) => t - t.abs().max(1.0) * 0.5,
    }
}

fn with_channel(mut sample: MotionSample, channel: Channel, value: f32) -> MotionSample {
    let (vector, axis) = match channel {
        Channel::Accel(axis) => (&mut sample.accel, axis),
        Channel::Gyro(axis) => (&mut sample.gyro, axis),
    };
    match axis {
        Axis::X => vector.x = value,
        Axis::Y => vector.y = value,
        Axis::Z => vector.z = value,
    }
    sample
}

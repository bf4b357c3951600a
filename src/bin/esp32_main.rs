//! ESP32-C3 SuperMini wearable step counter and rep tracker.
//!
//! This is the main entry point for the physical device. It runs a
//! cooperative loop that:
//! - Debounces the toggle button and switches modes
//! - Samples the MPU6050 and counts steps or reps
//! - Counts down rests between sets
//! - Renders state to the OLED display
//! - Serves the workout configuration page (if enabled)
//!
//! # Build
//!
//! ```bash
//! # Device only (step counting, no plans)
//! cargo build --release --features esp32,display --bin esp32_main
//!
//! # With WiFi + configuration page
//! WIFI_SSID=... WIFI_PASSWORD=... cargo build --release --features esp32-full --bin esp32_main
//! ```

use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::prelude::*;
use rs_reps::hal::esp32::{pins, Esp32Button, Esp32Clock, Esp32Display, Mpu6050};
use rs_reps::services::SharedDeviceState;
use rs_reps::{Config, Device};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Loop iterations between WiFi link checks.
#[cfg(feature = "wifi")]
const WIFI_CHECK_EVERY: u32 = 500;

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!("rs-reps wearable starting");

    // =========================================================================
    // Configuration
    // =========================================================================
    let config = Config::default()
        .with_wifi(
            rs_reps::WifiConfig::default()
                .with_ssid(option_env!("WIFI_SSID").unwrap_or(""))
                .with_password(option_env!("WIFI_PASSWORD").unwrap_or("")),
        )
        .with_web(rs_reps::WebConfig::default().with_port(80));

    let peripherals = Peripherals::take()?;

    // =========================================================================
    // I2C bus (shared between MPU6050 and SSD1306)
    // =========================================================================
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio8, // SDA
        peripherals.pins.gpio9, // SCL
        &I2cConfig::new().baudrate(pins::I2C_BAUD_KHZ.kHz().into()),
    )?;
    // SAFETY: the I2C peripheral comes from `Peripherals::take()` and the
    // firmware never exits, so the driver lives for the rest of the program.
    let i2c_bus: &'static Mutex<I2cDriver<'static>> =
        Box::leak(Box::new(Mutex::new(unsafe { core::mem::transmute(i2c) })));

    // =========================================================================
    // Peripherals and device loop
    // =========================================================================
    let button = Esp32Button::new(peripherals.pins.gpio10)?;
    let sensor = Mpu6050::new(i2c_bus);
    let display = Esp32Display::new(i2c_bus);

    // Fail-stop: a missing sensor or display ends main with the error
    let mut device = Device::start(sensor, button, display, Esp32Clock::new(), config.clone())?;
    log::info!("device ready (IMU 0x{:02X}, OLED 0x{:02X})", pins::MPU6050_I2C_ADDR, pins::OLED_I2C_ADDR);

    let shared = Arc::new(SharedDeviceState::new());

    // =========================================================================
    // WiFi + configuration page
    // =========================================================================
    #[cfg(feature = "wifi")]
    let mut wifi = {
        use esp_idf_svc::eventloop::EspSystemEventLoop;
        use esp_idf_svc::nvs::EspDefaultNvsPartition;
        use rs_reps::hal::esp32::Esp32Wifi;
        use rs_reps::traits::WorkoutDisplay;

        if config.wifi.is_configured() && !config.wifi.ssid_fits() {
            log::error!("WIFI_SSID is longer than 32 bytes, WiFi disabled");
            None
        } else if config.wifi.is_configured() && config.wifi.enabled {
            let sysloop = EspSystemEventLoop::take()?;
            let nvs = EspDefaultNvsPartition::take()?;

            if let Err(e) = device.display_mut().show_message("WiFi", Some("Connecting...")) {
                log::warn!("display message failed: {:?}", e);
            }

            let wifi = Esp32Wifi::new(peripherals.modem, sysloop, Some(nvs), &config.wifi)?;
            if let Some(ip) = wifi.ip_addr() {
                let msg = format!("{}", ip);
                if let Err(e) = device.display_mut().show_message("Config page", Some(&msg)) {
                    log::warn!("display message failed: {:?}", e);
                }
                thread::sleep(Duration::from_secs(2));
            }

            Some(wifi)
        } else {
            log::warn!("WiFi not configured (set WIFI_SSID/WIFI_PASSWORD), plans cannot be submitted");
            None
        }
    };

    #[cfg(feature = "esp32-http")]
    let _server = if config.web.enabled {
        use rs_reps::hal::esp32::Esp32HttpServer;
        Some(Esp32HttpServer::new(&config.web, Arc::clone(&shared))?)
    } else {
        None
    };

    log::info!("entering control loop");

    #[cfg(feature = "wifi")]
    let mut iterations: u32 = 0;

    // =========================================================================
    // Main Control Loop
    // =========================================================================
    loop {
        let report = device.poll(shared.take_plan());

        if let Some(outcome) = report.toggle {
            log::debug!("button: {:?}", outcome);
        }

        shared.publish_state(report.state);

        // Link check every few seconds; the loop keeps counting offline
        #[cfg(feature = "wifi")]
        {
            iterations = iterations.wrapping_add(1);
            if iterations % WIFI_CHECK_EVERY == 0 {
                if let Some(wifi) = wifi.as_mut() {
                    if !wifi.is_connected() {
                        if let Err(e) = wifi.reconnect() {
                            log::warn!("WiFi reconnect failed: {:?}", e);
                        }
                    }
                }
            }
        }

        thread::sleep(Duration::from_millis(report.delay_ms as u64));
    }
}

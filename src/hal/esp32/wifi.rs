//! WiFi connection management for ESP32-C3.
//!
//! Provides synchronous WiFi station mode connection using esp-idf-svc.
//!
//! # Example
//!
//! ```ignore
//! use rs_reps::hal::esp32::Esp32Wifi;
//! use rs_reps::config::WifiConfig;
//!
//! let config = WifiConfig::default()
//!     .with_ssid("MyNetwork")
//!     .with_password("secret123");
//!
//! let wifi = Esp32Wifi::new(modem, sysloop, nvs, &config)?;
//! // Connected; the configuration page is reachable at this address
//! log::info!("IP: {:?}", wifi.ip_addr());
//! ```

use crate::config::{WifiConfig, MAX_SSID_LEN};
use anyhow::anyhow;
use esp_idf_hal::modem::Modem;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, ClientConfiguration, Configuration, EspWifi};
use std::net::Ipv4Addr;

/// WiFi connection manager for ESP32.
///
/// Manages a station-mode WiFi connection. The connection is established
/// during construction and maintained for the lifetime of this struct.
pub struct Esp32Wifi<'a> {
    wifi: BlockingWifi<EspWifi<'a>>,
}

impl<'a> Esp32Wifi<'a> {
    /// Create a new WiFi connection.
    ///
    /// This will:
    /// 1. Initialize the WiFi driver
    /// 2. Configure station mode with the provided credentials
    /// 3. Connect to the access point
    /// 4. Wait for DHCP to assign an IP address
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - WiFi initialization fails
    /// - Connection to AP fails
    /// - DHCP times out
    pub fn new(
        modem: Modem,
        sysloop: EspSystemEventLoop,
        nvs: Option<EspDefaultNvsPartition>,
        config: &WifiConfig,
    ) -> anyhow::Result<Self> {
        let esp_wifi = EspWifi::new(modem, sysloop.clone(), nvs)?;
        let mut wifi = BlockingWifi::wrap(esp_wifi, sysloop)?;

        // Configure station mode
        let ssid = config.ssid.as_str();
        let password = config.password.as_str();

        // Create heapless strings for esp-idf; an SSID cut to empty would
        // silently join the wrong network
        let mut ssid_buf: heapless::String<MAX_SSID_LEN> = heapless::String::new();
        ssid_buf
            .push_str(ssid)
            .map_err(|_| anyhow!("SSID is {} bytes, limit is {}", ssid.len(), MAX_SSID_LEN))?;

        let mut pass_buf: heapless::String<64> = heapless::String::new();
        pass_buf
            .push_str(password)
            .map_err(|_| anyhow!("WiFi password longer than 64 bytes"))?;

        wifi.set_configuration(&Configuration::Client(ClientConfiguration {
            ssid: ssid_buf,
            password: pass_buf,
            ..Default::default()
        }))?;

        log::info!("WiFi starting");
        wifi.start()?;

        log::info!("WiFi connecting to '{}'", ssid);
        let mut attempt: u32 = 0;
        while let Err(e) = wifi.connect() {
            attempt += 1;
            // max_retries of 0 means keep trying
            if config.max_retries != 0 && attempt > config.max_retries as u32 {
                return Err(e.into());
            }
            log::warn!("WiFi connect attempt {} failed: {}", attempt, e);
        }

        log::info!("WiFi waiting for DHCP");
        wifi.wait_netif_up()?;

        match wifi.wifi().sta_netif().get_ip_info() {
            Ok(ip_info) => log::info!("WiFi connected, config page at http://{}/", ip_info.ip),
            Err(e) => log::warn!("WiFi connected but IP lookup failed: {}", e),
        }

        Ok(Self { wifi })
    }

    /// Get the current IP address, if connected.
    pub fn ip_addr(&self) -> Option<Ipv4Addr> {
        self.wifi
            .wifi()
            .sta_netif()
            .get_ip_info()
            .ok()
            .map(|info| info.ip)
    }

    /// Check if WiFi is connected.
    pub fn is_connected(&self) -> bool {
        self.wifi.is_connected().unwrap_or(false)
    }

    /// Reconnect after the access point dropped us.
    ///
    /// The device loop keeps running offline; call this periodically when
    /// [`is_connected`](Self::is_connected) goes false.
    pub fn reconnect(&mut self) -> anyhow::Result<()> {
        log::info!("WiFi reconnecting");
        self.wifi.connect()?;
        self.wifi.wait_netif_up()?;
        Ok(())
    }
}

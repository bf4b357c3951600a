//! HTTP server for the ESP32 configuration page.
//!
//! Provides a lightweight HTTP server using esp-idf-svc that serves the
//! same endpoints as the desktop server. Request handling is delegated to
//! [`ConfigHandler`] so both servers respond identically.
//!
//! # Endpoints
//!
//! - `GET /` - Configuration form (serves embedded HTML)
//! - `POST /submit` - Form submission
//! - `GET /api/state` - Current device state (JSON)
//!
//! Unregistered paths get the esp-idf server's built-in 404.
//!
//! # Example
//!
//! ```ignore
//! use rs_reps::hal::esp32::Esp32HttpServer;
//! use rs_reps::services::SharedDeviceState;
//! use rs_reps::config::WebConfig;
//! use std::sync::Arc;
//!
//! let shared = Arc::new(SharedDeviceState::new());
//! let config = WebConfig::default().with_port(80);
//! let server = Esp32HttpServer::new(&config, Arc::clone(&shared))?;
//! ```

use std::sync::Arc;

use esp_idf_svc::http::server::{Configuration, EspHttpConnection, EspHttpServer, Request};
use esp_idf_svc::http::Method;
use esp_idf_svc::io::{EspIOError, Read, Write};

use crate::config::WebConfig;
use crate::services::{
    read_body, ApiResult, ConfigHandler, SharedDeviceState, CONTENT_TYPE_HTML, MAX_BODY_LEN,
};

/// HTTP server for the configuration page.
///
/// Keeps the underlying esp-idf server alive; dropping it stops serving.
pub struct Esp32HttpServer {
    _server: EspHttpServer<'static>,
}

impl Esp32HttpServer {
    /// Create and start the HTTP server.
    ///
    /// Submitted plans land in `shared`'s inbox; the main loop should pass
    /// `shared.take_plan()` to every `Device::poll` and publish the returned
    /// state.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP server fails to start.
    pub fn new(config: &WebConfig, shared: Arc<SharedDeviceState>) -> anyhow::Result<Self> {
        let server_config = Configuration {
            http_port: config.port,
            ..Default::default()
        };

        let mut server = EspHttpServer::new(&server_config)?;

        // One handler per route, each over its own Arc
        let index_handler = ConfigHandler::new(Arc::clone(&shared));
        let submit_handler = ConfigHandler::new(Arc::clone(&shared));
        let state_handler = ConfigHandler::new(shared);

        // GET / - Configuration form (shared with desktop)
        server.fn_handler("/", Method::Get, move |req| {
            let html = index_handler.handle_index();
            let mut resp = req.into_response(200, None, &[("Content-Type", CONTENT_TYPE_HTML)])?;
            resp.write_all(html.as_bytes())?;
            Ok::<_, EspIOError>(())
        })?;

        // POST /submit - Parse the form and hand the plan to the loop
        server.fn_handler("/submit", Method::Post, move |mut req| {
            // Oversized bodies come back as 413 without being parsed
            let mut buf = [0u8; MAX_BODY_LEN];
            let body = read_body(&mut buf, |chunk| req.read(chunk))?;
            let result = submit_handler.handle_submit_body(body);
            respond(req, &result)
        })?;

        // GET /api/state - Latest published state
        server.fn_handler("/api/state", Method::Get, move |req| {
            respond(req, &state_handler.handle_get_state())
        })?;

        log::info!("HTTP server started on port {}", config.port);

        Ok(Self { _server: server })
    }
}

fn respond(req: Request<&mut EspHttpConnection<'_>>, result: &ApiResult) -> Result<(), EspIOError> {
    let mut resp = req.into_response(
        result.status(),
        None,
        &[("Content-Type", result.content_type())],
    )?;
    resp.write_all(result.body().as_bytes())?;
    Ok(())
}

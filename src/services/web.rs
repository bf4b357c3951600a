//! Axum-based HTTP server for the workout configuration page.
//!
//! Provides endpoints for:
//! - GET `/` - Configuration form (serves index.html)
//! - POST `/submit` - Form submission, hands a new plan to the device
//! - GET `/api/state` - Current device state (JSON)
//!
//! Every other path returns 404. Bodies over the form limit get 413, as on
//! the device. Request handling is delegated to
//! [`ConfigHandler`] so the desktop server and the ESP32 server behave
//! identically.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::config::WebConfig;

use super::http_handler::{ApiResult, ConfigHandler, MAX_BODY_LEN};
use super::shared::SharedDeviceState;

// ============================================================================
// Route Handlers
// ============================================================================

/// GET / - Serve the configuration form
async fn index(State(state): State<Arc<SharedDeviceState>>) -> impl IntoResponse {
    Html(ConfigHandler::new(state).handle_index())
}

/// POST /submit - Accept a urlencoded plan
async fn submit(State(state): State<Arc<SharedDeviceState>>, body: String) -> ApiResult {
    ConfigHandler::new(state).handle_submit(&body)
}

/// GET /api/state - Returns the latest published device state
async fn get_state(State(state): State<Arc<SharedDeviceState>>) -> ApiResult {
    ConfigHandler::new(state).handle_get_state()
}

/// Fallback handler for 404
async fn not_found(State(state): State<Arc<SharedDeviceState>>) -> ApiResult {
    ConfigHandler::new(state).handle_not_found()
}

// ============================================================================
// Server Builder
// ============================================================================

/// Configuration for the web server
#[derive(Debug, Clone)]
pub struct WebServerConfig {
    /// Address to bind to
    pub addr: SocketAddr,
    /// Whether to enable CORS for all origins
    pub cors_permissive: bool,
}

impl Default for WebServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            cors_permissive: true,
        }
    }
}

impl WebServerConfig {
    /// Create a new config with the given address
    pub fn new(addr: impl Into<SocketAddr>) -> Self {
        Self {
            addr: addr.into(),
            ..Default::default()
        }
    }

    /// Set whether CORS should be permissive
    pub fn cors(mut self, permissive: bool) -> Self {
        self.cors_permissive = permissive;
        self
    }

    /// Create from shared WebConfig
    pub fn from_config(config: &WebConfig) -> Self {
        Self {
            addr: ([0, 0, 0, 0], config.port).into(),
            cors_permissive: config.cors_permissive,
        }
    }
}

/// Build the Axum router with all routes
pub fn build_router(state: Arc<SharedDeviceState>, config: &WebServerConfig) -> Router {
    let mut router = Router::new()
        .route("/", get(index))
        .route("/submit", post(submit))
        .route("/api/state", get(get_state))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_LEN))
        .with_state(state);

    // Add CORS if requested
    if config.cors_permissive {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router
}

/// Start the web server with shared state
///
/// This function blocks until the server is shut down. The device loop
/// should run elsewhere and share the same `SharedDeviceState`.
///
/// # Example
///
/// ```ignore
/// let shared = Arc::new(SharedDeviceState::new());
///
/// // Device loop on its own thread
/// let loop_state = Arc::clone(&shared);
/// std::thread::spawn(move || run_device_loop(loop_state));
///
/// run_server(shared, WebServerConfig::default()).await?;
/// ```
pub async fn run_server(
    state: Arc<SharedDeviceState>,
    config: WebServerConfig,
) -> Result<(), std::io::Error> {
    let router = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    log::info!("web server listening on http://{}", config.addr);

    axum::serve(listener, router).await
}

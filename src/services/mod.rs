//! Network services for the workout configuration page.
//!
//! This module provides the web side of the device:
//! - `web` feature: Axum-based HTTP server for desktop development
//! - `esp32-http` feature: the same handlers behind esp-idf-svc
//!   (see `hal::esp32`)
//!
//! Both servers share the device through [`SharedDeviceState`]: a plan inbox
//! the loop drains each iteration, plus the last published state snapshot.
//!
//! # Shared State Pattern
//!
//! ```ignore
//! use std::sync::Arc;
//! use rs_reps::services::{build_router, SharedDeviceState, WebServerConfig};
//!
//! let shared = Arc::new(SharedDeviceState::new());
//! let router = build_router(Arc::clone(&shared), &WebServerConfig::default());
//!
//! // Device loop
//! let report = device.poll(shared.take_plan());
//! shared.publish_state(report.state);
//! ```

pub mod http_handler;
pub mod shared;

#[cfg(feature = "web")]
pub mod web;

pub use http_handler::*;
pub use shared::*;

#[cfg(feature = "web")]
pub use web::*;

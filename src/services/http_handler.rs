//! Shared HTTP handler logic for both desktop and ESP32.
//!
//! This module provides platform-agnostic request handling for the
//! configuration page that can be used by both Axum (desktop) and
//! esp-idf-svc (ESP32) HTTP servers.
//!
//! # Design
//!
//! The `ConfigHandler` struct contains the logic for every endpoint.
//! Platform-specific HTTP servers call these methods and translate the
//! resulting [`ApiResult`] to their native response formats.
//!
//! # Example
//!
//! ```ignore
//! use rs_reps::services::ConfigHandler;
//!
//! let handler = ConfigHandler::new(shared_state);
//!
//! // In Axum handler:
//! let result = handler.handle_submit(&body);
//!
//! // In ESP-IDF handler:
//! let result = handler.handle_submit(body);
//! resp.write_all(result.body().as_bytes())?;
//! ```

extern crate alloc;

use alloc::format;
use alloc::string::String;

use crate::error::FormError;
use crate::parsing::parse_plan_form;
use crate::session::WorkoutState;
use crate::workout::WorkoutPlan;

use super::shared::PlanInbox;

/// HTML content type.
pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";

/// JSON content type.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Largest form body accepted. A full plan is well under 200 bytes.
pub const MAX_BODY_LEN: usize = 1024;

// ============================================================================
// Response Type
// ============================================================================

/// Result of handling a request: status, content type, and body.
#[derive(Debug)]
pub struct ApiResult {
    status: u16,
    content_type: &'static str,
    body: String,
}

impl ApiResult {
    /// A 200 HTML page.
    pub fn html(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: CONTENT_TYPE_HTML,
            body: body.into(),
        }
    }

    /// A 200 JSON document.
    pub fn json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: CONTENT_TYPE_JSON,
            body: body.into(),
        }
    }

    /// An HTML error page with the given status.
    pub fn error(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: CONTENT_TYPE_HTML,
            body: body.into(),
        }
    }

    /// Check if this is a success response.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The response body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The `Content-Type` header value.
    pub fn content_type(&self) -> &'static str {
        self.content_type
    }
}

// Axum integration: allow ApiResult to be returned directly from handlers
#[cfg(feature = "web")]
impl axum::response::IntoResponse for ApiResult {
    fn into_response(self) -> axum::response::Response {
        use axum::http::{header, StatusCode};

        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, [(header::CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

// ============================================================================
// Config Handler
// ============================================================================

/// Shared HTTP handler for both desktop and ESP32.
pub struct ConfigHandler<P: PlanInbox> {
    inbox: P,
}

impl<P: PlanInbox> ConfigHandler<P> {
    /// Create a new handler on top of a plan inbox.
    pub fn new(inbox: P) -> Self {
        Self { inbox }
    }

    /// GET / - The configuration form.
    pub fn handle_index(&self) -> &'static str {
        include_str!("../../www/index.html")
    }

    /// POST /submit - Parse the form and hand the plan to the device.
    ///
    /// Invalid submissions get a 400 page and leave the device untouched.
    pub fn handle_submit(&self, body: &str) -> ApiResult {
        match parse_plan_form(body) {
            Ok(plan) => {
                log::info!("plan submitted: {} total reps", plan.total_reps());
                let page = confirmation_page(&plan);
                self.inbox.submit_plan(plan);
                ApiResult::html(page)
            }
            Err(e) => {
                log::warn!("rejected plan submission: {}", e);
                ApiResult::error(400, error_page(&e))
            }
        }
    }

    /// POST /submit with a raw body as read off the wire.
    ///
    /// A body that overflowed the read buffer is rejected with 413 and
    /// never parsed.
    pub fn handle_submit_body(&self, body: BodyRead<'_>) -> ApiResult {
        match body {
            BodyRead::Complete(bytes) => match core::str::from_utf8(bytes) {
                Ok(text) => self.handle_submit(text),
                Err(_) => ApiResult::error(400, error_page(&FormError::Malformed)),
            },
            BodyRead::TooLarge => {
                log::warn!("rejected plan submission: body over {} bytes", MAX_BODY_LEN);
                ApiResult::error(413, too_large_page())
            }
        }
    }

    /// GET /api/state - Latest device state as JSON.
    pub fn handle_get_state(&self) -> ApiResult {
        ApiResult::json(state_to_json(&self.inbox.snapshot()))
    }

    /// Anything else.
    pub fn handle_not_found(&self) -> ApiResult {
        ApiResult::error(404, "<!DOCTYPE html><html><body><h1>Not found</h1></body></html>")
    }
}

// ============================================================================
// Bounded Body Reads
// ============================================================================

/// A request body read into a fixed buffer.
#[derive(Debug, PartialEq, Eq)]
pub enum BodyRead<'a> {
    /// The whole body fit.
    Complete(&'a [u8]),
    /// More bytes followed a full buffer.
    TooLarge,
}

/// Reads a body into `buf` with `read`, which returns 0 at end of body.
///
/// When the buffer fills, one more read decides whether the body ended
/// exactly at the limit or was cut off.
pub fn read_body<E>(
    buf: &mut [u8],
    mut read: impl FnMut(&mut [u8]) -> Result<usize, E>,
) -> Result<BodyRead<'_>, E> {
    let mut len = 0;
    while len < buf.len() {
        let n = read(&mut buf[len..])?;
        if n == 0 {
            return Ok(BodyRead::Complete(&buf[..len]));
        }
        len += n;
    }

    let mut extra = [0u8; 1];
    if read(&mut extra)? > 0 {
        return Ok(BodyRead::TooLarge);
    }
    Ok(BodyRead::Complete(&buf[..len]))
}

// ============================================================================
// Page / JSON Helpers
// ============================================================================

/// Convert a workout state snapshot to a JSON string.
pub fn state_to_json(state: &WorkoutState) -> String {
    let exercise_type = match state.exercise_type {
        Some(t) => format!("\"{}\"", t.as_str()),
        None => String::from("null"),
    };

    format!(
        r#"{{"mode":"{}","plan_configured":{},"exercise":"{}","exercise_type":{},"exercise_index":{},"set":{},"total_sets":{},"rep":{},"target_reps":{},"rest_remaining_s":{},"steps":{}}}"#,
        state.mode.as_str(),
        state.plan_configured,
        state.exercise_name,
        exercise_type,
        state.exercise_index,
        state.set_number,
        state.total_sets,
        state.rep_number,
        state.target_reps,
        state.rest_remaining_s,
        state.steps
    )
}

/// Page shown after a plan was accepted.
pub fn confirmation_page(plan: &WorkoutPlan) -> String {
    let mut rows = String::new();
    for (i, e) in plan.exercises().iter().enumerate() {
        rows.push_str(&format!(
            "<li>{}. {}: {} x {}, {} s rest</li>",
            i + 1,
            e.name,
            e.sets,
            e.reps,
            e.rest_seconds
        ));
    }
    format!(
        "<!DOCTYPE html><html><head><title>Workout saved</title></head><body>\
         <h1>Workout saved</h1><ul>{}</ul>\
         <p>Press the button on the device to start.</p>\
         <p><a href=\"/\">Edit workout</a></p></body></html>",
        rows
    )
}

/// Page shown when the body exceeded [`MAX_BODY_LEN`].
pub fn too_large_page() -> String {
    format!(
        "<!DOCTYPE html><html><head><title>Invalid workout</title></head><body>\
         <h1>Invalid workout</h1><p>form body is larger than {} bytes</p>\
         <p><a href=\"/\">Back</a></p></body></html>",
        MAX_BODY_LEN
    )
}

/// Page shown after a rejected submission.
pub fn error_page(error: &FormError) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>Invalid workout</title></head><body>\
         <h1>Invalid workout</h1><p>{}</p><p><a href=\"/\">Back</a></p></body></html>",
        error
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Mode;
    use crate::workout::ExerciseType;
    use alloc::sync::Arc;
    use std::sync::Mutex;

    // ========================================================================
    // Recording inbox for testing ConfigHandler
    // ========================================================================

    #[derive(Default)]
    struct RecordingInbox {
        submitted: Mutex<Option<WorkoutPlan>>,
        state: Mutex<WorkoutState>,
    }

    impl PlanInbox for RecordingInbox {
        fn submit_plan(&self, plan: WorkoutPlan) {
            *self.submitted.lock().unwrap() = Some(plan);
        }

        fn snapshot(&self) -> WorkoutState {
            self.state.lock().unwrap().clone()
        }
    }

    const VALID: &str = "exercise0=0&sets0=3&reps0=10&rest0=60\
                         &exercise1=2&sets1=3&reps1=12&rest1=90\
                         &exercise2=3&sets2=2&reps2=15&rest2=45";

    // ========================================================================
    // ApiResult
    // ========================================================================

    #[test]
    fn api_result_kinds() {
        let ok = ApiResult::json("{}");
        assert!(ok.is_ok());
        assert_eq!(ok.status(), 200);
        assert_eq!(ok.content_type(), CONTENT_TYPE_JSON);

        let err = ApiResult::error(400, "bad input");
        assert!(!err.is_ok());
        assert_eq!(err.status(), 400);
        assert_eq!(err.body(), "bad input");
        assert_eq!(err.content_type(), CONTENT_TYPE_HTML);
    }

    // ========================================================================
    // Handlers
    // ========================================================================

    #[test]
    fn index_has_all_fields() {
        let handler = ConfigHandler::new(Arc::new(RecordingInbox::default()));
        let html = handler.handle_index();
        for slot in 0..3 {
            for field in ["exercise", "sets", "reps", "rest"] {
                let name = format!("name=\"{}{}\"", field, slot);
                assert!(html.contains(&name), "missing {}", name);
            }
        }
        assert!(html.contains("action=\"/submit\""));
    }

    #[test]
    fn submit_valid_form() {
        let inbox = Arc::new(RecordingInbox::default());
        let handler = ConfigHandler::new(Arc::clone(&inbox));

        let result = handler.handle_submit(VALID);
        assert_eq!(result.status(), 200);
        assert!(result.body().contains("Lateral Raise"));

        let plan = inbox.submitted.lock().unwrap().clone().unwrap();
        assert_eq!(plan[1].exercise_type, ExerciseType::Squat);
        assert_eq!(plan[2].reps, 15);
    }

    #[test]
    fn submit_invalid_form_leaves_inbox_empty() {
        let inbox = Arc::new(RecordingInbox::default());
        let handler = ConfigHandler::new(Arc::clone(&inbox));

        let result = handler.handle_submit(&VALID.replace("sets2=2", "sets2=11"));
        assert_eq!(result.status(), 400);
        assert!(result.body().contains("exercise 3: sets must be 1-10"));
        assert!(inbox.submitted.lock().unwrap().is_none());
    }

    #[test]
    fn get_state_returns_json() {
        let inbox = Arc::new(RecordingInbox::default());
        *inbox.state.lock().unwrap() = WorkoutState {
            mode: Mode::Working,
            steps: 7,
            ..Default::default()
        };
        let handler = ConfigHandler::new(inbox);

        let result = handler.handle_get_state();
        assert_eq!(result.content_type(), CONTENT_TYPE_JSON);
        assert!(result.body().contains("\"mode\":\"working\""));
        assert!(result.body().contains("\"steps\":7"));
    }

    #[test]
    fn not_found_is_404() {
        let handler = ConfigHandler::new(Arc::new(RecordingInbox::default()));
        assert_eq!(handler.handle_not_found().status(), 404);
    }

    // ========================================================================
    // Bounded body reads
    // ========================================================================

    /// Reader handing out `data` in chunks of at most `chunk` bytes.
    fn chunked(data: &[u8], chunk: usize) -> impl FnMut(&mut [u8]) -> Result<usize, ()> + '_ {
        let mut pos = 0;
        move |buf: &mut [u8]| {
            let n = chunk.min(buf.len()).min(data.len() - pos);
            buf[..n].copy_from_slice(&data[pos..pos + n]);
            pos += n;
            Ok(n)
        }
    }

    #[test]
    fn read_body_short_body() {
        let mut buf = [0u8; MAX_BODY_LEN];
        let body = read_body(&mut buf, chunked(VALID.as_bytes(), 7)).unwrap();
        assert_eq!(body, BodyRead::Complete(VALID.as_bytes()));
    }

    #[test]
    fn read_body_exactly_at_limit() {
        let data = [b'a'; MAX_BODY_LEN];
        let mut buf = [0u8; MAX_BODY_LEN];
        let body = read_body(&mut buf, chunked(&data, 100)).unwrap();
        assert_eq!(body, BodyRead::Complete(&data[..]));
    }

    #[test]
    fn read_body_one_byte_over() {
        let data = [b'a'; MAX_BODY_LEN + 1];
        let mut buf = [0u8; MAX_BODY_LEN];
        assert_eq!(read_body(&mut buf, chunked(&data, 100)), Ok(BodyRead::TooLarge));
    }

    #[test]
    fn oversized_submission_is_not_parsed() {
        let inbox = Arc::new(RecordingInbox::default());
        let handler = ConfigHandler::new(Arc::clone(&inbox));

        // Padding pushes the last value past the limit; cut at the limit
        // the body would still read as a valid "reps2=1"
        let head = format!("{}&rest2=45&pad=", VALID.split("&exercise2").next().unwrap());
        let tail = "&exercise2=3&sets2=2&reps2=15";
        let padding = "x".repeat(MAX_BODY_LEN + 1 - head.len() - tail.len());
        let body = format!("{}{}{}", head, padding, tail);
        assert_eq!(body.len(), MAX_BODY_LEN + 1);
        assert!(parse_plan_form(&body[..MAX_BODY_LEN]).is_ok());

        let mut buf = [0u8; MAX_BODY_LEN];
        let read = read_body(&mut buf, chunked(body.as_bytes(), 64)).unwrap();
        let result = handler.handle_submit_body(read);

        assert_eq!(result.status(), 413);
        assert!(inbox.submitted.lock().unwrap().is_none());
    }

    #[test]
    fn non_utf8_body_is_rejected() {
        let inbox = Arc::new(RecordingInbox::default());
        let handler = ConfigHandler::new(Arc::clone(&inbox));
        let result = handler.handle_submit_body(BodyRead::Complete(&[0xff, 0xfe]));
        assert_eq!(result.status(), 400);
        assert!(inbox.submitted.lock().unwrap().is_none());
    }

    // ========================================================================
    // JSON helper
    // ========================================================================

    #[test]
    fn state_to_json_without_plan() {
        let json = state_to_json(&WorkoutState::default());
        assert!(json.contains("\"mode\":\"step_counting\""));
        assert!(json.contains("\"plan_configured\":false"));
        assert!(json.contains("\"exercise\":\"\""));
        assert!(json.contains("\"exercise_type\":null"));
    }

    #[test]
    fn state_to_json_with_exercise() {
        let mut state = WorkoutState {
            mode: Mode::Resting,
            plan_configured: true,
            exercise_type: Some(ExerciseType::ShoulderPress),
            set_number: 2,
            total_sets: 3,
            rest_remaining_s: 42,
            ..Default::default()
        };
        let _ = state.exercise_name.push_str("Shoulder Press");

        let json = state_to_json(&state);
        assert!(json.contains("\"exercise\":\"Shoulder Press\""));
        assert!(json.contains("\"exercise_type\":\"shoulder_press\""));
        assert!(json.contains("\"set\":2"));
        assert!(json.contains("\"rest_remaining_s\":42"));
    }
}

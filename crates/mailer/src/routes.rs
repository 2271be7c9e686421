//! HTTP routes for the mailer.
//!
//! ```text
//! GET  /health      - Health check
//! POST /send-email  - Send a report email
//! ```

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, Method, StatusCode, header},
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use farmstand_core::{Email, ReportEmail};

use crate::email::{EmailSender, compose_report};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    sender: Arc<dyn EmailSender>,
    from: Email,
    to: Email,
}

impl AppState {
    /// Create a new application state.
    pub fn new(sender: Arc<dyn EmailSender>, from: Email, to: Email) -> Self {
        Self {
            inner: Arc::new(AppStateInner { sender, from, to }),
        }
    }
}

/// Build the mailer router, allowing browser calls from `allowed_origin`.
pub fn app(state: AppState, allowed_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .route("/send-email", post(send_email))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Send a report email.
///
/// Responds `{"success": true, "message": "Email sent!", "response": …}` with
/// the provider's response, or `{"success": false, "message": …}` on failure.
async fn send_email(
    State(state): State<AppState>,
    payload: Result<Json<ReportEmail>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let Json(report) = match payload {
        Ok(report) => report,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Invalid send-email request");
            return failure(StatusCode::BAD_REQUEST, &rejection.body_text());
        }
    };

    let outcome = match compose_report(&report, &state.inner.from, &state.inner.to) {
        Ok(email) => state.inner.sender.send(&email).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(response) => {
            tracing::info!(
                report_type = %report.report_type,
                report_date = %report.report_date,
                rows = report.data.len(),
                "Report email sent"
            );
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": "Email sent!",
                    "response": response,
                })),
            )
        }
        Err(e) => {
            let event_id = sentry::capture_error(&e);
            tracing::error!(
                error = %e,
                sentry_event_id = %event_id,
                report_type = %report.report_type,
                "Report email failed"
            );
            failure(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

fn failure(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "success": false, "message": message })))
}

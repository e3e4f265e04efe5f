//! HTTP endpoint handlers.
//!
//! The interaction endpoint only pulls the signature headers and the raw body
//! out of the request; everything else happens in the [`Dispatcher`].

use std::borrow::Cow;

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::interactions::Dispatcher;
use crate::web::signature::{SIGNATURE_HEADER, TIMESTAMP_HEADER};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/interactions", post(interactions))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Discord Interactions
// =============================================================================

/// Discord interaction webhook endpoint.
///
/// Missing signature headers are passed on as empty strings and rejected by
/// the signature check like any other bad signature. Bodies that are not
/// UTF-8 are decoded lossily; the replacement characters never match a
/// signature, so they end in the same 401.
pub async fn interactions(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let signature = header_str(&headers, SIGNATURE_HEADER);
    let timestamp = header_str(&headers, TIMESTAMP_HEADER);

    let body = String::from_utf8_lossy(&body);
    if matches!(body, Cow::Owned(_)) {
        warn!("interaction_body_not_utf8");
    }

    state.dispatcher.handle(&body, signature, timestamp).await
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

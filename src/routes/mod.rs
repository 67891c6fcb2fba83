pub mod api;

use std::any::Any;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::error;

use crate::errors::INTERNAL_ERROR_DETAIL;
use crate::state::AppState;

/// Room for the JSON envelope and the voice field on top of the text.
const BODY_OVERHEAD_BYTES: usize = 64 * 1024;

/// Largest request body that can still carry `max_text_chars` characters.
///
/// One character escapes to at most 12 bytes of JSON (a `\uXXXX` surrogate
/// pair), so the text check stays reachable for any configured limit.
pub fn request_body_limit(max_text_chars: usize) -> usize {
    max_text_chars
        .saturating_mul(12)
        .saturating_add(BODY_OVERHEAD_BYTES)
}

/// Turn a panic inside a handler (or the engine) into the generic 500 body.
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    error!(panic = %message, "Request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": INTERNAL_ERROR_DETAIL })),
    )
        .into_response()
}

/// Build the complete application: API routes, CORS, and response hardening.
///
/// CORS is wide open; the service is meant to be called directly from
/// arbitrary browser frontends.
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods(cors::Any)
        .allow_headers(cors::Any);

    let security_headers = tower::ServiceBuilder::new().layer(SetResponseHeaderLayer::overriding(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    ));

    let body_limit = request_body_limit(state.config.max_text_chars);

    api::create_api_router()
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer)
        .layer(security_headers)
}

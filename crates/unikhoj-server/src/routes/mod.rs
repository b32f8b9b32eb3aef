//! HTTP route handlers for `UniKhoj`.
//!
//! Routes are organized by resource:
//! - `leads`: lead capture (`POST /api/leads`)
//! - `health`: liveness probe (`GET /api/health`)

pub mod health;
pub mod leads;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    Router::new()
        .nest("/api/leads", leads::router())
        .nest("/api/health", health::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config.cors_origin.as_deref()))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .with_state(state)
}

/// CORS for the landing page: one configured origin, or any origin.
fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    match origin.map(HeaderValue::from_str) {
        Some(Ok(value)) => cors.allow_origin(value),
        Some(Err(e)) => {
            warn!(error = %e, "invalid UNIKHOJ_CORS_ORIGIN, allowing any origin");
            cors.allow_origin(Any)
        }
        None => cors.allow_origin(Any),
    }
}

//! Liveness route: `/api/health`

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};

use unikhoj_core::wire::HealthResponse;

use crate::state::AppState;

/// Build the `/api/health` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(health))
}

/// Always `200 {"status": "ok"}` while the process is serving.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

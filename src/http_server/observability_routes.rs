//! Observability HTTP Routes
//!
//! Liveness and readiness check. Mounted at the root, outside `/api`.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::store::Store;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

impl HealthResponse {
    fn new(database_ok: bool) -> Self {
        Self {
            status: if database_ok { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            database: if database_ok { "ok" } else { "unavailable" },
        }
    }
}

/// Health check route
pub fn health_routes(store: Arc<Store>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(store)
}

/// 200 when the database answers, 503 otherwise
async fn health_handler(State(store): State<Arc<Store>>) -> (StatusCode, Json<HealthResponse>) {
    match store.ping() {
        Ok(()) => (StatusCode::OK, Json(HealthResponse::new(true))),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(HealthResponse::new(false)))
        }
    }
}

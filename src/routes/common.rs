//! Service routes outside the panel: liveness, database readiness and build version.

use crate::error::AppError;
use crate::response::success_one_ok;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    Ok,
    Unavailable,
}

#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub service: Check,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<Check>,
}

#[derive(Debug, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub resources: usize,
}

async fn health() -> impl IntoResponse {
    success_one_ok(ServiceStatus {
        service: Check::Ok,
        database: None,
    })
}

/// 200 when the pool answers `SELECT 1`; otherwise 503 with the same envelope.
async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&state.pool).await {
        Ok(_) => success_one_ok(ServiceStatus {
            service: Check::Ok,
            database: Some(Check::Ok),
        })
        .into_response(),
        Err(e) => {
            tracing::warn!(error = %AppError::from(e), "readiness check failed");
            let (_, Json(body)) = success_one_ok(ServiceStatus {
                service: Check::Ok,
                database: Some(Check::Unavailable),
            });
            (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
        }
    }
}

async fn version(State(state): State<AppState>) -> impl IntoResponse {
    success_one_ok(BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        resources: state.panel.resources().count(),
    })
}

/// GET /health, GET /ready, GET /version.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}

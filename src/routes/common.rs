//! Operational routes: liveness, readiness of the connection pool, service info.

use super::docs::OPENAPI_PATH;
use crate::accession::PROTEIN_PREFIX;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Status {
    Ok,
    Unavailable,
}

#[derive(Debug, Serialize)]
struct Liveness {
    status: Status,
}

#[derive(Debug, Serialize)]
struct PoolStatus {
    size: u32,
    idle: usize,
}

#[derive(Debug, Serialize)]
struct Readiness {
    database: Status,
    pool: PoolStatus,
}

#[derive(Debug, Serialize)]
struct ServiceInfo {
    service: &'static str,
    version: &'static str,
    accession_prefix: &'static str,
    openapi: &'static str,
}

async fn health() -> Json<Liveness> {
    Json(Liveness { status: Status::Ok })
}

/// 503 when a connection cannot be checked out or `SELECT 1` fails.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Readiness>) {
    let (code, database) = match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (StatusCode::OK, Status::Ok),
        Err(e) => {
            tracing::warn!(error = %e, "database not ready");
            (StatusCode::SERVICE_UNAVAILABLE, Status::Unavailable)
        }
    };
    let pool = PoolStatus {
        size: state.pool.size(),
        idle: state.pool.num_idle(),
    };
    (code, Json(Readiness { database, pool }))
}

async fn info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        accession_prefix: PROTEIN_PREFIX,
        openapi: OPENAPI_PATH,
    })
}

/// GET /health, /ready, /version.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(info))
        .with_state(state)
}

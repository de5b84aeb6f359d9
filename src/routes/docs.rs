//! OpenAPI document route.

use crate::openapi::ApiDoc;
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn docs_routes() -> Router {
    Router::new().route(OPENAPI_PATH, get(openapi_json))
}

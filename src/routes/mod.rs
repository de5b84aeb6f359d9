//! Router assembly.

mod api;
mod common;
mod docs;

pub use api::{assembly_routes, protein_routes};
pub use common::common_routes;
pub use docs::docs_routes;

use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// The full application: data routes, operational routes and the OpenAPI document.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(docs_routes())
        .merge(protein_routes(state.clone()))
        .merge(assembly_routes(state))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

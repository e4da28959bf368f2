//! Route table and the layers every request passes through.

mod common;
mod roster;

pub use common::common_routes;
pub use roster::roster_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Largest request body accepted; payloads here are a few small fields.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Full application: every route, request tracing, body size limit.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(roster_routes(state))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}

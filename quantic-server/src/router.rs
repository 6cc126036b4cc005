use axum::Router;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::state::AppState;
use quantic_core::proxy::middleware::cors_layer;

/// First-party endpoints under the reserved prefix; every other path goes
/// through the gateway dispatcher, which serves it from disk or proxies it.
pub fn build_router(state: AppState) -> Router {
    let api_mount = api_mount_point(&state.config().routing.reserved_prefix);
    let cors = cors_layer(&state.config().cors);

    Router::new()
        .nest(&api_mount, api::router())
        .fallback(api::gateway::dispatch)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// `/api/` -> `/api`
fn api_mount_point(reserved_prefix: &str) -> String {
    let trimmed = reserved_prefix.trim_end_matches('/');
    if trimmed.is_empty() {
        "/api".to_string()
    } else {
        trimmed.to_string()
    }
}

//! API Routes
//!
//! First-party endpoints mounted under the reserved prefix, plus the
//! dispatcher for everything else.

mod config;
pub(crate) mod gateway;
mod sso;

#[cfg(test)]
mod config_tests;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/config", get(config::get_public_config))
        .route("/chatwoot/sso", get(sso::get_sso_link))
        .route("/chatwoot/sso/:user_id", get(sso::get_sso_link_for_user))
        .route("/health", get(health_check))
        .route("/version", get(version_info))
}

/// Reserved-prefix paths without a handler. Never proxied.
pub(crate) fn api_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(serde_json::json!({"error": "Not found"}))).into_response()
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

async fn version_info() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "version": option_env!("GIT_VERSION").unwrap_or("dev"),
            "build_time": option_env!("BUILD_TIME").unwrap_or("unknown"),
            "cargo_version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

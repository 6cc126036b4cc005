//! SSO bridge handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use quantic_types::SsoEnvelope;

use crate::state::AppState;

type SsoResponse = (StatusCode, Json<SsoEnvelope>);

/// Login link for the configured service account.
pub async fn get_sso_link(State(state): State<AppState>) -> SsoResponse {
    respond(state.sso().envelope(None).await)
}

/// Login link for an explicit upstream user.
pub async fn get_sso_link_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> SsoResponse {
    match user_id.trim().parse::<u64>() {
        Ok(id) if id > 0 => respond(state.sso().envelope(Some(id)).await),
        _ => (
            StatusCode::BAD_REQUEST,
            Json(SsoEnvelope::failure(
                "Invalid user id",
                Some(format!("expected a positive integer, got {:?}", user_id)),
            )),
        ),
    }
}

fn respond(envelope: SsoEnvelope) -> SsoResponse {
    let status =
        if envelope.is_success() { StatusCode::OK } else { StatusCode::INTERNAL_SERVER_ERROR };
    (status, Json(envelope))
}

//! Browser configuration handler

use axum::{extract::State, response::Json};

use quantic_types::PublicConfig;

use crate::state::AppState;

/// Managed-database URL and public anon key for the dashboard scripts.
pub async fn get_public_config(State(state): State<AppState>) -> Json<PublicConfig> {
    let database = &state.config().database;
    Json(PublicConfig {
        supabase_url: database.url.clone(),
        supabase_anon_key: database.anon_key.clone(),
    })
}

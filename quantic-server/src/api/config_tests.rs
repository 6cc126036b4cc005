#![allow(clippy::unwrap_used, reason = "test assertions")]

use axum::extract::State;
use axum::response::Json;
use serde_json::json;

use quantic_types::models::{FALLBACK_DATABASE_ANON_KEY, FALLBACK_DATABASE_URL};

use super::config::get_public_config;
use crate::state::AppState;
use crate::test_helpers::{static_dir, test_config, test_server};

#[tokio::test]
async fn test_public_config_falls_back_to_local_database() {
    let dir = static_dir();
    let state = AppState::new(test_config("http://localhost:3001", &dir)).unwrap();

    let Json(config) = get_public_config(State(state)).await;

    assert_eq!(config.supabase_url, FALLBACK_DATABASE_URL);
    assert_eq!(config.supabase_anon_key, FALLBACK_DATABASE_ANON_KEY);
}

#[tokio::test]
async fn test_public_config_endpoint_shape() {
    let dir = static_dir();
    let mut config = test_config("http://localhost:3001", &dir);
    config.database.url = "https://db.example.com".to_string();
    config.database.anon_key = "anon-key".to_string();

    let response = test_server(config).get("/api/config").await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "supabaseUrl": "https://db.example.com",
        "supabaseAnonKey": "anon-key",
    }));
}

#[tokio::test]
async fn test_public_config_never_exposes_platform_token() {
    let dir = static_dir();
    let response = test_server(test_config("http://localhost:3001", &dir)).get("/api/config").await;
    assert!(!response.text().contains("test-platform-token"));
}

#[tokio::test]
async fn test_health_and_version() {
    let dir = static_dir();
    let server = test_server(test_config("http://localhost:3001", &dir));

    let health = server.get("/api/health").await;
    health.assert_status_ok();
    health.assert_json(&json!({"status": "ok"}));

    let version: serde_json::Value = server.get("/api/version").await.json();
    assert_eq!(version["cargo_version"], env!("CARGO_PKG_VERSION"));
    assert!(version["version"].is_string());
}

//! Test helpers for quantic-server unit tests.

use std::fs;

use axum_test::TestServer;
use tempfile::TempDir;

use quantic_types::GatewayConfig;

use crate::router::build_router;
use crate::state::AppState;

/// Static directory with a few dashboard files.
///
/// Returns the `TempDir` guard; keep it alive for the test duration.
pub fn static_dir() -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    fs::write(dir.path().join("crm.html"), "<h1>CRM</h1>").expect("write crm.html");
    fs::write(dir.path().join("style.css"), "body{}").expect("write style.css");
    fs::create_dir_all(dir.path().join("extra")).expect("create extra/");
    fs::write(dir.path().join("extra/chart.js"), "chart()").expect("write chart.js");
    dir
}

/// Config pointing at `upstream` and serving `static_dir`.
pub fn test_config(upstream: &str, static_dir: &TempDir) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.upstream.base_url = upstream.to_string();
    config.upstream.platform_token = Some("test-platform-token".to_string());
    config.static_dir = static_dir.path().display().to_string();
    config
}

/// Full router wrapped in an in-process test server.
pub fn test_server(config: GatewayConfig) -> TestServer {
    let state = AppState::new(config).expect("failed to create test AppState");
    TestServer::new(build_router(state)).expect("failed to start test server")
}

//! Quantic Server - Embedding Gateway
//!
//! A single HTTP origin that:
//! - Serves the dashboard's static files from `static_dir`
//! - Reverse-proxies everything else to the support-chat application,
//!   rewriting headers and cookies so its pages can be iframed
//! - Provides first-party endpoints on /api/* (config, SSO bridge, health)
//!
//! Access via: http://localhost:3000

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod cli;
mod commands;
mod router;
mod server_utils;
mod state;
#[cfg(test)]
mod test_helpers;

use cli::{Cli, Commands};
use quantic_core::modules::config as core_config;
use quantic_types::GatewayConfig;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_effective_config(&cli)?;

    match cli.command {
        None | Some(Commands::Serve) => run_server(config).await,
        Some(Commands::Config(cmd)) => commands::handle_config_command(&config, cmd),
        Some(Commands::Route { paths }) => commands::show_routes(&config, &paths),
    }
}

/// Environment/file configuration with CLI flags layered on top.
fn load_effective_config(cli: &Cli) -> Result<GatewayConfig> {
    let mut config = core_config::load_config()?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(dir) = &cli.static_dir {
        config.static_dir = dir.clone();
    }
    core_config::validate_config(&config)?;
    Ok(config)
}

async fn run_server(config: GatewayConfig) -> Result<()> {
    info!("🚀 Quantic Gateway v{} starting...", env!("CARGO_PKG_VERSION"));
    info!("📁 Static files: {}", config.static_dir);
    info!("🔀 Upstream: {}", config.upstream.base_url);
    info!("🧭 Route precedence: {}", config.routing.precedence);

    if config.database.url == quantic_types::models::FALLBACK_DATABASE_URL {
        tracing::warn!("⚠️ SUPABASE_URL not set, serving the local development database settings");
    }

    let state = AppState::new(config)?;
    info!("✅ Application state initialized (SSO configured: {})", state.sso().is_configured());

    let listener = server_utils::create_listener(state.config()).await?;
    let addr = listener.local_addr()?;
    let app = router::build_router(state);

    info!("🌐 Server listening on http://{}", addr);
    info!("🔌 API available at http://{}/api/", addr);

    axum::serve(listener, app).with_graceful_shutdown(server_utils::shutdown_signal()).await?;

    info!("👋 Server stopped");
    Ok(())
}

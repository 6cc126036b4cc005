//! Application State
//!
//! Built once before the listener starts and shared read-only by every
//! handler. Nothing in here changes after startup.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::services::ServeDir;

use quantic_core::proxy::{LocalFileIndex, RoutePolicy, SsoBridge, UpstreamClient};
use quantic_types::{AssetPrecedence, GatewayConfig};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub(crate) inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub config: GatewayConfig,
    pub policy: RoutePolicy,
    pub upstream: UpstreamClient,
    pub sso: SsoBridge,
    pub static_files: ServeDir,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let static_dir = Path::new(&config.static_dir);

        // The index only matters when the tie-break consults the filesystem
        let index = match config.routing.precedence {
            AssetPrecedence::ExistingFile => LocalFileIndex::scan(static_dir)
                .with_context(|| format!("Failed to index {}", static_dir.display()))?,
            AssetPrecedence::LocalExtension => LocalFileIndex::default(),
        };
        let policy = RoutePolicy::new(&config.routing, index);

        let (upstream, sso) =
            build_clients(&config).context("Failed to build upstream clients")?;

        let static_files = ServeDir::new(static_dir).append_index_html_on_directories(false);

        Ok(Self { inner: Arc::new(AppStateInner { config, policy, upstream, sso, static_files }) })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.inner.config
    }

    pub fn policy(&self) -> &RoutePolicy {
        &self.inner.policy
    }

    pub fn upstream(&self) -> &UpstreamClient {
        &self.inner.upstream
    }

    pub fn sso(&self) -> &SsoBridge {
        &self.inner.sso
    }

    pub fn static_files(&self) -> ServeDir {
        self.inner.static_files.clone()
    }
}

fn build_clients(config: &GatewayConfig) -> quantic_types::Result<(UpstreamClient, SsoBridge)> {
    let upstream = UpstreamClient::new(&config.upstream.base_url, &config.rewrite)?;
    let sso = SsoBridge::new(&config.upstream)?;
    Ok((upstream, sso))
}

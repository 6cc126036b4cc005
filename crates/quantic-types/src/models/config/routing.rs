//! Routing predicate configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::enums::AssetPrecedence;

/// Files shipped with the dashboard that must never be proxied.
const DEFAULT_LOCAL_ASSETS: &[&str] = &[
    "/conversas.html",
    "/index.html",
    "/crm.html",
    "/crm-cliente.html",
    "/contatos.html",
    "/captacao.html",
    "/style.css",
    "/script.js",
    "/theme-handler.js",
    "/logo.png",
];

/// Extensions treated as local static assets.
const DEFAULT_STATIC_EXTENSIONS: &[&str] =
    &["html", "css", "js", "png", "jpg", "jpeg", "svg", "ico", "woff", "woff2", "ttf"];

/// Inputs of the Local/Proxied routing decision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct RoutingConfig {
    /// Paths under this prefix are first-party endpoints
    #[validate(length(min = 2_u64))]
    #[serde(default = "default_reserved_prefix")]
    pub reserved_prefix: String,
    /// Exact paths always served from disk
    #[serde(default = "default_local_assets")]
    pub local_assets: Vec<String>,
    /// Lower-case extensions (no dot) considered static assets
    #[serde(default = "default_static_extensions")]
    pub static_extensions: Vec<String>,
    /// Tie-break for static-looking paths
    #[serde(default)]
    pub precedence: AssetPrecedence,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            reserved_prefix: default_reserved_prefix(),
            local_assets: default_local_assets(),
            static_extensions: default_static_extensions(),
            precedence: AssetPrecedence::default(),
        }
    }
}

fn default_reserved_prefix() -> String {
    "/api/".to_string()
}

fn default_local_assets() -> Vec<String> {
    DEFAULT_LOCAL_ASSETS.iter().map(|s| (*s).to_string()).collect()
}

fn default_static_extensions() -> Vec<String> {
    DEFAULT_STATIC_EXTENSIONS.iter().map(|s| (*s).to_string()).collect()
}

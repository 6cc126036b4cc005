//! Domain models shared by the gateway crates.

mod config;
mod envelope;
mod route;

pub use config::{
    AssetPrecedence, CorsConfig, DatabaseConfig, GatewayConfig, RewriteConfig, RoutingConfig,
    UpstreamConfig, FALLBACK_DATABASE_ANON_KEY, FALLBACK_DATABASE_URL,
};
pub use envelope::{PublicConfig, SsoEnvelope};
pub use route::RouteDecision;

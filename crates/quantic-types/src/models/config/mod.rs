//! Gateway configuration models.

mod enums;
mod gateway;
mod routing;
mod upstream;

pub use enums::AssetPrecedence;
pub use gateway::{
    CorsConfig, DatabaseConfig, GatewayConfig, RewriteConfig, FALLBACK_DATABASE_ANON_KEY,
    FALLBACK_DATABASE_URL,
};
pub use routing::RoutingConfig;
pub use upstream::UpstreamConfig;

pub(crate) const fn default_true() -> bool {
    true
}

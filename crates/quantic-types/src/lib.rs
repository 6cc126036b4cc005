//! # Quantic Types
//!
//! Core types, models, and error definitions for the Quantic gateway.
//!
//! - **`error`** - Typed error hierarchy for configuration, proxying, and SSO
//! - **`models`** - Gateway configuration, route decisions, JSON envelopes
//!
//! ## Architecture Role
//!
//! `quantic-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!   quantic-types (this crate)
//!         │
//!         ▼
//!   quantic-core
//!         │
//!         ▼
//!   quantic-server
//! ```

pub mod error;
pub mod models;

pub use error::{ConfigError, ProxyError, Result, SsoError, TypedError};

pub use models::{
    AssetPrecedence, CorsConfig, DatabaseConfig, GatewayConfig, PublicConfig, RewriteConfig,
    RouteDecision, RoutingConfig, SsoEnvelope, UpstreamConfig,
};

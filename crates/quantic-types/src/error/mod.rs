//! Typed error definitions for the gateway.
//!
//! Each domain gets its own enum; `TypedError` wraps them when a caller needs
//! a single error type.

mod config;
mod proxy;
mod sso;

pub use config::ConfigError;
pub use proxy::ProxyError;
pub use sso::SsoError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type that wraps all domain-specific errors.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "domain", content = "error")]
pub enum TypedError {
    /// Wraps a configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Wraps a proxy forwarding error
    #[error("Proxy error: {0}")]
    Proxy(#[from] ProxyError),

    /// Wraps an SSO bridge error
    #[error("SSO error: {0}")]
    Sso(#[from] SsoError),
}

/// Standard Result type using TypedError.
pub type Result<T> = std::result::Result<T, TypedError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let err = TypedError::Sso(SsoError::UpstreamStatus { status: 401 });

        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("Sso"));
        assert!(json.contains("401"));

        let deserialized: TypedError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, deserialized);
    }

    #[test]
    fn test_error_display() {
        let err = TypedError::from(ProxyError::UpstreamUnavailable {
            message: "connection refused".to_string(),
        });

        let msg = format!("{}", err);
        assert!(msg.starts_with("Proxy error"));
        assert!(msg.contains("connection refused"));
    }
}

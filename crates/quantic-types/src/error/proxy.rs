//! Proxy-related errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while forwarding a request to the upstream application.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ProxyError {
    /// Upstream is unreachable (connect error, reset, DNS failure)
    #[error("Upstream unavailable: {message}")]
    UpstreamUnavailable { message: String },

    /// The outbound request could not be assembled
    #[error("Invalid upstream request: {message}")]
    InvalidRequest { message: String },

    /// Connection upgrade (WebSocket, etc.) failed on either side
    #[error("Upgrade failed: {message}")]
    UpgradeFailed { message: String },
}

impl ProxyError {
    /// HTTP status code reported to the client.
    ///
    /// Every transport failure surfaces as a generic 500.
    pub fn http_status_code(&self) -> u16 {
        500
    }
}

//! SSO bridge errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while minting a one-time login URL from the upstream.
///
/// None of the variants carry the platform token; callers still run the
/// rendered message through redaction before returning it to a browser.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum SsoError {
    /// No platform token configured; SSO is permanently degraded
    #[error("Platform token is not configured")]
    MissingCredential,

    /// Transport failure talking to the identity endpoint
    #[error("Identity service unreachable: {message}")]
    Network { message: String },

    /// Identity endpoint answered with a non-2xx status
    #[error("Identity service returned HTTP {status}")]
    UpstreamStatus { status: u16 },

    /// Body was not JSON or had no usable `url` field
    #[error("Malformed identity response: {message}")]
    MalformedResponse { message: String },
}

impl SsoError {
    /// Short machine-readable category used in logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::Network { .. } => "network",
            Self::UpstreamStatus { .. } => "upstream_status",
            Self::MalformedResponse { .. } => "malformed_response",
        }
    }
}

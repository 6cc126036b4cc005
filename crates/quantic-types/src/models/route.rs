//! Routing decision.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a request is served from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RouteDecision {
    /// First-party endpoint or file from the static directory
    Local,
    /// Forwarded to the upstream application
    Proxied,
}

impl RouteDecision {
    pub const fn is_local(self) -> bool {
        matches!(self, Self::Local)
    }
}

impl fmt::Display for RouteDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Local => write!(f, "local"),
            Self::Proxied => write!(f, "proxied"),
        }
    }
}

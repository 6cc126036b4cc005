//! Upstream (embedded support-chat application) configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Where the embedded application lives and how to mint SSO links on it.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct UpstreamConfig {
    /// Origin of the upstream application, e.g. `https://chat.example.com`
    #[validate(url)]
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Platform API token used by the SSO bridge; never sent to browsers
    #[serde(default)]
    pub platform_token: Option<String>,
    /// Service account the bridge logs in as
    #[validate(range(min = 1_u64))]
    #[serde(default = "default_user_id")]
    pub user_id: u64,
    /// Timeout for identity-service calls
    #[validate(range(min = 1_u64, max = 300_u64))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            platform_token: None,
            user_id: default_user_id(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("platform_token", &self.platform_token.as_ref().map(|_| "***"))
            .field("user_id", &self.user_id)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl UpstreamConfig {
    /// Whether a non-blank platform token is configured.
    pub fn has_platform_token(&self) -> bool {
        self.platform_token.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

fn default_base_url() -> String {
    "http://localhost:3001".to_string()
}

const fn default_user_id() -> u64 {
    1
}

const fn default_request_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_masks_token() {
        let cfg = UpstreamConfig {
            platform_token: Some("super-secret".to_string()),
            ..UpstreamConfig::default()
        };
        let rendered = format!("{:?}", cfg);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn test_blank_token_is_missing() {
        let cfg =
            UpstreamConfig { platform_token: Some("   ".to_string()), ..UpstreamConfig::default() };
        assert!(!cfg.has_platform_token());
        assert!(!UpstreamConfig::default().has_platform_token());
    }
}

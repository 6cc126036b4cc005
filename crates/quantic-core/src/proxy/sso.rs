//! SSO bridge: mints one-time login URLs on the upstream's platform API
//! and hands them to the browser as gateway-relative paths.
//!
//! The platform token stays server-side. It is sent only to the identity
//! endpoint and is redacted from every message that leaves this module.

use quantic_types::{SsoEnvelope, SsoError, UpstreamConfig};
use serde::Deserialize;
use url::Url;

use super::common::client_builder::{build_http_client, ClientProfile};
use super::common::header_constants::API_ACCESS_TOKEN;
use super::common::origin::strip_origin;
use super::common::sanitize_error::{describe_sso_error, redact_secret};

/// Error message of every failure envelope.
pub const SSO_FAILURE_MESSAGE: &str = "Failed to generate SSO link";

#[derive(Debug, Deserialize)]
struct LoginUrlResponse {
    url: Option<String>,
}

/// Client for the upstream's platform login endpoint.
#[derive(Clone)]
pub struct SsoBridge {
    http: reqwest::Client,
    base: Url,
    token: Option<String>,
    default_user_id: u64,
}

impl std::fmt::Debug for SsoBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SsoBridge")
            .field("base", &self.base.as_str())
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("default_user_id", &self.default_user_id)
            .finish()
    }
}

impl SsoBridge {
    pub fn new(config: &UpstreamConfig) -> Result<Self, SsoError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| SsoError::Network { message: format!("invalid base URL: {}", e) })?;
        let http = build_http_client(ClientProfile::Identity {
            timeout_secs: config.request_timeout_secs,
        })
        .map_err(|message| SsoError::Network { message })?;

        let token = config
            .platform_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        if token.is_none() {
            tracing::warn!("Platform token not configured; SSO endpoints will report failure");
        }

        Ok(Self { http, base, token, default_user_id: config.user_id })
    }

    pub fn is_configured(&self) -> bool {
        self.token.is_some()
    }

    pub fn default_user_id(&self) -> u64 {
        self.default_user_id
    }

    fn login_endpoint(&self, user_id: u64) -> String {
        format!(
            "{}/platform/api/v1/users/{}/login",
            self.base.as_str().trim_end_matches('/'),
            user_id
        )
    }

    /// Ask the upstream for a one-time login URL, exactly as it reports it.
    pub async fn mint_login_url(&self, user_id: u64) -> Result<String, SsoError> {
        let token = self.token.as_deref().ok_or(SsoError::MissingCredential)?;

        let resp = self
            .http
            .get(self.login_endpoint(user_id))
            .header(API_ACCESS_TOKEN, token)
            .send()
            .await
            .map_err(|e| SsoError::Network { message: redact_secret(&e.to_string(), Some(token)) })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SsoError::UpstreamStatus { status: status.as_u16() });
        }

        let body: LoginUrlResponse = resp.json().await.map_err(|e| SsoError::MalformedResponse {
            message: redact_secret(&e.to_string(), Some(token)),
        })?;

        body.url.filter(|u| !u.trim().is_empty()).ok_or_else(|| SsoError::MalformedResponse {
            message: "response has no url".to_string(),
        })
    }

    /// Mint a login URL and strip its origin so the browser stays on the gateway.
    pub async fn login_path(&self, user_id: u64) -> Result<String, SsoError> {
        let url = self.mint_login_url(user_id).await?;
        strip_origin(&url).ok_or_else(|| SsoError::MalformedResponse {
            message: "url is neither absolute http(s) nor rooted".to_string(),
        })
    }

    /// Run the bridge for `user_id` (default account when `None`) and build
    /// the response envelope. Failures are logged with their raw cause.
    pub async fn envelope(&self, user_id: Option<u64>) -> SsoEnvelope {
        let user_id = user_id.unwrap_or(self.default_user_id);
        match self.login_path(user_id).await {
            Ok(path) => {
                tracing::info!(user_id, "SSO link generated");
                SsoEnvelope::success(path)
            },
            Err(e) => {
                let details = describe_sso_error(&e, self.token.as_deref());
                tracing::warn!(user_id, kind = e.kind(), "SSO link generation failed: {}", details);
                SsoEnvelope::failure(SSO_FAILURE_MESSAGE, Some(details))
            },
        }
    }
}

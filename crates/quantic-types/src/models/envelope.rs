//! JSON bodies returned by the first-party endpoints.

use serde::{Deserialize, Serialize};

/// Body of `GET /api/config`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PublicConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

/// Body of the SSO bridge endpoints.
///
/// Serialized untagged with an explicit `success` flag, matching what the
/// dashboard scripts test for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum SsoEnvelope {
    Success {
        success: bool,
        #[serde(rename = "ssoUrl")]
        sso_url: String,
    },
    Failure {
        success: bool,
        error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
}

impl SsoEnvelope {
    pub fn success(sso_url: impl Into<String>) -> Self {
        Self::Success { success: true, sso_url: sso_url.into() }
    }

    pub fn failure(error: impl Into<String>, details: Option<String>) -> Self {
        Self::Failure { success: false, error: error.into(), details }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_success_shape() {
        let v = serde_json::to_value(SsoEnvelope::success("/app/login/abc123")).unwrap();
        assert_eq!(v, serde_json::json!({"success": true, "ssoUrl": "/app/login/abc123"}));
    }

    #[test]
    fn test_failure_omits_empty_details() {
        let v = serde_json::to_value(SsoEnvelope::failure("boom", None)).unwrap();
        assert_eq!(v, serde_json::json!({"success": false, "error": "boom"}));
    }

    #[test]
    fn test_public_config_is_camel_case() {
        let v = serde_json::to_value(PublicConfig {
            supabase_url: "u".to_string(),
            supabase_anon_key: "k".to_string(),
        })
        .unwrap();
        assert_eq!(v, serde_json::json!({"supabaseUrl": "u", "supabaseAnonKey": "k"}));
    }
}

use std::time::Duration;

use reqwest::redirect::Policy;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// What an outbound client is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientProfile {
    /// Streaming passthrough of browser traffic. No total timeout: bodies and
    /// long-polls run as long as the upstream keeps them open.
    Forward,
    /// Connection upgrades. HTTP/1.1 only, since `101 Switching Protocols`
    /// does not exist on HTTP/2.
    Upgrade,
    /// Identity-service calls with a bounded request time.
    Identity { timeout_secs: u64 },
}

/// Build HTTP client for the given profile.
///
/// Redirects are never followed: a proxied redirect belongs to the browser,
/// and the identity endpoint is expected to answer directly.
pub fn build_http_client(profile: ClientProfile) -> Result<reqwest::Client, String> {
    let mut builder = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .redirect(Policy::none())
        .tcp_nodelay(true);

    match profile {
        ClientProfile::Forward => {}
        ClientProfile::Upgrade => {
            builder = builder.http1_only();
        },
        ClientProfile::Identity { timeout_secs } => {
            builder = builder.timeout(Duration::from_secs(timeout_secs.max(1)));
        },
    }

    builder.build().map_err(|e| format!("Failed to build HTTP client: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_profile_builds() {
        for profile in [
            ClientProfile::Forward,
            ClientProfile::Upgrade,
            ClientProfile::Identity { timeout_secs: 0 },
        ] {
            assert!(build_http_client(profile).is_ok(), "{:?} failed to build", profile);
        }
    }
}

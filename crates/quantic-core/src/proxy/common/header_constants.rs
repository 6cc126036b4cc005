//! HTTP header names the gateway adds, strips, or rewrites.

/// Header carrying the platform token on identity-service calls.
pub const API_ACCESS_TOKEN: &str = "api_access_token";

/// Upstream response headers that restrict framing. Removed outright.
pub const FRAMING_HEADERS: &[&str] =
    &["x-frame-options", "content-security-policy", "content-security-policy-report-only"];

/// Connection-scoped headers (RFC 9110 §7.6.1) never forwarded across a hop.
pub const HOP_BY_HOP_HEADERS: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "proxy-connection",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Headers an upgrade handshake depends on; kept when relaying one.
pub const UPGRADE_HANDSHAKE_HEADERS: &[&str] = &["connection", "upgrade"];

/// `Set-Cookie` attributes dropped so upstream cookies work over plain
/// HTTP under the gateway's own host.
pub const STRIPPED_COOKIE_ATTRIBUTES: &[&str] = &["secure", "samesite", "domain"];

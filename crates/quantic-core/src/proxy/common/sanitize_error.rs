//! Identity-service error sanitization. The raw error is logged server-side;
//! clients get a category with the HTTP status and never the platform token.

use quantic_types::SsoError;

const REDACTED: &str = "[redacted]";

/// Replace every occurrence of `secret` in `text`.
///
/// Blank secrets are ignored so an empty token cannot blank out the message.
pub fn redact_secret(text: &str, secret: Option<&str>) -> String {
    match secret.map(str::trim) {
        Some(secret) if !secret.is_empty() => text.replace(secret, REDACTED),
        _ => text.to_string(),
    }
}

/// Client-facing description of an SSO failure.
pub fn describe_sso_error(err: &SsoError, secret: Option<&str>) -> String {
    let message = match err {
        SsoError::UpstreamStatus { status } => sanitize_status(*status),
        other => other.to_string(),
    };
    redact_secret(&message, secret)
}

fn sanitize_status(status: u16) -> String {
    match status {
        401 | 403 => format!("Authentication failed (HTTP {})", status),
        404 => format!("User not found (HTTP {})", status),
        429 => format!("Rate limited (HTTP {})", status),
        500..=599 => format!("Identity service error (HTTP {})", status),
        _ => format!("Identity service returned HTTP {}", status),
    }
}

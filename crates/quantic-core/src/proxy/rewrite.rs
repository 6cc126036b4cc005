//! Header rewriting on both legs of a proxied exchange.
//!
//! Outbound: end-to-end headers are forwarded (cookies untouched), `Host`
//! names the upstream, `Origin`/`Referer` claim the upstream origin.
//!
//! Inbound: framing restrictions are removed, `Set-Cookie` transport
//! attributes are dropped, upstream-origin redirects are made relative.

use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use quantic_types::RewriteConfig;
use url::Url;

use super::common::header_constants::{
    FRAMING_HEADERS, HOP_BY_HOP_HEADERS, STRIPPED_COOKIE_ATTRIBUTES, UPGRADE_HANDSHAKE_HEADERS,
};
use super::common::origin::{origin_string, strip_matching_origin};

/// Response-side rewriting, configured once per upstream.
#[derive(Debug, Clone)]
pub struct ResponseRewriter {
    strip_cookie_attributes: bool,
    frame_ancestors: Option<HeaderValue>,
    location_origin: Option<Url>,
}

impl ResponseRewriter {
    pub fn new(config: &RewriteConfig, upstream: &Url) -> Self {
        let frame_ancestors = config
            .frame_ancestors
            .as_ref()
            .filter(|sources| !sources.is_empty())
            .and_then(|sources| {
                let policy = format!("frame-ancestors {}", sources.join(" "));
                match HeaderValue::from_str(&policy) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        tracing::warn!("Ignoring invalid frame-ancestors policy {:?}: {}", policy, e);
                        None
                    },
                }
            });

        Self {
            strip_cookie_attributes: config.strip_cookie_attributes,
            frame_ancestors,
            location_origin: config.rewrite_location.then(|| upstream.clone()),
        }
    }

    /// Rewrite upstream response headers in place.
    pub fn apply(&self, headers: &mut HeaderMap) {
        strip_framing_headers(headers);
        if let Some(policy) = &self.frame_ancestors {
            headers.insert(header::CONTENT_SECURITY_POLICY, policy.clone());
        }
        if self.strip_cookie_attributes {
            rewrite_set_cookie_headers(headers);
        }
        if let Some(upstream) = &self.location_origin {
            rewrite_location(headers, upstream);
        }
    }
}

pub fn strip_framing_headers(headers: &mut HeaderMap) {
    for name in FRAMING_HEADERS {
        headers.remove(*name);
    }
}

/// Drop `Secure`, `SameSite` and `Domain` from one `Set-Cookie` value.
///
/// The `name=value` pair and every other attribute are kept byte-for-byte.
pub fn rewrite_set_cookie(raw: &str) -> String {
    let mut segments = raw.split(';');
    let mut out = segments.next().unwrap_or_default().to_string();

    for attribute in segments {
        let name = attribute.split('=').next().unwrap_or_default().trim();
        if STRIPPED_COOKIE_ATTRIBUTES.iter().any(|s| name.eq_ignore_ascii_case(s)) {
            continue;
        }
        out.push(';');
        out.push_str(attribute);
    }
    out
}

fn rewrite_set_cookie_headers(headers: &mut HeaderMap) {
    let originals: Vec<HeaderValue> = headers.get_all(header::SET_COOKIE).iter().cloned().collect();
    if originals.is_empty() {
        return;
    }

    headers.remove(header::SET_COOKIE);
    for value in originals {
        // Values that are not valid UTF-8 are passed through untouched
        let rewritten = value
            .to_str()
            .ok()
            .and_then(|raw| HeaderValue::from_str(&rewrite_set_cookie(raw)).ok())
            .unwrap_or(value);
        headers.append(header::SET_COOKIE, rewritten);
    }
}

fn rewrite_location(headers: &mut HeaderMap, upstream: &Url) {
    let Some(relative) = headers
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|raw| strip_matching_origin(raw, upstream))
    else {
        return;
    };

    if let Ok(value) = HeaderValue::from_str(&relative) {
        headers.insert(header::LOCATION, value);
    }
}

/// Remove connection-scoped headers, including any named by `Connection`.
///
/// With `keep_upgrade` the `Connection`/`Upgrade` pair survives so an
/// upgrade handshake can be relayed.
pub fn strip_hop_by_hop(headers: &mut HeaderMap, keep_upgrade: bool) {
    let listed: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|token| HeaderName::from_bytes(token.trim().as_bytes()).ok())
        .collect();

    let keep = |name: &str| keep_upgrade && UPGRADE_HANDSHAKE_HEADERS.contains(&name);

    for name in listed {
        if !keep(name.as_str()) {
            headers.remove(&name);
        }
    }
    for name in HOP_BY_HOP_HEADERS {
        if !keep(*name) {
            headers.remove(*name);
        }
    }
}

/// `host[:port]` of the upstream, port omitted when it is the scheme default.
pub fn host_header(upstream: &Url) -> Option<String> {
    let host = upstream.host_str()?;
    Some(match upstream.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Headers for the outbound leg of a proxied request.
pub fn prepare_outbound_headers(incoming: &HeaderMap, upstream: &Url, upgrade: bool) -> HeaderMap {
    let mut headers = incoming.clone();
    strip_hop_by_hop(&mut headers, upgrade);

    headers.remove(header::HOST);
    if let Some(host) = host_header(upstream).and_then(|h| HeaderValue::from_str(&h).ok()) {
        headers.insert(header::HOST, host);
    }

    if let Ok(origin) = HeaderValue::from_str(&origin_string(upstream)) {
        headers.insert(header::ORIGIN, origin.clone());
        headers.insert(header::REFERER, origin);
    }
    headers
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use super::*;

    fn upstream() -> Url {
        Url::parse("http://localhost:3001").unwrap()
    }

    fn rewriter(config: RewriteConfig) -> ResponseRewriter {
        ResponseRewriter::new(&config, &upstream())
    }

    #[test]
    fn test_rewrite_set_cookie_strips_transport_attributes() {
        let raw = "_chatwoot_session=abc%3D%3D; path=/; Secure; HttpOnly; SameSite=None; Domain=.example.com";
        assert_eq!(rewrite_set_cookie(raw), "_chatwoot_session=abc%3D%3D; path=/; HttpOnly");
    }

    #[test]
    fn test_rewrite_set_cookie_is_case_insensitive() {
        assert_eq!(rewrite_set_cookie("a=1;SECURE;samesite=lax;DOMAIN=x"), "a=1");
        assert_eq!(rewrite_set_cookie("a=1; secure ; Max-Age=60"), "a=1; Max-Age=60");
    }

    #[test]
    fn test_rewrite_set_cookie_keeps_value_verbatim() {
        // attribute names inside the value are not attributes
        let raw = "pref=Secure=yes;Path=/app";
        assert_eq!(rewrite_set_cookie(raw), "pref=Secure=yes;Path=/app");
        assert_eq!(rewrite_set_cookie("bare"), "bare");
    }

    #[test]
    fn test_apply_strips_framing_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-frame-options", HeaderValue::from_static("SAMEORIGIN"));
        headers.insert("content-security-policy", HeaderValue::from_static("frame-ancestors 'none'"));
        headers.insert(
            "content-security-policy-report-only",
            HeaderValue::from_static("default-src 'self'"),
        );
        headers.insert("content-type", HeaderValue::from_static("text/html"));

        rewriter(RewriteConfig::default()).apply(&mut headers);

        assert!(headers.get("x-frame-options").is_none());
        assert!(headers.get("content-security-policy").is_none());
        assert!(headers.get("content-security-policy-report-only").is_none());
        assert_eq!(headers.get("content-type").unwrap(), "text/html");
    }

    #[test]
    fn test_apply_sets_frame_ancestors() {
        let config = RewriteConfig {
            frame_ancestors: Some(vec!["'self'".to_string(), "http://localhost:3000".to_string()]),
            ..RewriteConfig::default()
        };
        let mut headers = HeaderMap::new();
        headers.insert("content-security-policy", HeaderValue::from_static("default-src 'self'"));

        rewriter(config).apply(&mut headers);

        assert_eq!(
            headers.get_all("content-security-policy").iter().collect::<Vec<_>>(),
            vec!["frame-ancestors 'self' http://localhost:3000"]
        );
    }

    #[test]
    fn test_apply_rewrites_every_set_cookie() {
        let mut headers = HeaderMap::new();
        headers.append("set-cookie", HeaderValue::from_static("a=1; Secure"));
        headers.append("set-cookie", HeaderValue::from_static("b=2; SameSite=None; Path=/"));

        rewriter(RewriteConfig::default()).apply(&mut headers);

        let cookies: Vec<_> =
            headers.get_all("set-cookie").iter().map(|v| v.to_str().unwrap()).collect();
        assert_eq!(cookies, vec!["a=1", "b=2; Path=/"]);
    }

    #[test]
    fn test_cookie_stripping_can_be_disabled() {
        let config = RewriteConfig { strip_cookie_attributes: false, ..RewriteConfig::default() };
        let mut headers = HeaderMap::new();
        headers.insert("set-cookie", HeaderValue::from_static("a=1; Secure"));
        rewriter(config).apply(&mut headers);
        assert_eq!(headers.get("set-cookie").unwrap(), "a=1; Secure");
    }

    #[test]
    fn test_location_rewrite_only_for_upstream_origin() {
        let mut headers = HeaderMap::new();
        headers.insert("location", HeaderValue::from_static("http://localhost:3001/app/login?r=1"));
        rewriter(RewriteConfig::default()).apply(&mut headers);
        assert_eq!(headers.get("location").unwrap(), "/app/login?r=1");

        let mut headers = HeaderMap::new();
        headers.insert("location", HeaderValue::from_static("https://accounts.example.com/o/auth"));
        rewriter(RewriteConfig::default()).apply(&mut headers);
        assert_eq!(headers.get("location").unwrap(), "https://accounts.example.com/o/auth");
    }

    #[test]
    fn test_location_rewrite_can_be_disabled() {
        let config = RewriteConfig { rewrite_location: false, ..RewriteConfig::default() };
        let mut headers = HeaderMap::new();
        headers.insert("location", HeaderValue::from_static("http://localhost:3001/app"));
        rewriter(config).apply(&mut headers);
        assert_eq!(headers.get("location").unwrap(), "http://localhost:3001/app");
    }

    #[test]
    fn test_strip_hop_by_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("connection", HeaderValue::from_static("keep-alive, x-trace"));
        headers.insert("keep-alive", HeaderValue::from_static("timeout=5"));
        headers.insert("x-trace", HeaderValue::from_static("1"));
        headers.insert("transfer-encoding", HeaderValue::from_static("chunked"));
        headers.insert("content-length", HeaderValue::from_static("42"));

        strip_hop_by_hop(&mut headers, false);

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("content-length").unwrap(), "42");
    }

    #[test]
    fn test_strip_hop_by_hop_keeps_upgrade_pair() {
        let mut headers = HeaderMap::new();
        headers.insert("connection", HeaderValue::from_static("Upgrade"));
        headers.insert("upgrade", HeaderValue::from_static("websocket"));
        headers.insert("keep-alive", HeaderValue::from_static("timeout=5"));

        strip_hop_by_hop(&mut headers, true);

        assert_eq!(headers.get("connection").unwrap(), "Upgrade");
        assert_eq!(headers.get("upgrade").unwrap(), "websocket");
        assert!(headers.get("keep-alive").is_none());
    }

    #[test]
    fn test_prepare_outbound_headers() {
        let mut incoming = HeaderMap::new();
        incoming.insert("host", HeaderValue::from_static("localhost:3000"));
        incoming.insert("cookie", HeaderValue::from_static("_chatwoot_session=xyz; other=1"));
        incoming.insert("origin", HeaderValue::from_static("http://localhost:3000"));
        incoming.insert("connection", HeaderValue::from_static("keep-alive"));
        incoming.insert("accept", HeaderValue::from_static("text/html"));

        let out = prepare_outbound_headers(&incoming, &upstream(), false);

        assert_eq!(out.get("host").unwrap(), "localhost:3001");
        assert_eq!(out.get("origin").unwrap(), "http://localhost:3001");
        assert_eq!(out.get("referer").unwrap(), "http://localhost:3001");
        assert_eq!(out.get("cookie").unwrap(), "_chatwoot_session=xyz; other=1");
        assert_eq!(out.get("accept").unwrap(), "text/html");
        assert!(out.get("connection").is_none());
    }

    #[test]
    fn test_host_header_omits_default_port() {
        let url = Url::parse("https://chat.example.com:443/").unwrap();
        assert_eq!(host_header(&url).as_deref(), Some("chat.example.com"));
    }
}

//! Origin helpers for turning upstream URLs into gateway-relative paths.

use url::Url;

/// `scheme://host[:port]` of a URL, without a trailing slash.
pub fn origin_string(url: &Url) -> String {
    url.origin().ascii_serialization()
}

/// Path, query and fragment of a parsed URL, joined back together.
fn path_query_fragment(url: &Url) -> String {
    let mut out = url.path().to_string();
    if let Some(query) = url.query() {
        out.push('?');
        out.push_str(query);
    }
    if let Some(fragment) = url.fragment() {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

/// Strip the origin from a URL, keeping path, query and fragment.
///
/// Accepts absolute `http`/`https` URLs (any host) and `/`-rooted paths,
/// which are returned as-is. Returns `None` for anything else, including
/// protocol-relative `//host/...` references.
pub fn strip_origin(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.starts_with('/') {
        return (!raw.starts_with("//")).then(|| raw.to_string());
    }

    let url = Url::parse(raw).ok()?;
    match url.scheme() {
        "http" | "https" => Some(path_query_fragment(&url)),
        _ => None,
    }
}

/// Strip the origin only when `raw` points at `upstream`'s origin.
///
/// Returns `None` when the URL is relative, foreign, or unparseable, i.e.
/// whenever it should be left untouched.
pub fn strip_matching_origin(raw: &str, upstream: &Url) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    (url.origin() == upstream.origin()).then(|| path_query_fragment(&url))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use super::*;

    #[test]
    fn test_strip_origin_absolute() {
        assert_eq!(
            strip_origin("https://chat.example.com/app/login?token=abc").as_deref(),
            Some("/app/login?token=abc")
        );
        assert_eq!(strip_origin("http://localhost:3001/").as_deref(), Some("/"));
        assert_eq!(
            strip_origin("https://chat.example.com/app#/inbox").as_deref(),
            Some("/app#/inbox")
        );
    }

    #[test]
    fn test_strip_origin_host_only_yields_root() {
        assert_eq!(strip_origin("https://chat.example.com").as_deref(), Some("/"));
    }

    #[test]
    fn test_strip_origin_keeps_rooted_path() {
        assert_eq!(strip_origin("/app/login?x=1").as_deref(), Some("/app/login?x=1"));
    }

    #[test]
    fn test_strip_origin_rejects_other_shapes() {
        assert_eq!(strip_origin("//evil.example/app"), None);
        assert_eq!(strip_origin("javascript:alert(1)"), None);
        assert_eq!(strip_origin("app/login"), None);
        assert_eq!(strip_origin(""), None);
    }

    #[test]
    fn test_strip_matching_origin() {
        let upstream = Url::parse("http://localhost:3001").unwrap();
        assert_eq!(
            strip_matching_origin("http://localhost:3001/app/accounts/1", &upstream).as_deref(),
            Some("/app/accounts/1")
        );
        assert_eq!(strip_matching_origin("http://localhost:3002/app", &upstream), None);
        assert_eq!(strip_matching_origin("https://localhost:3001/app", &upstream), None);
        assert_eq!(strip_matching_origin("/app", &upstream), None);
    }

    #[test]
    fn test_default_port_is_same_origin() {
        let upstream = Url::parse("https://chat.example.com").unwrap();
        assert_eq!(
            strip_matching_origin("https://chat.example.com:443/x", &upstream).as_deref(),
            Some("/x")
        );
        assert_eq!(origin_string(&upstream), "https://chat.example.com");
    }
}

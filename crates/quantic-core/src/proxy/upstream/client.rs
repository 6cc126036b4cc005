//! Streaming forwarder to the upstream application.

use axum::body::{Body, HttpBody};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use quantic_types::{ProxyError, RewriteConfig};
use url::Url;

use super::upgrade;
use crate::proxy::common::client_builder::{build_http_client, ClientProfile};
use crate::proxy::rewrite::{prepare_outbound_headers, strip_hop_by_hop, ResponseRewriter};

/// Plain-text body returned when the upstream cannot be reached.
pub const PROXY_ERROR_BODY: &str = "Proxy error";

/// HTTP client bound to one upstream origin.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    pub(super) http: reqwest::Client,
    pub(super) upgrade_http: reqwest::Client,
    base: Url,
    pub(super) rewriter: ResponseRewriter,
}

impl UpstreamClient {
    pub fn new(base_url: &str, rewrite: &RewriteConfig) -> Result<Self, ProxyError> {
        let base = Url::parse(base_url)
            .map_err(|e| ProxyError::InvalidRequest { message: format!("{}: {}", base_url, e) })?;
        let build = |profile| {
            build_http_client(profile).map_err(|message| ProxyError::InvalidRequest { message })
        };

        Ok(Self {
            http: build(ClientProfile::Forward)?,
            upgrade_http: build(ClientProfile::Upgrade)?,
            rewriter: ResponseRewriter::new(rewrite, &base),
            base,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `base_url` followed by the request's path and query, verbatim.
    pub fn target_url(&self, path_and_query: &str) -> Result<Url, ProxyError> {
        let target = format!("{}{}", self.base.as_str().trim_end_matches('/'), path_and_query);
        Url::parse(&target)
            .map_err(|e| ProxyError::InvalidRequest { message: format!("{}: {}", target, e) })
    }

    /// Forward a request and stream the rewritten upstream response back.
    pub async fn forward(&self, req: Request<Body>) -> Result<Response, ProxyError> {
        if upgrade::is_upgrade_request(req.headers()) {
            return upgrade::forward_upgrade(self, req).await;
        }

        let (parts, body) = req.into_parts();
        let url = self.target_url(path_and_query(&parts.uri))?;
        let headers = prepare_outbound_headers(&parts.headers, &self.base, false);

        tracing::debug!(method = %parts.method, %url, "Forwarding to upstream");

        let mut builder = self.http.request(parts.method, url).headers(headers);
        if has_body(&parts.headers, &body) {
            builder = builder.body(reqwest::Body::wrap_stream(body.into_data_stream()));
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| ProxyError::UpstreamUnavailable { message: e.to_string() })?;

        Ok(self.relay_response(resp))
    }

    /// [`forward`](Self::forward), with transport failures rendered as
    /// `500 Proxy error`.
    pub async fn forward_or_error(&self, req: Request<Body>) -> Response {
        let path = req.uri().path().to_string();
        match self.forward(req).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(path = %path, "Proxy error: {}", e);
                proxy_error_response(&e)
            },
        }
    }

    /// Convert an upstream response into a client response, body streamed.
    pub(super) fn relay_response(&self, resp: reqwest::Response) -> Response {
        let status = resp.status();
        let mut headers = resp.headers().clone();
        strip_hop_by_hop(&mut headers, false);
        self.rewriter.apply(&mut headers);

        let mut response = Response::new(Body::from_stream(resp.bytes_stream()));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        response
    }
}

pub fn proxy_error_response(err: &ProxyError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, PROXY_ERROR_BODY).into_response()
}

pub(super) fn path_and_query(uri: &axum::http::Uri) -> &str {
    uri.path_and_query().map_or("/", |pq| pq.as_str())
}

/// Bodiless requests are sent without one so the upstream sees no
/// `Transfer-Encoding`. HTTP/2 requests may carry a body with neither
/// framing header, so the body's own end-of-stream flag is checked last.
fn has_body(headers: &HeaderMap, body: &Body) -> bool {
    let content_length = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .is_some_and(|len| len > 0);
    content_length || headers.contains_key(header::TRANSFER_ENCODING) || !body.is_end_stream()
}

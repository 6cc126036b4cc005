//! Connection upgrade passthrough (WebSocket and friends).
//!
//! The handshake is relayed over an HTTP/1.1 client with the
//! `Connection`/`Upgrade` pair intact. Once the upstream answers
//! `101 Switching Protocols` the same status goes back to the browser, and
//! a background task splices the two upgraded connections together until
//! either side closes.

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::response::Response;
use hyper_util::rt::TokioIo;
use quantic_types::ProxyError;

use super::client::{path_and_query, UpstreamClient};
use crate::proxy::rewrite::prepare_outbound_headers;

/// `Connection: upgrade` together with an `Upgrade` header.
pub fn is_upgrade_request(headers: &HeaderMap) -> bool {
    let connection_upgrade = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .any(|token| token.trim().eq_ignore_ascii_case("upgrade"));
    connection_upgrade && headers.contains_key(header::UPGRADE)
}

pub(super) async fn forward_upgrade(
    client: &UpstreamClient,
    mut req: Request<Body>,
) -> Result<Response, ProxyError> {
    let client_upgrade = hyper::upgrade::on(&mut req);
    let (parts, _body) = req.into_parts();

    let url = client.target_url(path_and_query(&parts.uri))?;
    let headers = prepare_outbound_headers(&parts.headers, client.base_url(), true);
    let protocol = parts
        .headers
        .get(header::UPGRADE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    tracing::debug!(%url, protocol = %protocol, "Forwarding upgrade request");

    let upstream = client
        .upgrade_http
        .request(parts.method, url)
        .headers(headers)
        .send()
        .await
        .map_err(|e| ProxyError::UpstreamUnavailable { message: e.to_string() })?;

    if upstream.status() != StatusCode::SWITCHING_PROTOCOLS {
        // Upstream declined; hand its answer back like any other response
        return Ok(client.relay_response(upstream));
    }

    let mut response_headers = upstream.headers().clone();
    client.rewriter.apply(&mut response_headers);

    tokio::spawn(async move {
        if let Err(e) = splice(client_upgrade, upstream).await {
            tracing::warn!(protocol = %protocol, "Upgraded connection ended with error: {}", e);
        }
    });

    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::SWITCHING_PROTOCOLS;
    *response.headers_mut() = response_headers;
    Ok(response)
}

async fn splice(
    client_upgrade: hyper::upgrade::OnUpgrade,
    upstream: reqwest::Response,
) -> Result<(), ProxyError> {
    let (client_io, mut upstream_io) = tokio::try_join!(
        async {
            client_upgrade
                .await
                .map_err(|e| ProxyError::UpgradeFailed { message: format!("client: {}", e) })
        },
        async {
            upstream
                .upgrade()
                .await
                .map_err(|e| ProxyError::UpgradeFailed { message: format!("upstream: {}", e) })
        },
    )?;

    let mut client_io = TokioIo::new(client_io);
    let (sent, received) = tokio::io::copy_bidirectional(&mut client_io, &mut upstream_io)
        .await
        .map_err(|e| ProxyError::UpgradeFailed { message: e.to_string() })?;

    tracing::debug!(sent, received, "Upgraded connection closed");
    Ok(())
}

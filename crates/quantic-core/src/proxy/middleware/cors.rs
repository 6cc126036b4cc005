// CORS middleware
use axum::http::{header, HeaderValue, Method};
use quantic_types::CorsConfig;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Credentialed CORS for the configured dashboard origins.
///
/// Preflight requests are answered by the layer and never reach the upstream.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .map(|o| o.trim())
        .filter_map(|o| {
            // AllowOrigin::list panics on a wildcard
            if o == "*" {
                tracing::warn!("Ignoring wildcard CORS origin, list origins explicitly");
                return None;
            }
            match o.parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin {:?}", o);
                    None
                },
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::COOKIE])
        .expose_headers([header::SET_COOKIE])
        .allow_credentials(config.allow_credentials)
}

//! Gateway dispatcher: every path without a first-party handler lands here.

use axum::{
    body::Body,
    extract::{Request, State},
    response::Response,
};
use tower::ServiceExt;

use quantic_types::RouteDecision;

use super::api_not_found;
use crate::state::AppState;

pub async fn dispatch(State(state): State<AppState>, req: Request) -> Response {
    let path = req.uri().path().to_string();

    if state.policy().is_reserved(&path) {
        return api_not_found();
    }

    match state.policy().decide(&path) {
        RouteDecision::Local => serve_local(&state, req).await,
        RouteDecision::Proxied => state.upstream().forward_or_error(req).await,
    }
}

async fn serve_local(state: &AppState, req: Request) -> Response {
    match state.static_files().oneshot(req).await {
        Ok(response) => response.map(Body::new),
        Err(never) => match never {},
    }
}

use crate::app::AppState;
use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

/// Rejects gateway requests without the configured bearer token.
pub async fn auth_middleware(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .unwrap_or("");

    if token.is_empty() {
        warn!(path = %req.uri().path(), "Gateway request without bearer token");
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    }
    if token != state.cfg.api_token {
        warn!(path = %req.uri().path(), "Gateway request with unknown token");
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    }

    next.run(req).await
}

use crate::error::Error;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

/// Reject requests whose bearer token does not match the configured secret.
///
/// Does nothing when no secret is configured.
pub async fn require_bearer(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let Some(secret) = state.secret_key.as_deref() else {
        return next.run(req).await;
    };

    let provided = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    if provided != Some(format!("Bearer {}", secret).as_str()) {
        warn!("Rejected {} {}: bad or missing token", req.method(), req.uri().path());
        return Error::Auth("Unauthorized access".to_string()).into_response();
    }

    next.run(req).await
}

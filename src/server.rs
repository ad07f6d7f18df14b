use axum::{middleware, routing::get, Router};
use std::path::Path;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::api;
use crate::api::auth::require_bearer;
use crate::api::handlers::health_handler;
use crate::state::AppState;
use crate::web;
use crate::web::handlers::fallback_handler;

/// Build the full application: API, calendar page, static assets.
///
/// The bearer check guards every route except `/health` and `/assets`.
pub fn build_router(state: AppState, public_dir: &Path) -> Router {
    let guarded = Router::new()
        .merge(api::router())
        .merge(web::router())
        .fallback(fallback_handler)
        .layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    Router::new()
        .route("/health", get(health_handler))
        .nest_service("/assets", ServeDir::new(public_dir.join("assets")))
        .merge(guarded)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

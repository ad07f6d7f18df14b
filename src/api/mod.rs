//! REST surface over the event collection

pub mod auth;
pub mod handlers;

use axum::{
    routing::{delete, get},
    Router,
};

use crate::state::AppState;
use handlers::{create_event, delete_event, list_events};

/// Routes under `/api`; the bearer check is layered on in `server`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/events", get(list_events).post(create_event))
        .route("/api/events/{id}", delete(delete_event))
}

//! Server-rendered calendar client.
//!
//! Pages are built from [`crate::calendar::CalendarView`] and talk to the
//! event API over HTTP through [`crate::client::EventsClient`].

pub mod handlers;
pub mod page;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use handlers::{calendar_page, create_from_form, delete_from_form};

/// Routes of the calendar page and its form actions
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(calendar_page))
        .route("/agenda/events", post(create_from_form))
        .route("/agenda/events/{id}/delete", post(delete_from_form))
}

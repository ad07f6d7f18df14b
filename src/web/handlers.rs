use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::Method,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::{error, info};

use super::page::{page_href, CalendarPage};
use crate::calendar::{CalendarView, YearMonth};
use crate::error::{AgendaResult, Error};
use crate::models::CreateEventRequest;
use crate::state::AppState;

/// Month shown by a page; 1-based, wraps like navigation does
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub month: Option<String>,
    pub year: Option<String>,
}

impl PageQuery {
    /// Requested month, or the current one when missing or unparseable
    pub fn resolve(&self) -> YearMonth {
        let month = self.month.as_deref().and_then(|m| m.trim().parse::<i64>().ok());
        let year = self.year.as_deref().and_then(|y| y.trim().parse::<i32>().ok());

        match (month, year) {
            (Some(month), Some(year)) => {
                YearMonth::wrapping(year, month).unwrap_or_else(|_| YearMonth::current())
            }
            _ => YearMonth::current(),
        }
    }
}

/// Fields of the create form
#[derive(Debug, Default, Deserialize)]
pub struct CreateForm {
    pub date: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub month: Option<String>,
    pub year: Option<String>,
}

/// Load `month` through the API and render it
async fn render_month(
    state: &AppState,
    month: YearMonth,
    alert: Option<String>,
) -> AgendaResult<Html<String>> {
    let mut view = CalendarView::new(month, &*state.locale);
    view.reload(&state.client).await;
    Ok(Html(CalendarPage::new(&view, alert).render()?))
}

/// GET / - the calendar page
pub async fn calendar_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AgendaResult<Html<String>> {
    render_month(&state, query.resolve(), None).await
}

/// Any unmatched GET renders the calendar page
pub async fn fallback_handler(
    method: Method,
    state: State<AppState>,
    query: Query<PageQuery>,
) -> Response {
    if method == Method::GET {
        calendar_page(state, query).await.into_response()
    } else {
        Error::NotFound("Not found".to_string()).into_response()
    }
}

/// POST /agenda/events - create from the page form, then reload the month
pub async fn create_from_form(
    State(state): State<AppState>,
    Form(form): Form<CreateForm>,
) -> AgendaResult<Response> {
    let month = PageQuery {
        month: form.month,
        year: form.year,
    }
    .resolve();

    let request = CreateEventRequest {
        date: form.date,
        title: form.title,
        description: form.description,
        kind: form.kind,
    };

    match state.client.create(&request).await {
        Ok(event) => {
            info!("Created event {} from the calendar page", event.id);
            Ok(Redirect::to(&page_href(month)).into_response())
        }
        Err(e) => {
            error!("Failed to create event: {}", e);
            Ok(render_month(&state, month, Some(e.to_string()))
                .await?
                .into_response())
        }
    }
}

/// POST /agenda/events/{id}/delete - delete the card's event, then reload
pub async fn delete_from_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(back): Form<PageQuery>,
) -> AgendaResult<Response> {
    let month = back.resolve();

    match state.client.delete(&id).await {
        Ok(deleted) => {
            info!("Deleted event {} from the calendar page", deleted.deleted_event.id);
            Ok(Redirect::to(&page_href(month)).into_response())
        }
        Err(e) => {
            error!("Failed to delete event {}: {}", id, e);
            Ok(render_month(&state, month, Some(e.to_string()))
                .await?
                .into_response())
        }
    }
}

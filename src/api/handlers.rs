use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::calendar::YearMonth;
use crate::error::{validation_error, AgendaResult, Error};
use crate::models::{CreateEventRequest, DeleteResponse, Event, NewEvent};
use crate::state::AppState;

/// Query of the list endpoint; both values are required
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
    pub year: Option<String>,
}

impl MonthQuery {
    fn parse(&self) -> AgendaResult<YearMonth> {
        let (Some(month), Some(year)) = (self.month.as_deref(), self.year.as_deref()) else {
            return Err(validation_error("Parameters month and year are required"));
        };

        let month = month
            .trim()
            .parse::<u32>()
            .map_err(|_| validation_error(&format!("Invalid month: {:?}", month)))?;
        let year = year
            .trim()
            .parse::<i32>()
            .map_err(|_| validation_error(&format!("Invalid year: {:?}", year)))?;

        YearMonth::new(year, month)
    }
}

/// GET /api/events?month=M&year=Y
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> AgendaResult<Json<Vec<Event>>> {
    let month = query.parse()?;
    let events = state.store.list_month(month).await?;
    Ok(Json(events))
}

/// POST /api/events
pub async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> AgendaResult<(StatusCode, Json<Event>)> {
    let Json(request) = payload.map_err(|e| Error::Validation(e.body_text()))?;
    let new_event = NewEvent::from_request(request)?;

    let event = state.store.create(new_event).await?;
    info!("Created {} event {} on {}", event.kind, event.id, event.date);

    Ok((StatusCode::CREATED, Json(event)))
}

/// DELETE /api/events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AgendaResult<Json<DeleteResponse>> {
    let deleted = state
        .store
        .delete(&id)
        .await?
        .ok_or_else(|| Error::NotFound("Event not found".to_string()))?;
    info!("Deleted event {}", deleted.id);

    Ok(Json(DeleteResponse {
        message: "Event removed successfully".to_string(),
        deleted_event: deleted,
    }))
}

/// GET /health
pub async fn health_handler() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(month: Option<&str>, year: Option<&str>) -> MonthQuery {
        MonthQuery {
            month: month.map(str::to_string),
            year: year.map(str::to_string),
        }
    }

    #[test]
    fn test_month_query_requires_both() {
        assert!(query(None, Some("2024")).parse().is_err());
        assert!(query(Some("3"), None).parse().is_err());
        assert!(query(None, None).parse().is_err());
    }

    #[test]
    fn test_month_query_validates_range() {
        assert!(query(Some("0"), Some("2024")).parse().is_err());
        assert!(query(Some("13"), Some("2024")).parse().is_err());
        assert!(query(Some("march"), Some("2024")).parse().is_err());
        assert_eq!(
            query(Some("3"), Some("2024")).parse().unwrap(),
            YearMonth::new(2024, 3).unwrap()
        );
    }
}

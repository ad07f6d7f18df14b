use crate::error::{validation_error, AgendaResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of an agenda entry.
///
/// The declaration order is the order markers are drawn on the calendar.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    #[default]
    Task,
    Visit,
    Inspection,
}

impl EventType {
    pub const ALL: [EventType; 3] = [EventType::Task, EventType::Visit, EventType::Inspection];

    /// Wire tag of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Task => "task",
            EventType::Visit => "visit",
            EventType::Inspection => "inspection",
        }
    }

    /// Font Awesome icon class shown on event cards
    pub fn icon_class(&self) -> &'static str {
        match self {
            EventType::Task => "fas fa-tasks",
            EventType::Visit => "fas fa-building",
            EventType::Inspection => "fas fa-hard-hat",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> AgendaResult<Self> {
        EventType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| validation_error(&format!("Invalid event type: {:?}", s)))
    }
}

/// A single-day agenda entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Store-assigned identifier
    pub id: String,
    /// Date string, YYYY-MM-DD
    pub date: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Raw body of a create request, before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateEventRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Validated input for creating an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub date: String,
    pub title: String,
    pub description: String,
    pub kind: EventType,
}

impl NewEvent {
    /// Validate a raw create request.
    ///
    /// `date` and `title` are required; an omitted `type` becomes `task`,
    /// any other unknown tag is rejected.
    pub fn from_request(req: CreateEventRequest) -> AgendaResult<Self> {
        let date = req.date.map(|d| d.trim().to_string()).unwrap_or_default();
        let title = req.title.map(|t| t.trim().to_string()).unwrap_or_default();

        if date.is_empty() || title.is_empty() {
            return Err(validation_error("Missing required fields: date and title"));
        }
        if !is_date_shaped(&date) {
            return Err(validation_error(&format!(
                "Invalid date {:?}, expected YYYY-MM-DD",
                date
            )));
        }

        let kind = match req.kind {
            Some(tag) => tag.parse()?,
            None => EventType::default(),
        };

        Ok(NewEvent {
            date,
            title,
            description: req.description.map(|d| d.trim().to_string()).unwrap_or_default(),
            kind,
        })
    }

    /// Materialize the event with a store-assigned id
    pub fn into_event(self, id: String, created_at: DateTime<Utc>) -> Event {
        Event {
            id,
            date: self.date,
            title: self.title,
            description: self.description,
            kind: self.kind,
            created_at: Some(created_at),
        }
    }
}

impl From<&NewEvent> for CreateEventRequest {
    fn from(event: &NewEvent) -> Self {
        CreateEventRequest {
            date: Some(event.date.clone()),
            title: Some(event.title.clone()),
            description: Some(event.description.clone()),
            kind: Some(event.kind.as_str().to_string()),
        }
    }
}

/// Payload returned by a successful delete
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub message: String,
    pub deleted_event: Event,
}

/// Check the `YYYY-MM-DD` shape without checking the calendar
pub fn is_date_shaped(date: &str) -> bool {
    let bytes = date.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

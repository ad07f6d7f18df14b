use super::{new_event_id, EventStore};
use crate::error::AgendaResult;
use crate::models::{Event, NewEvent};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

/// In-memory implementation of the store (for testing and database-less runs)
#[derive(Debug, Default)]
pub struct InMemoryStore {
    events: RwLock<Vec<Event>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored events
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

#[async_trait]
impl EventStore for InMemoryStore {
    async fn list_range(&self, start: &str, end: &str) -> AgendaResult<Vec<Event>> {
        let events = self.events.read().await;
        let mut found: Vec<Event> = events
            .iter()
            .filter(|e| e.date.as_str() >= start && e.date.as_str() <= end)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(found)
    }

    async fn create(&self, event: NewEvent) -> AgendaResult<Event> {
        let event = event.into_event(new_event_id(), Utc::now());
        self.events.write().await.push(event.clone());
        Ok(event)
    }

    async fn delete(&self, id: &str) -> AgendaResult<Option<Event>> {
        let mut events = self.events.write().await;
        Ok(events
            .iter()
            .position(|e| e.id == id)
            .map(|index| events.remove(index)))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

use crate::calendar::YearMonth;
use crate::error::AgendaResult;
use crate::models::{Event, NewEvent};
use async_trait::async_trait;

mod memory;
#[cfg(feature = "redis-store")]
mod redis_store;

pub use memory::InMemoryStore;
#[cfg(feature = "redis-store")]
pub use redis_store::RedisStore;

/// Persistence for agenda events.
///
/// Each create and delete is a single atomic document operation.
#[async_trait]
pub trait EventStore: Send + Sync + 'static {
    /// Events whose date string lies in the inclusive range, sorted by date
    async fn list_range(&self, start: &str, end: &str) -> AgendaResult<Vec<Event>>;

    /// Persist a new event, assigning its id and creation time
    async fn create(&self, event: NewEvent) -> AgendaResult<Event>;

    /// Remove an event, returning it, or `None` if no such id exists
    async fn delete(&self, id: &str) -> AgendaResult<Option<Event>>;

    /// Short backend name for logs
    fn backend(&self) -> &'static str;

    /// Events dated within `month`
    async fn list_month(&self, month: YearMonth) -> AgendaResult<Vec<Event>> {
        let (start, end) = month.date_range();
        self.list_range(&start, &end).await
    }
}

/// Fresh opaque id for a new event
pub(crate) fn new_event_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

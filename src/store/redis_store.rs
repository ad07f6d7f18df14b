use super::{new_event_id, EventStore};
use crate::error::AgendaResult;
use crate::models::{Event, NewEvent};
use async_trait::async_trait;
use chrono::Utc;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client as RedisClient};
use tracing::{info, warn};

/// Redis keys
mod keys {
    /// Hash of event id to the event's JSON document
    pub const EVENTS: &str = "agenda:events";
    /// Sorted set of `<date>:<id>` members, all with score 0, queried by lex range
    pub const DATE_INDEX: &str = "agenda:events:by_date";
}

/// Redis-backed document store
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connect to Redis at `redis_url`
    pub async fn connect(redis_url: &str) -> AgendaResult<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = RedisClient::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;

        Ok(Self { conn })
    }
}

/// Member of the date index for an event
fn index_member(event: &Event) -> String {
    format!("{}:{}", event.date, event.id)
}

/// Lex bounds selecting every member whose date lies in `[start, end]`.
///
/// Dates are fixed-width, so `<end>;` sorts right after every `<end>:<id>`.
fn lex_bounds(start: &str, end: &str) -> (String, String) {
    (format!("[{}", start), format!("({};", end))
}

#[async_trait]
impl EventStore for RedisStore {
    async fn list_range(&self, start: &str, end: &str) -> AgendaResult<Vec<Event>> {
        let mut conn = self.conn.clone();
        let (min, max) = lex_bounds(start, end);

        let members: Vec<String> = conn.zrangebylex(keys::DATE_INDEX, min, max).await?;
        if members.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<&str> = members
            .iter()
            .filter_map(|m| m.split_once(':').map(|(_, id)| id))
            .collect();

        let docs: Vec<Option<String>> = redis::cmd("HMGET")
            .arg(keys::EVENTS)
            .arg(&ids)
            .query_async(&mut conn)
            .await?;

        let mut events = Vec::with_capacity(docs.len());
        for (id, doc) in ids.iter().zip(docs) {
            match doc {
                Some(json) => events.push(serde_json::from_str::<Event>(&json)?),
                None => warn!("Date index references missing event {}", id),
            }
        }

        Ok(events)
    }

    async fn create(&self, event: NewEvent) -> AgendaResult<Event> {
        let mut conn = self.conn.clone();
        let event = event.into_event(new_event_id(), Utc::now());
        let json = serde_json::to_string(&event)?;

        let _: () = redis::pipe()
            .atomic()
            .hset(keys::EVENTS, &event.id, &json)
            .ignore()
            .zadd(keys::DATE_INDEX, index_member(&event), 0)
            .ignore()
            .query_async(&mut conn)
            .await?;

        info!("Stored event {} on {}", event.id, event.date);
        Ok(event)
    }

    async fn delete(&self, id: &str) -> AgendaResult<Option<Event>> {
        let mut conn = self.conn.clone();

        let doc: Option<String> = conn.hget(keys::EVENTS, id).await?;
        let Some(json) = doc else {
            return Ok(None);
        };
        let event: Event = serde_json::from_str(&json)?;

        let (removed, _): (i64, i64) = redis::pipe()
            .atomic()
            .hdel(keys::EVENTS, id)
            .zrem(keys::DATE_INDEX, index_member(&event))
            .query_async(&mut conn)
            .await?;

        // Someone else deleted it between the read and the write
        if removed == 0 {
            return Ok(None);
        }

        info!("Deleted event {}", id);
        Ok(Some(event))
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

//! Round trips against a real Redis, run only when `REDIS_URL` is set.
#![cfg(feature = "redis-store")]

use agenda::calendar::YearMonth;
use agenda::models::{EventType, NewEvent};
use agenda::store::{EventStore, RedisStore};

async fn connect() -> Option<RedisStore> {
    let url = std::env::var("REDIS_URL").ok().filter(|u| !u.is_empty())?;
    Some(RedisStore::connect(&url).await.unwrap())
}

fn new_event(date: &str, title: &str, kind: EventType) -> NewEvent {
    NewEvent {
        date: date.to_string(),
        title: title.to_string(),
        description: "Redis".to_string(),
        kind,
    }
}

#[tokio::test]
async fn test_redis_create_list_delete() {
    let Some(store) = connect().await else {
        eprintln!("REDIS_URL not set, skipping");
        return;
    };
    // A month no real data uses
    let month = YearMonth::new(9998, 2).unwrap();

    let late = store
        .create(new_event("9998-02-28", "Late", EventType::Inspection))
        .await
        .unwrap();
    let early = store
        .create(new_event("9998-02-01", "Early", EventType::Visit))
        .await
        .unwrap();
    let ghost = store
        .create(new_event("9998-02-29", "Ghost", EventType::Task))
        .await
        .unwrap();
    let next_month = store
        .create(new_event("9998-03-01", "March", EventType::Task))
        .await
        .unwrap();

    let listed = store.list_month(month).await.unwrap();
    let ids: Vec<&str> = listed.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec![early.id.as_str(), late.id.as_str()]);
    assert_eq!(listed[1], late);

    let deleted = store.delete(&late.id).await.unwrap();
    assert_eq!(deleted, Some(late.clone()));
    assert!(store.delete(&late.id).await.unwrap().is_none());
    assert!(store.delete("no-such-event").await.unwrap().is_none());

    let listed = store.list_month(month).await.unwrap();
    assert_eq!(listed, vec![early.clone()]);

    for id in [&early.id, &ghost.id, &next_month.id] {
        assert!(store.delete(id).await.unwrap().is_some());
    }
    assert!(store.list_month(month).await.unwrap().is_empty());
}

mod common;

use agenda::store::InMemoryStore;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

/// Smoke test for the health endpoint
#[tokio::test]
async fn test_health() {
    let app = common::test_router(Arc::new(InMemoryStore::new()), Some("s3cret"));
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"OK");
}

/// Unknown GET paths serve the calendar page, even when the API is unreachable
#[tokio::test]
async fn test_fallback_serves_calendar_page() {
    let app = common::test_router(Arc::new(InMemoryStore::new()), None);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/some/client/route?month=3&year=2024")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("março de 2024"));
    assert!(html.contains(r#"class="error""#));
}

/// Non-GET requests to unknown paths are not pages
#[tokio::test]
async fn test_fallback_rejects_other_methods() {
    let app = common::test_router(Arc::new(InMemoryStore::new()), None);
    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/nowhere")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

use agenda::client::EventsClient;
use agenda::server::build_router;
use agenda::state::AppState;
use agenda::store::InMemoryStore;
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Router over an in-memory store, for in-process requests
pub fn test_router(store: Arc<InMemoryStore>, secret: Option<&str>) -> Router {
    // Nothing listens here; pages rendered through this router fail to load
    let client = EventsClient::new("http://127.0.0.1:9", secret.map(str::to_string)).unwrap();
    let state = AppState::new(store, secret.map(str::to_string), client, "pt-BR");
    build_router(state, Path::new("public"))
}

/// A running server on an ephemeral port whose page talks to its own API
pub struct TestServer {
    pub base_url: String,
    pub store: Arc<InMemoryStore>,
}

pub async fn spawn_server(secret: Option<&str>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let store = Arc::new(InMemoryStore::new());
    let client = EventsClient::new(&base_url, secret.map(str::to_string)).unwrap();
    let state = AppState::new(store.clone(), secret.map(str::to_string), client, "pt-BR");
    let app = build_router(state, Path::new("public"));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer { base_url, store }
}

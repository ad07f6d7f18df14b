use crate::client::EventsClient;
use crate::store::EventStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Event persistence
    pub store: Arc<dyn EventStore>,
    /// Bearer secret required on every guarded route; no auth when `None`
    pub secret_key: Option<Arc<str>>,
    /// Client the calendar page uses to reach the API
    pub client: EventsClient,
    /// Locale of the calendar page
    pub locale: Arc<str>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn EventStore>,
        secret_key: Option<String>,
        client: EventsClient,
        locale: &str,
    ) -> Self {
        Self {
            store,
            secret_key: secret_key.map(Arc::from),
            client,
            locale: Arc::from(locale),
        }
    }
}

use crate::client::EventsClient;
use crate::config::Config;
use crate::error::{config_error, Error};
use crate::server::build_router;
use crate::shutdown;
use crate::state::AppState;
use crate::store::{EventStore, InMemoryStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| config_error(&format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Open the configured event store
pub async fn open_store(config: &Config) -> miette::Result<Arc<dyn EventStore>> {
    match &config.redis_url {
        #[cfg(feature = "redis-store")]
        Some(url) => {
            let store = crate::store::RedisStore::connect(url).await?;
            info!("Connected to Redis successfully");
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "redis-store"))]
        Some(_) => Err(config_error("REDIS_URL is set but the redis-store feature is disabled").into()),
        None => {
            warn!("REDIS_URL not set, events are kept in memory and lost on restart");
            Ok(Arc::new(InMemoryStore::new()))
        }
    }
}

/// Build the app and serve it until a shutdown signal arrives
pub async fn start_server(config: Config) -> miette::Result<()> {
    let store = open_store(&config).await?;
    let client = EventsClient::new(&config.api_base_url, config.secret_key.clone())?;

    info!(
        "Store backend: {}, API auth: {}, locale: {}",
        store.backend(),
        if config.auth_enabled() { "enabled" } else { "disabled" },
        config.locale
    );

    let state = AppState::new(store, config.secret_key.clone(), client, &config.locale);
    let app = build_router(state, &config.public_dir);

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port)
        .parse()
        .map_err(|e| config_error(&format!("Invalid bind address: {}", e)))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(Error::from)?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await
        .map_err(Error::from)?;

    info!("Server stopped");
    Ok(())
}

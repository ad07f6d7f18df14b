use agenda::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting agenda server");

    // Load configuration
    let config = startup::load_config()?;

    // Serve the API and the calendar page
    startup::start_server(config).await
}

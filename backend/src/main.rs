use anyhow::Result;
use subscription_calendar::config::ServerConfig;
use subscription_calendar::{create_router, initialize_backend};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::load()?;

    // Initialize logging; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Loaded configuration: {:?}", config);

    let app_state = initialize_backend(&config);
    let app = create_router(app_state, &config)?;

    let addr = config.socket_addr()?;
    info!("🌐 Starting subscription calendar server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

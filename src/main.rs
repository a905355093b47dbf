use booking_engine::api::{AppState, create_router};
use booking_engine::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_dir =
        std::env::var("BOOKING_CONFIG_DIR").unwrap_or_else(|_| "./config/default".to_string());
    let config = ConfigLoader::load(&config_dir)?;
    let bind_address = config.settings().server.bind_address.clone();
    info!(
        config_dir = %config_dir,
        business_count = config.businesses().len(),
        "Configuration loaded"
    );

    let router = create_router(AppState::from_config(config));
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!(address = %bind_address, "Booking server listening");

    axum::serve(listener, router).await?;
    Ok(())
}

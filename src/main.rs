use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shift_payroll::api::{create_router, AppState};
use shift_payroll::config::{ConfigLoader, Settings, DEFAULT_LOG_FILTER};
use shift_payroll::storage::InMemoryStore;
use shift_payroll::weather::{OpenWeatherClient, WeatherService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env();
    let config = ConfigLoader::load(&settings.config_dir).with_context(|| {
        format!(
            "failed to load configuration from {}",
            settings.config_dir.display()
        )
    })?;
    info!(config_dir = %settings.config_dir.display(), "Loaded configuration");

    let mut state = AppState::new(config, Arc::new(InMemoryStore::new()));

    match &settings.weather_api_key {
        Some(api_key) => {
            let weather_config = state.config().weather().clone();
            let client = OpenWeatherClient::new(api_key.clone(), &weather_config)?;
            let service = WeatherService::new(Arc::new(client), weather_config)?;
            state = state.with_weather(service);
            info!("Weather forecasts enabled");
        }
        None => warn!("WEATHER_API_KEY is not set; weather endpoints will return 503"),
    }

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_addr))?;
    info!("Listening on {}", settings.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

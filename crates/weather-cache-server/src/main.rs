//! Weather Cache Server - two-tier weather cache over HTTP
//!
//! Serves current observations and forecasts per city from an in-process cache
//! backed by Redis, filling misses for known cities from OpenWeather.

mod cities;
mod config;
mod error;
mod server;
mod types;

use crate::config::{Config, StoreBackend};
use crate::error::Result;
use crate::server::{start_server, ServerState, SharedState};
use openweather_client::OpenWeatherClient;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};
use weather_cache::{MemoryStore, WeatherCache};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter =
        EnvFilter::from_default_env().add_directive("weather_cache_server=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    info!("Starting weather cache server...");

    let config = Config::from_env()?;
    info!("Port: {}", config.port);
    info!("Store backend: {:?}", config.store_backend);
    info!(
        "Local TTL: {}s, observation TTL: {}s, forecast TTL: {}s",
        config.cache.local_ttl.as_secs(),
        config.cache.observation_ttl.as_secs(),
        config.cache.forecast_ttl.as_secs()
    );

    let cache = match config.store_backend {
        StoreBackend::Redis => WeatherCache::connect(&config.redis_url, config.cache.clone()).await?,
        StoreBackend::Memory => {
            warn!("Using in-memory durable store; cached weather is lost on restart");
            WeatherCache::new(Box::new(MemoryStore::new()), config.cache.clone())?
        }
    };

    let upstream = match config.openweather_api_key.as_deref() {
        Some(key) => Some(OpenWeatherClient::with_base_url(
            key,
            &config.openweather_base_url,
        )?),
        None => {
            info!("OPENWEATHER_API_KEY not set; serving cached data only");
            None
        }
    };

    let state: SharedState = Arc::new(ServerState::new(cache, upstream));

    // Runs until ctrl-c, then drains in-flight requests
    start_server(state.clone(), config.port).await?;

    // Close through the shared handle; no ownership is needed
    state.cache.close().await?;

    info!("Weather cache server stopped");
    Ok(())
}

//! HTTP server for weather cache endpoints
//!
//! Provides /health, /cities, /weather/{city} and /forecast/{city}.

use crate::cities;
use crate::types::{CitiesResponse, HealthResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use openweather_client::{OpenWeatherClient, OpenWeatherError};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};
use weather_cache::{ForecastSeries, WeatherCache, WeatherCacheError, WeatherObservation};

/// Shared state for the HTTP server
pub struct ServerState {
    pub cache: WeatherCache,
    /// Fills cache misses for known cities; `None` serves cached data only
    pub upstream: Option<OpenWeatherClient>,
    pub started_at: DateTime<Utc>,
}

impl ServerState {
    pub fn new(cache: WeatherCache, upstream: Option<OpenWeatherClient>) -> Self {
        Self {
            cache,
            upstream,
            started_at: Utc::now(),
        }
    }
}

pub type SharedState = Arc<ServerState>;

/// Error response
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Create the HTTP router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/cities", get(list_cities))
        .route("/weather/{city}", get(get_weather).put(put_weather))
        .route("/forecast/{city}", get(get_forecast).put(put_forecast))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server, returning once a shutdown signal has drained it
pub async fn start_server(state: SharedState, port: u16) -> std::io::Result<()> {
    let router = create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

/// Health check endpoint
async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let uptime_secs = (Utc::now() - state.started_at).num_seconds() as u64;

    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs,
        cache: state.cache.cache_stats(),
    })
}

async fn list_cities() -> Json<CitiesResponse> {
    Json(CitiesResponse {
        cities: cities::names(),
    })
}

/// Current observation, filled from upstream on a miss
async fn get_weather(State(state): State<SharedState>, Path(city): Path<String>) -> Response {
    match state.cache.get_observation(&city).await {
        Ok(obs) => Json(obs).into_response(),
        Err(e) if e.is_not_found() => match fill_observation(&state, &city).await {
            Ok(Some(obs)) => Json(obs).into_response(),
            Ok(None) => error_response(StatusCode::NOT_FOUND, "Weather data not found"),
            Err(e) => {
                warn!(city = %city, error = %e, "Upstream weather fetch failed");
                error_response(StatusCode::BAD_GATEWAY, "Weather data not available")
            }
        },
        Err(e) => {
            error!(city = %city, error = %e, "Weather lookup failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Weather lookup failed")
        }
    }
}

async fn put_weather(
    State(state): State<SharedState>,
    Path(city): Path<String>,
    Json(obs): Json<WeatherObservation>,
) -> Response {
    if obs.city != city {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Observation city does not match path",
        );
    }

    match state.cache.put_observation(obs).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => write_failure(&city, &e),
    }
}

/// Forecast series, filled from upstream on a miss
async fn get_forecast(State(state): State<SharedState>, Path(city): Path<String>) -> Response {
    match state.cache.get_forecast(&city).await {
        Ok(series) => Json(series).into_response(),
        Err(e) if e.is_not_found() => match fill_forecast(&state, &city).await {
            Ok(Some(series)) => Json(series).into_response(),
            Ok(None) => error_response(StatusCode::NOT_FOUND, "Forecast not found"),
            Err(e) => {
                warn!(city = %city, error = %e, "Upstream forecast fetch failed");
                error_response(StatusCode::BAD_GATEWAY, "Forecast data not available")
            }
        },
        Err(e @ WeatherCacheError::DecodingFailed(_)) => {
            error!(city = %city, error = %e, "Cached forecast is unreadable");
            error_response(StatusCode::BAD_GATEWAY, "Cached forecast is unreadable")
        }
        Err(e) => {
            error!(city = %city, error = %e, "Forecast lookup failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Forecast lookup failed")
        }
    }
}

async fn put_forecast(
    State(state): State<SharedState>,
    Path(city): Path<String>,
    Json(series): Json<ForecastSeries>,
) -> Response {
    match state.cache.put_forecast(&city, &series).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => write_failure(&city, &e),
    }
}

fn write_failure(city: &str, e: &WeatherCacheError) -> Response {
    match e {
        WeatherCacheError::EncodingFailed(_) => {
            warn!(city, error = %e, "Rejected unencodable record");
            error_response(StatusCode::UNPROCESSABLE_ENTITY, "Record could not be encoded")
        }
        WeatherCacheError::StoreWriteFailed(_) => {
            error!(city, error = %e, "Durable store write failed");
            error_response(StatusCode::SERVICE_UNAVAILABLE, "Durable store write failed")
        }
        _ => {
            error!(city, error = %e, "Cache write failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Cache write failed")
        }
    }
}

/// Fetch current weather for a known city and write it through the cache.
/// `Ok(None)` when the city is unknown or no upstream is configured.
async fn fill_observation(
    state: &ServerState,
    city: &str,
) -> Result<Option<WeatherObservation>, OpenWeatherError> {
    let (Some(upstream), Some(known)) = (state.upstream.as_ref(), cities::lookup(city)) else {
        return Ok(None);
    };

    let obs = upstream
        .current(city, known.latitude, known.longitude)
        .await?;
    if let Err(e) = state.cache.put_observation(obs.clone()).await {
        // The local tier already holds it; serve the fetched value anyway
        warn!(city, error = %e, "Failed to cache fetched observation");
    }
    Ok(Some(obs))
}

async fn fill_forecast(
    state: &ServerState,
    city: &str,
) -> Result<Option<ForecastSeries>, OpenWeatherError> {
    let (Some(upstream), Some(known)) = (state.upstream.as_ref(), cities::lookup(city)) else {
        return Ok(None);
    };

    let series = upstream
        .forecast(city, known.latitude, known.longitude)
        .await?;
    if let Err(e) = state.cache.put_forecast(city, &series).await {
        warn!(city, error = %e, "Failed to cache fetched forecast");
    }
    Ok(Some(series))
}

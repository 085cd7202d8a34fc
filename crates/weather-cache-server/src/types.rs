//! Response bodies for the weather cache server

use serde::Serialize;
use weather_cache::CacheStats;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
    pub cache: CacheStats,
}

#[derive(Debug, Serialize)]
pub struct CitiesResponse {
    pub cities: Vec<&'static str>,
}

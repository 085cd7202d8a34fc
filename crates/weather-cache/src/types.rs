//! Cached record types

use serde::{Deserialize, Serialize};

/// Current weather for one city.
///
/// The city name doubles as the cache key. A newer observation for the same
/// city replaces the previous one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub city: String,
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: i32,
    /// Metres per second
    pub wind_speed: f64,
    pub description: String,
    pub icon: String,
    /// Capture time, Unix seconds
    pub timestamp: i64,
}

/// Multi-period forecast for one city, ordered by period.
pub type ForecastSeries = Vec<WeatherObservation>;

/// Statistics about the local cache tier
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
    pub hits: u64,
    pub misses: u64,
}

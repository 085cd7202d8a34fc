//! Cache tier lifetimes and limits

use crate::error::{Result, WeatherCacheError};
use std::time::Duration;

/// Configuration for [`WeatherCache`](crate::WeatherCache)
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Lifetime of a local-tier entry, from insertion
    pub local_ttl: Duration,
    /// Optional size bound for the local tier. `None` leaves expiry to the
    /// TTL alone; with a bound, moka may drop or refuse entries early.
    pub local_max_entries: Option<u64>,
    /// Durable-store TTL for current observations
    pub observation_ttl: Duration,
    /// Durable-store TTL for forecast series
    pub forecast_ttl: Duration,
    /// Deadline applied to every durable-store call
    pub store_timeout: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            local_ttl: Duration::from_secs(5 * 60),
            local_max_entries: None,
            observation_ttl: Duration::from_secs(30 * 60),
            forecast_ttl: Duration::from_secs(3 * 60 * 60),
            store_timeout: Duration::from_secs(2),
        }
    }
}

impl CacheConfig {
    /// The local tier must always expire before the durable record it shadows.
    pub fn validate(&self) -> Result<()> {
        if self.local_ttl.is_zero() {
            return Err(WeatherCacheError::Config(
                "local cache TTL must be non-zero".to_string(),
            ));
        }
        if self.local_max_entries == Some(0) {
            return Err(WeatherCacheError::Config(
                "local cache size bound must be non-zero".to_string(),
            ));
        }
        if self.store_timeout.is_zero() {
            return Err(WeatherCacheError::Config(
                "store timeout must be non-zero".to_string(),
            ));
        }
        if self.local_ttl >= self.observation_ttl {
            return Err(WeatherCacheError::Config(format!(
                "local cache TTL ({:?}) must be shorter than observation TTL ({:?})",
                self.local_ttl, self.observation_ttl
            )));
        }
        if self.local_ttl >= self.forecast_ttl {
            return Err(WeatherCacheError::Config(format!(
                "local cache TTL ({:?}) must be shorter than forecast TTL ({:?})",
                self.local_ttl, self.forecast_ttl
            )));
        }
        Ok(())
    }
}

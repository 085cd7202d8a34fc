//! Two-tier weather cache
//!
//! Reads go local tier first, then the durable store; a durable hit is copied
//! into the local tier. Observation writes go to both tiers, forecasts only to
//! the durable store. Expiry is the only invalidation.

use crate::codec;
use crate::config::CacheConfig;
use crate::error::{Result, StoreError, WeatherCacheError};
use crate::keys::{forecast_key, observation_key};
use crate::store::{DurableStore, RedisStore, StoreResult};
use crate::types::{CacheStats, ForecastSeries, WeatherObservation};
use moka::future::Cache;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, trace};

/// Weather cache over a process-local tier and a durable store.
///
/// Safe to share across tasks; every operation takes `&self`. Concurrent writes
/// to the same city are not serialized, so the two tiers can briefly disagree.
pub struct WeatherCache {
    local: Cache<String, WeatherObservation>,
    store: Box<dyn DurableStore>,
    config: CacheConfig,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl WeatherCache {
    /// Build a cache over an already-connected store
    pub fn new(store: Box<dyn DurableStore>, config: CacheConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Cache::builder().time_to_live(config.local_ttl);
        if let Some(max_entries) = config.local_max_entries {
            builder = builder.max_capacity(max_entries);
        }
        let local = builder.build();

        Ok(Self {
            local,
            store,
            config,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    /// Connect to Redis and build a cache over it
    pub async fn connect(redis_url: &str, config: CacheConfig) -> Result<Self> {
        config.validate()?;
        let store = RedisStore::connect(redis_url)
            .await
            .map_err(WeatherCacheError::StoreUnavailable)?;
        Self::new(Box::new(store), config)
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            entries: self.local.entry_count(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Current observation for `city`.
    ///
    /// A store record that fails to decode is reported as `NotFound`, same as a
    /// missing one.
    pub async fn get_observation(&self, city: &str) -> Result<WeatherObservation> {
        if let Some(obs) = self.local.get(city).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(city, "Local cache hit");
            return Ok(obs);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let key = observation_key(city);
        let fetched = self.with_deadline(self.store.get(&key)).await;
        let bytes = match fetched {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!(key = %key, "Durable store miss");
                return Err(WeatherCacheError::NotFound { key });
            }
            Err(e) => {
                debug!(key = %key, error = %e, "Durable store read failed");
                return Err(WeatherCacheError::NotFound { key });
            }
        };

        match codec::decode_observation(&bytes) {
            Ok(obs) => {
                self.local.insert(city.to_string(), obs.clone()).await;
                debug!(key = %key, "Populated local cache from durable store");
                Ok(obs)
            }
            Err(e) => {
                debug!(key = %key, error = %e, "Undecodable observation treated as miss");
                Err(WeatherCacheError::NotFound { key })
            }
        }
    }

    /// Store `obs` in both tiers.
    ///
    /// The local tier is written first and kept even when encoding or the
    /// durable write fails.
    pub async fn put_observation(&self, obs: WeatherObservation) -> Result<()> {
        let key = observation_key(&obs.city);
        self.local.insert(obs.city.clone(), obs.clone()).await;

        let bytes = codec::encode_observation(&obs).map_err(WeatherCacheError::EncodingFailed)?;

        self.with_deadline(self.store.set(&key, bytes, self.config.observation_ttl))
            .await
            .map_err(WeatherCacheError::StoreWriteFailed)?;
        debug!(key = %key, "Stored observation");
        Ok(())
    }

    /// Forecast series for `city`, read straight from the durable store
    pub async fn get_forecast(&self, city: &str) -> Result<ForecastSeries> {
        let key = forecast_key(city);
        let fetched = self.with_deadline(self.store.get(&key)).await;
        let bytes = match fetched {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Err(WeatherCacheError::NotFound { key }),
            Err(e) => {
                debug!(key = %key, error = %e, "Durable store read failed");
                return Err(WeatherCacheError::NotFound { key });
            }
        };

        codec::decode_forecast(&bytes).map_err(WeatherCacheError::DecodingFailed)
    }

    pub async fn put_forecast(&self, city: &str, series: &[WeatherObservation]) -> Result<()> {
        let key = forecast_key(city);
        let bytes = codec::encode_forecast(series).map_err(WeatherCacheError::EncodingFailed)?;

        self.with_deadline(self.store.set(&key, bytes, self.config.forecast_ttl))
            .await
            .map_err(WeatherCacheError::StoreWriteFailed)?;
        debug!(key = %key, periods = series.len(), "Stored forecast");
        Ok(())
    }

    /// Close the durable store connection while the cache is still shared.
    ///
    /// Later durable-store calls fail: reads report `NotFound`, writes
    /// `StoreWriteFailed`. Closing twice returns `StoreUnavailable`.
    pub async fn close(&self) -> Result<()> {
        self.store
            .close()
            .await
            .map_err(WeatherCacheError::StoreUnavailable)?;
        info!("Weather cache store closed");
        Ok(())
    }

    /// Close the durable store connection and drop both tiers
    pub async fn shutdown(self) -> Result<()> {
        self.close().await
    }

    /// Bound a store call by the configured deadline. The pending call is
    /// dropped, and so cancelled, when the deadline passes.
    async fn with_deadline<T>(&self, call: impl Future<Output = StoreResult<T>>) -> StoreResult<T> {
        let timeout = self.config.store_timeout;
        match tokio::time::timeout(timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(timeout)),
        }
    }
}

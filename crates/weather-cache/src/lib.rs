//! Two-tier weather cache
//!
//! Current observations and forecast series keyed by city name. Reads are
//! served from a short-lived in-process [moka] cache when possible and fall back
//! to a durable key-value store (Redis) holding longer-lived JSON records.
//!
//! | record | local tier | durable key | durable TTL |
//! |---|---|---|---|
//! | observation | 5 min | `weather:<city>` | 30 min |
//! | forecast | none | `forecast:<city>` | 3 h |

mod codec;
mod config;
mod error;
mod keys;
mod service;
mod store;
mod types;

pub use config::CacheConfig;
pub use error::{CodecError, Result, StoreError, WeatherCacheError};
pub use keys::{forecast_key, observation_key};
pub use service::WeatherCache;
pub use store::{DurableStore, MemoryStore, RedisStore, StoreResult};
pub use types::{CacheStats, ForecastSeries, WeatherObservation};

use crate::error::{Result, ServerError};
use std::env;
use std::time::Duration;
use weather_cache::CacheConfig;

/// Which durable store backs the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    /// In-process only; records do not survive a restart
    Memory,
}

/// Server configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub store_backend: StoreBackend,
    pub redis_url: String,
    pub cache: CacheConfig,
    pub openweather_api_key: Option<String>,
    pub openweather_base_url: String,
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let number = |name: &str, default: u64| -> u64 {
            var(name)
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(default)
        };

        let port = var("PORT")
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(3005);

        let store_backend = match var("STORE_BACKEND").as_deref() {
            None | Some("redis") => StoreBackend::Redis,
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(ServerError::Config(format!(
                    "unknown STORE_BACKEND {other:?} (expected \"redis\" or \"memory\")"
                )))
            }
        };

        let redis_url =
            var("REDIS_URL").unwrap_or_else(|| "redis://127.0.0.1:6379".to_string());

        let defaults = CacheConfig::default();
        let cache = CacheConfig {
            local_ttl: Duration::from_secs(number(
                "LOCAL_CACHE_TTL_SECS",
                defaults.local_ttl.as_secs(),
            )),
            local_max_entries: var("LOCAL_CACHE_MAX_ENTRIES")
                .and_then(|s| s.parse::<u64>().ok())
                .or(defaults.local_max_entries),
            observation_ttl: Duration::from_secs(number(
                "OBSERVATION_TTL_SECS",
                defaults.observation_ttl.as_secs(),
            )),
            forecast_ttl: Duration::from_secs(number(
                "FORECAST_TTL_SECS",
                defaults.forecast_ttl.as_secs(),
            )),
            store_timeout: Duration::from_millis(number(
                "STORE_TIMEOUT_MS",
                defaults.store_timeout.as_millis() as u64,
            )),
        };
        cache.validate()?;

        let openweather_api_key = var("OPENWEATHER_API_KEY").filter(|k| !k.is_empty());
        let openweather_base_url = var("OPENWEATHER_BASE_URL")
            .unwrap_or_else(|| "https://api.openweathermap.org".to_string());

        Ok(Self {
            port,
            store_backend,
            redis_url,
            cache,
            openweather_api_key,
            openweather_base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 3005);
        assert_eq!(config.store_backend, StoreBackend::Redis);
        assert_eq!(config.redis_url, "redis://127.0.0.1:6379");
        assert_eq!(config.cache.local_ttl, Duration::from_secs(300));
        assert_eq!(config.cache.observation_ttl, Duration::from_secs(1800));
        assert_eq!(config.cache.forecast_ttl, Duration::from_secs(10_800));
        assert_eq!(config.cache.store_timeout, Duration::from_millis(2000));
        assert_eq!(config.cache.local_max_entries, None);
        assert!(config.openweather_api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("STORE_BACKEND", "memory"),
            ("LOCAL_CACHE_TTL_SECS", "60"),
            ("STORE_TIMEOUT_MS", "500"),
            ("LOCAL_CACHE_MAX_ENTRIES", "2000"),
            ("OPENWEATHER_API_KEY", "secret"),
        ])
        .unwrap();

        assert_eq!(config.cache.local_max_entries, Some(2000));
        assert_eq!(config.port, 8080);
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.cache.local_ttl, Duration::from_secs(60));
        assert_eq!(config.cache.store_timeout, Duration::from_millis(500));
        assert_eq!(config.openweather_api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_unparseable_numbers_fall_back_to_defaults() {
        let config = config_from(&[("PORT", "eighty"), ("FORECAST_TTL_SECS", "-1")]).unwrap();
        assert_eq!(config.port, 3005);
        assert_eq!(config.cache.forecast_ttl, Duration::from_secs(10_800));
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let err = config_from(&[("STORE_BACKEND", "memcached")]).unwrap_err();
        assert!(err.to_string().contains("memcached"));
    }

    #[test]
    fn test_local_ttl_longer_than_durable_rejected() {
        let err = config_from(&[("LOCAL_CACHE_TTL_SECS", "3600")]).unwrap_err();
        assert!(matches!(err, ServerError::Cache(_)));
    }

    #[test]
    fn test_empty_api_key_ignored() {
        let config = config_from(&[("OPENWEATHER_API_KEY", "")]).unwrap();
        assert!(config.openweather_api_key.is_none());
    }
}

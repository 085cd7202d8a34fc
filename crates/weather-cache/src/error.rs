//! Error types for the weather cache

use std::fmt;
use std::time::Duration;

/// Errors from the durable store tier
#[derive(Debug)]
pub enum StoreError {
    Redis(redis::RedisError),
    /// The call did not complete within the configured deadline
    Timeout(Duration),
    /// The store was closed and no longer accepts calls
    Closed,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redis(e) => write!(f, "Redis error: {e}"),
            Self::Timeout(d) => write!(f, "Store call timed out after {}ms", d.as_millis()),
            Self::Closed => write!(f, "Store is closed"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Redis(e) => Some(e),
            _ => None,
        }
    }
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        Self::Redis(err)
    }
}

/// Errors converting records to and from their stored bytes
#[derive(Debug)]
pub enum CodecError {
    Json(serde_json::Error),
    NonFinite { field: &'static str },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::NonFinite { field } => write!(f, "Field {field} is not a finite number"),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::NonFinite { .. } => None,
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Errors returned by [`WeatherCache`](crate::WeatherCache)
#[derive(Debug)]
pub enum WeatherCacheError {
    /// Neither tier holds a usable value for the key
    NotFound { key: String },
    /// The record could not be serialized; the durable store was not touched
    EncodingFailed(CodecError),
    /// Durable store bytes could not be deserialized
    DecodingFailed(CodecError),
    StoreWriteFailed(StoreError),
    /// Invalid cache configuration
    Config(String),
    /// The durable store could not be connected or closed
    StoreUnavailable(StoreError),
}

impl WeatherCacheError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl fmt::Display for WeatherCacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { key } => write!(f, "No cached value for {key}"),
            Self::EncodingFailed(e) => write!(f, "Encoding failed: {e}"),
            Self::DecodingFailed(e) => write!(f, "Decoding failed: {e}"),
            Self::StoreWriteFailed(e) => write!(f, "Store write failed: {e}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::StoreUnavailable(e) => write!(f, "Store unavailable: {e}"),
        }
    }
}

impl std::error::Error for WeatherCacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EncodingFailed(e) | Self::DecodingFailed(e) => Some(e),
            Self::StoreWriteFailed(e) | Self::StoreUnavailable(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, WeatherCacheError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_not_found_display() {
        let err = WeatherCacheError::NotFound {
            key: "weather:Peja".to_string(),
        };
        assert_eq!(format!("{}", err), "No cached value for weather:Peja");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_store_write_failed_has_source() {
        let err = WeatherCacheError::StoreWriteFailed(StoreError::Timeout(
            Duration::from_millis(250),
        ));
        assert_eq!(
            format!("{}", err),
            "Store write failed: Store call timed out after 250ms"
        );
        assert!(err.source().is_some());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_encoding_failed_display() {
        let err = WeatherCacheError::EncodingFailed(CodecError::NonFinite {
            field: "temperature",
        });
        assert_eq!(
            format!("{}", err),
            "Encoding failed: Field temperature is not a finite number"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = WeatherCacheError::Config("local TTL too long".to_string());
        assert_eq!(format!("{}", err), "Configuration error: local TTL too long");
        assert!(err.source().is_none());
    }
}

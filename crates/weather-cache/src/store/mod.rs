//! Durable store tier.
//!
//! The durable store is the authoritative, longer-lived copy of every record.
//! [`RedisStore`] is the production backend and [`MemoryStore`] keeps the same
//! contract in-process.

mod memory;
mod redis;

pub use self::memory::MemoryStore;
pub use self::redis::RedisStore;

use crate::error::StoreError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Byte-oriented key-value store with per-key expiry
#[async_trait]
pub trait DurableStore: Send + Sync {
    /// Returns `None` when the key is absent or its TTL has lapsed.
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous value and TTL.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> StoreResult<()>;

    /// Releases the underlying connection. Later calls fail with
    /// [`StoreError::Closed`].
    async fn close(&self) -> StoreResult<()>;
}

#[async_trait]
impl<T: DurableStore + ?Sized> DurableStore for Arc<T> {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> StoreResult<()> {
        (**self).set(key, value, ttl).await
    }

    async fn close(&self) -> StoreResult<()> {
        (**self).close().await
    }
}

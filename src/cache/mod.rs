//! Time-bounded key/value storage for fetched search results.
//!
//! Every backend implements [`CacheStore`]. A read yields
//! `Ok(CacheLookup::Hit)`, `Ok(CacheLookup::Miss)` for an absent or expired
//! key, or `Err(CacheError)` when the backend itself failed. Callers must
//! never fold the error case into a miss.

pub mod memory;
pub mod noop;
pub mod redis_store;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::{CacheBackend, Config};

pub use self::memory::MemoryStore;
pub use self::noop::NoopStore;
pub use self::redis_store::RedisStore;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("{backend} command failed: {source}")]
    Command {
        backend: &'static str,
        source: redis::RedisError,
    },
}

impl From<redis::RedisError> for CacheError {
    fn from(source: redis::RedisError) -> Self {
        CacheError::Command {
            backend: "redis",
            source,
        }
    }
}

/// A hit carries the stored bytes as written; decoding them is the caller's
/// job, so a malformed payload is never reported as a store failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    Hit(Vec<u8>),
    Miss,
}

#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Short backend name for logs and the health endpoint.
    fn name(&self) -> &'static str;

    async fn get(&self, key: &str) -> Result<CacheLookup, CacheError>;

    /// Stores `value` under `key`, replacing any previous entry. The entry
    /// stops being readable once `ttl` has elapsed.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;
}

pub async fn build_store(config: &Config) -> Result<Arc<dyn CacheStore>, CacheError> {
    let store: Arc<dyn CacheStore> = match config.cache_backend {
        CacheBackend::Redis => Arc::new(RedisStore::connect(&config.redis_url()).await?),
        CacheBackend::Memory => Arc::new(MemoryStore::new(config.memory_cache_capacity)),
        CacheBackend::None => Arc::new(NoopStore),
    };

    tracing::info!(backend = store.name(), "Cache store ready");
    Ok(store)
}

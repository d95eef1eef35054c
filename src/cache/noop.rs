use async_trait::async_trait;
use std::time::Duration;

use super::{CacheError, CacheLookup, CacheStore};

/// Store that never holds anything: every read misses, every write succeeds.
pub struct NoopStore;

#[async_trait]
impl CacheStore for NoopStore {
    fn name(&self) -> &'static str {
        "none"
    }

    async fn get(&self, _key: &str) -> Result<CacheLookup, CacheError> {
        Ok(CacheLookup::Miss)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
        Ok(())
    }
}

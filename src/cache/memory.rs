use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;
use std::time::{Duration, Instant};

use super::{CacheError, CacheLookup, CacheStore};

#[derive(Clone, Debug)]
struct CachedPayload {
    payload: String,
    ttl: Duration,
}

/// Expires each entry after the TTL it was written with.
struct WriteTtl;

impl Expiry<String, CachedPayload> for WriteTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedPayload,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedPayload,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-process store backed by moka. Never fails.
pub struct MemoryStore {
    entries: Cache<String, CachedPayload>,
}

impl MemoryStore {
    pub fn new(max_capacity: u64) -> Self {
        let entries = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(WriteTtl)
            .build();

        Self { entries }
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<CacheLookup, CacheError> {
        Ok(match self.entries.get(key).await {
            Some(entry) => CacheLookup::Hit(entry.payload.into_bytes()),
            None => CacheLookup::Miss,
        })
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        self.entries
            .insert(
                key.to_string(),
                CachedPayload {
                    payload: value.to_string(),
                    ttl,
                },
            )
            .await;
        Ok(())
    }
}

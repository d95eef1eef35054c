use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::time::Duration;

use super::{CacheError, CacheLookup, CacheStore};

/// Redis-backed store sharing one multiplexed connection.
///
/// `ConnectionManager` is cheap to clone and reconnects on its own, so each
/// call works on a clone instead of taking a lock.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        tracing::info!(url, "Connected to Redis");
        Ok(Self { conn })
    }
}

/// PSETEX rejects a zero expiry.
fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

#[async_trait]
impl CacheStore for RedisStore {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> Result<CacheLookup, CacheError> {
        let mut conn = self.conn.clone();
        let value: Option<Vec<u8>> = conn.get(key).await?;
        Ok(value.map_or(CacheLookup::Miss, CacheLookup::Hit))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        conn.pset_ex::<_, _, ()>(key, value, ttl_millis(ttl)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_millis() {
        assert_eq!(ttl_millis(Duration::from_secs(15)), 15_000);
        assert_eq!(ttl_millis(Duration::ZERO), 1);
    }

    #[tokio::test]
    async fn test_connect_rejects_malformed_url() {
        let result = RedisStore::connect("not-a-redis-url").await;
        assert!(matches!(
            result,
            Err(CacheError::Command {
                backend: "redis",
                ..
            })
        ));
    }

    // Needs a reachable server: GEOCACHE_TEST_REDIS_URL=redis://127.0.0.1:6379/15
    #[tokio::test]
    #[ignore]
    async fn test_live_redis_miss_hit_and_expiry() {
        let url = std::env::var("GEOCACHE_TEST_REDIS_URL")
            .unwrap_or_else(|_| "redis://127.0.0.1:6379/15".to_string());
        let store = RedisStore::connect(&url).await.unwrap();
        let key = format!("geocache-test-{}", std::process::id());

        assert_eq!(store.get(&key).await.unwrap(), CacheLookup::Miss);

        store
            .set(&key, "[]", Duration::from_millis(300))
            .await
            .unwrap();
        assert_eq!(
            store.get(&key).await.unwrap(),
            CacheLookup::Hit(b"[]".to_vec())
        );

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(store.get(&key).await.unwrap(), CacheLookup::Miss);
    }
}

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::cache::{CacheError, CacheLookup, CacheStore};
use crate::geocode::{GeocodeError, Geocoder, LocationResult};

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Cache unavailable: {0}")]
    CacheUnavailable(#[from] CacheError),
    #[error("Cached entry could not be decoded: {0}")]
    CacheCorrupt(#[source] serde_json::Error),
    #[error("Upstream geocoder failed: {0}")]
    Upstream(#[from] GeocodeError),
    #[error("Failed to encode results for caching: {0}")]
    Encoding(#[source] serde_json::Error),
    #[error("Lookup did not finish within {0:?}")]
    TimedOut(Duration),
}

/// Result of one lookup. `cache` is true only when no upstream call was made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupResponse {
    pub cache: bool,
    pub data: Vec<LocationResult>,
}

/// Read-through cache in front of a [`Geocoder`].
///
/// Holds no per-request state; one instance is shared by every request.
pub struct LookupService {
    cache: Arc<dyn CacheStore>,
    geocoder: Arc<dyn Geocoder>,
    ttl: Duration,
}

impl LookupService {
    pub fn new(cache: Arc<dyn CacheStore>, geocoder: Arc<dyn Geocoder>, ttl: Duration) -> Self {
        Self {
            cache,
            geocoder,
            ttl,
        }
    }

    pub fn cache_backend(&self) -> &'static str {
        self.cache.name()
    }

    /// Serves `query` from the cache, or fetches it upstream and caches it.
    ///
    /// The query is used verbatim as the cache key. A failing cache read is
    /// returned as an error and upstream is not consulted.
    pub async fn lookup(&self, query: &str) -> Result<LookupResponse, LookupError> {
        match self.cache.get(query).await? {
            CacheLookup::Hit(payload) => {
                let data: Vec<LocationResult> =
                    serde_json::from_slice(&payload).map_err(LookupError::CacheCorrupt)?;
                tracing::debug!(query, results = data.len(), "Cache hit");
                Ok(LookupResponse { cache: true, data })
            }
            CacheLookup::Miss => {
                tracing::debug!(query, "Cache miss");
                let data = self.geocoder.search(query).await?;
                self.store(query, &data).await?;
                Ok(LookupResponse { cache: false, data })
            }
        }
    }

    /// [`lookup`](Self::lookup) bounded by `deadline`. In-flight cache and
    /// upstream I/O is dropped when the deadline passes.
    pub async fn lookup_with_deadline(
        &self,
        query: &str,
        deadline: Duration,
    ) -> Result<LookupResponse, LookupError> {
        tokio::time::timeout(deadline, self.lookup(query))
            .await
            .map_err(|_| LookupError::TimedOut(deadline))?
    }

    /// A failed write is logged and swallowed; the caller still gets the
    /// fetched data. Only an encoding failure is returned.
    async fn store(&self, query: &str, data: &[LocationResult]) -> Result<(), LookupError> {
        let payload = serde_json::to_string(data).map_err(LookupError::Encoding)?;

        if let Err(e) = self.cache.set(query, &payload, self.ttl).await {
            tracing::error!(
                backend = self.cache.name(),
                query,
                error = %e,
                "Failed to write search results to cache"
            );
        }
        Ok(())
    }
}

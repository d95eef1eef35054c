//! Fakes for exercising the lookup path without Redis or Nominatim.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::cache::{CacheError, CacheLookup, CacheStore};
use crate::geocode::{GeocodeError, Geocoder, LocationResult};

pub struct FakeGeocoder {
    calls: AtomicUsize,
    response: Option<Vec<LocationResult>>,
    delay: Duration,
}

impl FakeGeocoder {
    pub fn returning(results: Vec<LocationResult>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            response: Some(results),
            delay: Duration::ZERO,
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            response: None,
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn search(&self, _query: &str) -> Result<Vec<LocationResult>, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.response {
            Some(results) => Ok(results.clone()),
            None => Err(GeocodeError::ApiError("HTTP 502 Bad Gateway: ".to_string())),
        }
    }
}

/// Store whose reads and/or writes fail as if Redis were down.
pub struct BrokenStore {
    reads_fail: bool,
    writes: AtomicUsize,
}

impl BrokenStore {
    pub fn unreadable() -> Self {
        Self {
            reads_fail: true,
            writes: AtomicUsize::new(0),
        }
    }

    pub fn unwritable() -> Self {
        Self {
            reads_fail: false,
            writes: AtomicUsize::new(0),
        }
    }

    pub fn write_attempts(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

fn connection_refused() -> CacheError {
    CacheError::from(redis::RedisError::from((
        redis::ErrorKind::IoError,
        "connection refused",
    )))
}

#[async_trait]
impl CacheStore for BrokenStore {
    fn name(&self) -> &'static str {
        "broken"
    }

    async fn get(&self, _key: &str) -> Result<CacheLookup, CacheError> {
        if self.reads_fail {
            Err(connection_refused())
        } else {
            Ok(CacheLookup::Miss)
        }
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Err(connection_refused())
    }
}

/// Store that answers every read with the same raw payload.
pub struct FixedStore {
    payload: Vec<u8>,
}

impl FixedStore {
    pub fn holding(payload: &[u8]) -> Self {
        Self {
            payload: payload.to_vec(),
        }
    }
}

#[async_trait]
impl CacheStore for FixedStore {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn get(&self, _key: &str) -> Result<CacheLookup, CacheError> {
        Ok(CacheLookup::Hit(self.payload.clone()))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
        Ok(())
    }
}

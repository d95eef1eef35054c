use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    Redis,
    Memory,
    None,
}

impl FromStr for CacheBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(CacheBackend::Redis),
            "memory" => Ok(CacheBackend::Memory),
            "none" | "off" => Ok(CacheBackend::None),
            other => Err(anyhow::anyhow!("Unknown cache backend: {}", other)),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub cache_backend: CacheBackend,
    pub cache_host: String,
    pub cache_port: u16,
    pub cache_db: i64,
    pub cache_ttl_seconds: u64,
    pub memory_cache_capacity: u64,
    pub listen_port: u16,
    pub upstream_base_url: String,
    pub user_agent: String,
    pub upstream_timeout_seconds: u64,
    pub lookup_timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cache_backend: CacheBackend::Redis,
            cache_host: "localhost".to_string(),
            cache_port: 6379,
            cache_db: 0,
            cache_ttl_seconds: 15,
            memory_cache_capacity: 10_000,
            listen_port: 8080,
            upstream_base_url: "https://nominatim.openstreetmap.org/search".to_string(),
            user_agent: format!("geocache-proxy/{}", env!("CARGO_PKG_VERSION")),
            upstream_timeout_seconds: 30,
            lookup_timeout_seconds: 20,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Config::default();

        Ok(Config {
            cache_backend: parse_var("CACHE_BACKEND", defaults.cache_backend)?,
            // REDIS_URL carries the host only; port and db are separate.
            cache_host: env::var("REDIS_URL")
                .ok()
                .filter(|host| !host.trim().is_empty())
                .unwrap_or(defaults.cache_host),
            cache_port: parse_var("REDIS_PORT", defaults.cache_port)?,
            cache_db: parse_var("REDIS_DB", defaults.cache_db)?,
            cache_ttl_seconds: parse_var("CACHE_TTL_SECONDS", defaults.cache_ttl_seconds)?,
            memory_cache_capacity: parse_var(
                "MEMORY_CACHE_CAPACITY",
                defaults.memory_cache_capacity,
            )?,
            listen_port: parse_var("PORT", defaults.listen_port)?,
            upstream_base_url: env::var("NOMINATIM_BASE_URL")
                .unwrap_or(defaults.upstream_base_url),
            user_agent: env::var("HTTP_USER_AGENT").unwrap_or(defaults.user_agent),
            upstream_timeout_seconds: parse_var(
                "UPSTREAM_TIMEOUT_SECONDS",
                defaults.upstream_timeout_seconds,
            )?,
            lookup_timeout_seconds: parse_var(
                "LOOKUP_TIMEOUT_SECONDS",
                defaults.lookup_timeout_seconds,
            )?,
        })
    }

    pub fn redis_url(&self) -> String {
        format!(
            "redis://{}:{}/{}",
            self.cache_host, self.cache_port, self.cache_db
        )
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.listen_port)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_seconds)
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_seconds)
    }
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} has an invalid value {:?}: {}", name, raw, e)),
        Err(_) => Ok(default),
    }
}

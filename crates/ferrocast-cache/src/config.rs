//! Cache configuration.

use std::time::Duration;

/// Fallback endpoint when no cache URL is configured.
pub const DEFAULT_CACHE_URL: &str = "redis://127.0.0.1:6379/";

/// Default time-to-live for cache entries.
pub const DEFAULT_TTL_SECS: u64 = 3600;

/// Default bound on a single cache operation.
pub const DEFAULT_OP_TIMEOUT_MS: u64 = 2000;

/// Environment-sourced configuration for the forecast cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Endpoint to connect to at startup.
    pub url: String,
    /// TTL attached to every cache write.
    pub ttl: Duration,
    /// Per-operation timeout; an elapsed get is a miss, an elapsed put is
    /// dropped.
    pub op_timeout: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_CACHE_URL.to_string(),
            ttl: Duration::from_secs(DEFAULT_TTL_SECS),
            op_timeout: Duration::from_millis(DEFAULT_OP_TIMEOUT_MS),
        }
    }
}

impl CacheConfig {
    /// Reads configuration from the process environment.
    ///
    /// The endpoint falls back through `REDISCLOUD_URL`, then `REDIS_URL`,
    /// then the default local address; `FORECAST_CACHE_TTL_SECS` overrides
    /// the entry TTL.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), with an injectable lookup so
    /// tests never touch process-global state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let url = lookup("REDISCLOUD_URL")
            .or_else(|| lookup("REDIS_URL"))
            .unwrap_or_else(|| DEFAULT_CACHE_URL.to_string());
        let ttl = lookup("FORECAST_CACHE_TTL_SECS")
            .and_then(|raw| raw.parse::<u64>().ok())
            .map_or(Duration::from_secs(DEFAULT_TTL_SECS), Duration::from_secs);
        Self { url, ttl, op_timeout: Duration::from_millis(DEFAULT_OP_TIMEOUT_MS) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_falls_back_in_order() {
        let config = CacheConfig::from_lookup(|key| match key {
            "REDISCLOUD_URL" => Some("redis://cloud:6379/".to_string()),
            "REDIS_URL" => Some("redis://secondary:6379/".to_string()),
            _ => None,
        });
        assert_eq!(config.url, "redis://cloud:6379/");

        let config = CacheConfig::from_lookup(|key| match key {
            "REDIS_URL" => Some("redis://secondary:6379/".to_string()),
            _ => None,
        });
        assert_eq!(config.url, "redis://secondary:6379/");

        let config = CacheConfig::from_lookup(|_| None);
        assert_eq!(config.url, DEFAULT_CACHE_URL);
    }

    #[test]
    fn test_ttl_override_with_fallback_on_garbage() {
        let config = CacheConfig::from_lookup(|key| match key {
            "FORECAST_CACHE_TTL_SECS" => Some("120".to_string()),
            _ => None,
        });
        assert_eq!(config.ttl, Duration::from_secs(120));

        let config = CacheConfig::from_lookup(|key| match key {
            "FORECAST_CACHE_TTL_SECS" => Some("not-a-number".to_string()),
            _ => None,
        });
        assert_eq!(config.ttl, Duration::from_secs(DEFAULT_TTL_SECS));
    }
}

//! The forecast cache client.
//!
//! Enum dispatch over three providers: a redis-backed cache, an in-process
//! memory cache (tests and cache-less single-instance deployments), and a
//! disabled state that always misses and always "succeeds". The client
//! transitions to `Disabled` at startup if the configured endpoint is
//! unreachable and stays there for the process lifetime, so per-request
//! traffic never pays repeated connection-failure overhead.

use ferrocast_core::{Forecast, SeriesId};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::codec;
use crate::config::CacheConfig;

/// Bound on the initial connection attempt.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Cache key for a `(series, horizon)` pair.
pub fn cache_key(id: &SeriesId, horizon: i64) -> String {
    format!("forecast:{}:{}", id.as_str(), horizon)
}

/// Best-effort forecast cache.
///
/// `get` never surfaces a transport error to the caller: a backend failure
/// is logged and reported as a miss. `put` is fire-and-forget. Cheap to
/// share: the redis connection manager is clonable and safe for concurrent
/// use.
pub enum ForecastCache {
    Redis(RedisCache),
    Memory(MemoryCache),
    Disabled,
}

impl ForecastCache {
    /// Connects to the configured endpoint, falling back to the disabled
    /// state (logged at WARN) when the endpoint is unreachable. Never fails.
    pub async fn connect(config: CacheConfig) -> Self {
        let client = match redis::Client::open(config.url.as_str()) {
            Ok(client) => client,
            Err(err) => {
                warn!(error = %err, "invalid cache URL; caching disabled");
                return Self::Disabled;
            }
        };
        let conn = match timeout(CONNECT_TIMEOUT, client.get_connection_manager()).await {
            Ok(Ok(conn)) => conn,
            Ok(Err(err)) => {
                warn!(error = %err, "cache endpoint unreachable; caching disabled");
                return Self::Disabled;
            }
            Err(_) => {
                warn!("cache connection timed out; caching disabled");
                return Self::Disabled;
            }
        };
        // The URL can carry credentials; log only the TTL.
        info!(ttl_secs = config.ttl.as_secs(), "connected to forecast cache");
        Self::Redis(RedisCache { conn, ttl: config.ttl, op_timeout: config.op_timeout })
    }

    /// An in-process cache with the given entry TTL.
    pub fn memory(ttl: Duration) -> Self {
        Self::Memory(MemoryCache { ttl, entries: Mutex::new(HashMap::new()) })
    }

    /// A cache that always misses and swallows every write.
    pub fn disabled() -> Self {
        Self::Disabled
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }

    /// Looks up a cached forecast. Transport errors, timeouts and
    /// undecodable entries all come back as `None`.
    pub async fn get(&self, id: &SeriesId, horizon: i64) -> Option<Forecast> {
        let key = cache_key(id, horizon);
        match self {
            Self::Disabled => None,
            Self::Memory(memory) => memory.get(&key),
            Self::Redis(redis_cache) => redis_cache.get(&key).await,
        }
    }

    /// Stores a forecast with the configured TTL. Best-effort: failures are
    /// logged and swallowed, never retried.
    pub async fn put(&self, id: &SeriesId, horizon: i64, forecast: &Forecast) {
        let key = cache_key(id, horizon);
        let payload = codec::encode(forecast.points());
        match self {
            Self::Disabled => {}
            Self::Memory(memory) => memory.put(key, payload),
            Self::Redis(redis_cache) => redis_cache.put(&key, payload).await,
        }
    }
}

/// Redis-backed provider.
pub struct RedisCache {
    conn: ConnectionManager,
    ttl: Duration,
    op_timeout: Duration,
}

impl RedisCache {
    async fn get(&self, key: &str) -> Option<Forecast> {
        let mut conn = self.conn.clone();
        let raw = match timeout(self.op_timeout, conn.get::<_, Option<String>>(key)).await {
            Ok(Ok(Some(raw))) => raw,
            Ok(Ok(None)) => return None,
            Ok(Err(err)) => {
                warn!(key = %key, error = %err, "cache read failed; treating as miss");
                return None;
            }
            Err(_) => {
                warn!(key = %key, "cache read timed out; treating as miss");
                return None;
            }
        };
        match codec::decode(&raw) {
            Ok(points) => {
                debug!(key = %key, "cache hit");
                Some(Forecast::from_points(points))
            }
            Err(err) => {
                warn!(key = %key, error = %err, "undecodable cache entry; treating as miss");
                None
            }
        }
    }

    async fn put(&self, key: &str, payload: String) {
        let mut conn = self.conn.clone();
        let write = conn.set_ex::<_, _, ()>(key, payload, self.ttl.as_secs());
        match timeout(self.op_timeout, write).await {
            Ok(Ok(())) => debug!(key = %key, "cached forecast"),
            Ok(Err(err)) => warn!(key = %key, error = %err, "cache write failed; dropped"),
            Err(_) => warn!(key = %key, "cache write timed out; dropped"),
        }
    }
}

/// In-process provider with per-entry expiry.
pub struct MemoryCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, MemoryEntry>>,
}

struct MemoryEntry {
    expires_at: Instant,
    payload: String,
}

impl MemoryCache {
    fn get(&self, key: &str) -> Option<Forecast> {
        let entries = self.entries.lock().expect("cache lock poisoned");
        let entry = entries.get(key)?;
        if entry.expires_at <= Instant::now() {
            return None;
        }
        codec::decode(&entry.payload).ok().map(Forecast::from_points)
    }

    fn put(&self, key: String, payload: String) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.insert(key, MemoryEntry { expires_at: Instant::now() + self.ttl, payload });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ferrocast_core::ForecastPoint;

    fn series(id: &str) -> SeriesId {
        SeriesId::new(id).unwrap()
    }

    fn forecast() -> Forecast {
        Forecast::from_points(vec![
            ForecastPoint { date: NaiveDate::from_ymd_opt(2023, 2, 1).unwrap(), value: 142.13 },
            ForecastPoint { date: NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(), value: 141.9 },
        ])
    }

    #[test]
    fn test_cache_key_format() {
        assert_eq!(cache_key(&series("PPI_STEEL"), 12), "forecast:PPI_STEEL:12");
    }

    #[tokio::test]
    async fn test_disabled_cache_always_misses_and_swallows_writes() {
        let cache = ForecastCache::disabled();
        assert!(!cache.is_enabled());

        cache.put(&series("PPI_STEEL"), 12, &forecast()).await;
        assert!(cache.get(&series("PPI_STEEL"), 12).await.is_none());
    }

    #[tokio::test]
    async fn test_memory_cache_round_trips_within_ttl() {
        let cache = ForecastCache::memory(Duration::from_secs(60));
        let id = series("PPI_STEEL");

        assert!(cache.get(&id, 12).await.is_none());
        cache.put(&id, 12, &forecast()).await;

        let cached = cache.get(&id, 12).await.unwrap();
        assert_eq!(cached, forecast());

        // A different horizon is a different entry.
        assert!(cache.get(&id, 6).await.is_none());
    }

    #[tokio::test]
    async fn test_memory_cache_expires_entries() {
        let cache = ForecastCache::memory(Duration::ZERO);
        let id = series("PPI_STEEL");

        cache.put(&id, 12, &forecast()).await;
        assert!(cache.get(&id, 12).await.is_none());
    }
}

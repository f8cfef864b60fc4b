//! Ferrocast Cache
//!
//! Best-effort read-through cache for served forecasts, keyed by
//! `(series, horizon)`. Caching here is a performance optimization, never a
//! correctness dependency: transport failures are logged and treated as
//! misses, writes are fire-and-forget, and an unreachable endpoint at
//! startup disables the cache for the process lifetime.

pub mod client;
pub mod codec;
pub mod config;

pub use client::{cache_key, ForecastCache};
pub use codec::{decode, encode, CodecError};
pub use config::CacheConfig;

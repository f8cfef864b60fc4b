//! Server configuration.

use std::net::SocketAddr;
use thiserror::Error;

/// Server configuration errors.
#[derive(Debug, Error)]
pub enum ServerConfigError {
    /// The process cannot run without a history store.
    #[error("DATABASE_URL not set")]
    MissingDatabaseUrl,

    #[error("invalid HOST/PORT: {0}")]
    InvalidBindAddr(String),
}

/// Environment-sourced configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Path of the SQLite history database. Required; startup fails fast
    /// without it.
    pub database_url: String,
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ServerConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), with an injectable lookup so
    /// tests never touch process-global state.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ServerConfigError> {
        let database_url = lookup("DATABASE_URL").ok_or(ServerConfigError::MissingDatabaseUrl)?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("PORT").unwrap_or_else(|| "8000".to_string());
        let bind_addr = format!("{host}:{port}")
            .parse::<SocketAddr>()
            .map_err(|err| ServerConfigError::InvalidBindAddr(err.to_string()))?;
        Ok(Self { database_url, bind_addr })
    }
}

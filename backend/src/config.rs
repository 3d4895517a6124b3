use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use shared::STORAGE_KEY;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Where the task snapshot is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Redis,
    Memory,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "redis" => Ok(StoreKind::Redis),
            "memory" => Ok(StoreKind::Memory),
            other => Err(format!("expected 'redis' or 'memory', got '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub store: StoreKind,
    pub redis_url: String,
    pub storage_key: String,
    /// Directory holding the built frontend.
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDR".to_string(), format!("{}", e)))?;

        let store = lookup("TODO_STORE")
            .unwrap_or_else(|| "redis".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("TODO_STORE".to_string(), e))?;

        let redis_url =
            lookup("REDIS_URL").unwrap_or_else(|| "redis://127.0.0.1:6379".to_string());

        let storage_key = lookup("STORAGE_KEY")
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| STORAGE_KEY.to_string());

        let static_dir = lookup("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("frontend/dist"));

        Ok(Self {
            bind_addr,
            store,
            redis_url,
            storage_key,
            static_dir,
        })
    }
}

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_DATABASE_URL: &str = "LISTINGS_DATABASE_URL";
pub const ENV_STORE_PATH: &str = "LISTINGS_STORE_PATH";
pub const ENV_API_URL: &str = "LISTINGS_API_URL";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "LISTINGS_HTTP_TIMEOUT_SECS";
pub const ENV_DB_MAX_CONNECTIONS: &str = "LISTINGS_DB_MAX_CONNECTIONS";

/// Runtime configuration, read from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite database file backing the repository
    pub database_url: String,
    /// JSON file holding the local listing collection
    pub store_path: PathBuf,
    /// Base URL of the remote listings API
    pub api_base_url: String,
    pub http_timeout: Duration,
    pub db_max_connections: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "listings.db".to_string(),
            store_path: PathBuf::from("listings.json"),
            api_base_url: "http://localhost:3000/api".to_string(),
            http_timeout: Duration::from_secs(30),
            db_max_connections: 5,
        }
    }
}

impl AppConfig {
    /// Load `.env` if present, then read overrides from the process environment
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let timeout_secs = parse_var(&lookup, ENV_HTTP_TIMEOUT_SECS)?
            .unwrap_or(defaults.http_timeout.as_secs());

        Ok(Self {
            database_url: lookup(ENV_DATABASE_URL).unwrap_or(defaults.database_url),
            store_path: lookup(ENV_STORE_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            api_base_url: lookup(ENV_API_URL).unwrap_or(defaults.api_base_url),
            http_timeout: Duration::from_secs(timeout_secs),
            db_max_connections: parse_var(&lookup, ENV_DB_MAX_CONNECTIONS)?
                .unwrap_or(defaults.db_max_connections),
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid value for {}: {:?}", key, raw)),
        None => Ok(None),
    }
}

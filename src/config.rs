// src/config.rs
use crate::catalog::SessionOptions;
use crate::disclosure::{DEFAULT_BATCH_SIZE, DEFAULT_EAGER_CARDS};
use crate::errors::{CatalogError, CatalogResult};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub bind_addr: SocketAddr,
    pub db_path: String,
    /// Backend endpoint returning the listing documents.
    pub listings_url: Option<String>,
    /// Local JSON export, used when no URL is configured.
    pub listings_file: Option<PathBuf>,
    pub fetch_timeout: Duration,
    pub batch_size: usize,
    pub eager_cards: usize,
    pub search_debounce: Duration,
    pub max_workers: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            db_path: "catalog.sqlite3".to_string(),
            listings_url: None,
            listings_file: None,
            fetch_timeout: Duration::from_secs(30),
            batch_size: DEFAULT_BATCH_SIZE,
            eager_cards: DEFAULT_EAGER_CARDS,
            search_debounce: Duration::from_millis(500),
            max_workers: 8,
        }
    }
}

impl CatalogConfig {
    /// Reads `CATALOG_*` variables, loading a `.env` file first if present.
    pub fn from_env() -> CatalogResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> CatalogResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let cfg = Self {
            bind_addr: parse_or(get("CATALOG_BIND_ADDR"), "CATALOG_BIND_ADDR", defaults.bind_addr)?,
            db_path: get("CATALOG_DB_PATH").unwrap_or(defaults.db_path),
            listings_url: get("CATALOG_LISTINGS_URL"),
            listings_file: get("CATALOG_LISTINGS_FILE").map(PathBuf::from),
            fetch_timeout: Duration::from_secs(parse_or(
                get("CATALOG_FETCH_TIMEOUT_SECS"),
                "CATALOG_FETCH_TIMEOUT_SECS",
                defaults.fetch_timeout.as_secs(),
            )?),
            batch_size: parse_or(get("CATALOG_BATCH_SIZE"), "CATALOG_BATCH_SIZE", defaults.batch_size)?,
            eager_cards: parse_or(get("CATALOG_EAGER_CARDS"), "CATALOG_EAGER_CARDS", defaults.eager_cards)?,
            search_debounce: Duration::from_millis(parse_or(
                get("CATALOG_SEARCH_DEBOUNCE_MS"),
                "CATALOG_SEARCH_DEBOUNCE_MS",
                defaults.search_debounce.as_millis() as u64,
            )?),
            max_workers: parse_or(get("CATALOG_MAX_WORKERS"), "CATALOG_MAX_WORKERS", defaults.max_workers)?,
        };

        if cfg.batch_size == 0 {
            return Err(CatalogError::Config("CATALOG_BATCH_SIZE must be at least 1".into()));
        }
        Ok(cfg)
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            batch_size: self.batch_size,
            eager_cards: self.eager_cards,
            search_debounce: self.search_debounce,
        }
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &str, default: T) -> CatalogResult<T> {
    match raw {
        Some(v) => v
            .parse()
            .map_err(|_| CatalogError::Config(format!("{key} has invalid value '{v}'"))),
        None => Ok(default),
    }
}

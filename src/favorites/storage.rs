// src/favorites/storage.rs
use crate::db::{kv, Database};
use crate::errors::{CatalogError, CatalogResult};
use std::collections::HashMap;

/// Persistent string documents addressed by key.
/// The ledger is written against this so tests can swap in memory storage.
pub trait FavoriteStorage {
    fn read(&self, key: &str) -> CatalogResult<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> CatalogResult<()>;
    fn remove(&mut self, key: &str) -> CatalogResult<()>;
}

/// SQLite-backed storage (`kv_store` table).
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    db: Database,
}

impl SqliteStorage {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl FavoriteStorage for SqliteStorage {
    fn read(&self, key: &str) -> CatalogResult<Option<String>> {
        self.db
            .with_conn(|conn| kv::get_value(conn, key))
            .map_err(|e| CatalogError::Storage(e.to_string()))
    }

    fn write(&mut self, key: &str, value: &str) -> CatalogResult<()> {
        self.db
            .with_conn(|conn| kv::put_value(conn, key, value))
            .map_err(|e| CatalogError::Storage(e.to_string()))
    }

    fn remove(&mut self, key: &str) -> CatalogResult<()> {
        self.db
            .with_conn(|conn| kv::delete_value(conn, key))
            .map_err(|e| CatalogError::Storage(e.to_string()))
    }
}

/// In-process storage for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw document, valid or not.
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl FavoriteStorage for MemoryStorage {
    fn read(&self, key: &str) -> CatalogResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> CatalogResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> CatalogResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

// src/favorites/ledger.rs
use crate::errors::CatalogResult;
use crate::favorites::storage::FavoriteStorage;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Well-known key the ledger document is stored under.
pub const FAVORITES_KEY: &str = "property-favorites";

type Listener = Box<dyn Fn(&str, bool) + Send>;

/// Handle returned by [`FavoriteLedger::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

/// Per-listing favorite flags, persisted write-through.
///
/// The persisted document is a JSON object mapping listing ids to `true`.
/// A missing id means "not a favorite".
pub struct FavoriteLedger<S: FavoriteStorage> {
    storage: S,
    key: String,
    favorites: BTreeSet<String>,
    listeners: Vec<(Subscription, Listener)>,
    next_subscription: u64,
}

impl<S: FavoriteStorage> FavoriteLedger<S> {
    /// Rehydrates from `storage` under [`FAVORITES_KEY`].
    pub fn load(storage: S) -> Self {
        Self::load_with_key(storage, FAVORITES_KEY)
    }

    /// Absent, unreadable or malformed data yields an empty ledger.
    pub fn load_with_key(storage: S, key: &str) -> Self {
        let mut ledger = Self {
            storage,
            key: key.to_string(),
            favorites: BTreeSet::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        };
        ledger.reload();
        ledger
    }

    /// Re-reads the persisted document, replacing in-memory state.
    pub fn reload(&mut self) {
        self.favorites = match self.storage.read(&self.key) {
            Ok(Some(raw)) => parse_document(&raw).unwrap_or_else(|| {
                log::warn!("Malformed favorites under '{}', starting empty", self.key);
                BTreeSet::new()
            }),
            Ok(None) => BTreeSet::new(),
            Err(e) => {
                log::warn!("Could not read favorites: {e}");
                BTreeSet::new()
            }
        };
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.favorites.iter().map(String::as_str)
    }

    /// Flips `id` and persists the whole ledger before returning.
    ///
    /// The in-memory flip is kept even when the write fails; the error is
    /// returned so the caller can surface it.
    pub fn toggle(&mut self, id: &str) -> CatalogResult<bool> {
        let now_favorite = if self.favorites.remove(id) {
            false
        } else {
            self.favorites.insert(id.to_string());
            true
        };

        for (_, listener) in &self.listeners {
            listener(id, now_favorite);
        }

        self.persist()?;
        Ok(now_favorite)
    }

    /// Removes every favorite and the persisted document.
    pub fn clear(&mut self) -> CatalogResult<()> {
        self.favorites.clear();
        self.storage.remove(&self.key)
    }

    pub fn subscribe<F>(&mut self, listener: F) -> Subscription
    where
        F: Fn(&str, bool) + Send + 'static,
    {
        let handle = Subscription(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((handle, Box::new(listener)));
        handle
    }

    pub fn unsubscribe(&mut self, handle: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(h, _)| *h != handle);
        self.listeners.len() != before
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self) -> CatalogResult<()> {
        let doc: Map<String, Value> = self
            .favorites
            .iter()
            .map(|id| (id.clone(), Value::Bool(true)))
            .collect();
        let json = Value::Object(doc).to_string();
        self.storage.write(&self.key, &json)
    }
}

/// Accepts `{"id": true, ...}` (entries with other values are ignored) and the
/// older `["id", ...]` list form.
fn parse_document(raw: &str) -> Option<BTreeSet<String>> {
    match serde_json::from_str::<Value>(raw).ok()? {
        Value::Object(map) => Some(
            map.into_iter()
                .filter(|(_, v)| *v == Value::Bool(true))
                .map(|(k, _)| k)
                .collect(),
        ),
        Value::Array(items) => items
            .into_iter()
            .map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => None,
    }
}

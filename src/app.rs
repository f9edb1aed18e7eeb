// src/app.rs
use crate::catalog::{CardSlot, CatalogQuery, CatalogView};
use crate::config::CatalogConfig;
use crate::disclosure::{DisclosureController, MountTracker};
use crate::domain::card::CardProps;
use crate::errors::{CatalogError, ServerError};
use crate::favorites::{FavoriteLedger, SqliteStorage};
use crate::query::evaluate;
use crate::store::{FileListingSource, HttpListingSource, ListingSource, ListingStore, LoadStatus};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared state behind the HTTP surface.
///
/// Requests are stateless about the disclosure window: the client echoes the
/// query and how many cards it already shows, and the window is rebuilt from that.
pub struct AppState {
    pub config: CatalogConfig,
    source: Arc<dyn ListingSource>,
    store: Mutex<ListingStore>,
    ledger: Mutex<FavoriteLedger<SqliteStorage>>,
}

/// One rendered window over the catalog.
pub struct CatalogWindow {
    pub view: CatalogView,
    pub window: DisclosureController,
}

impl AppState {
    pub fn new(
        config: CatalogConfig,
        source: Arc<dyn ListingSource>,
        ledger: FavoriteLedger<SqliteStorage>,
    ) -> Self {
        Self {
            config,
            source,
            store: Mutex::new(ListingStore::new()),
            ledger: Mutex::new(ledger),
        }
    }

    fn store(&self) -> Result<MutexGuard<'_, ListingStore>, ServerError> {
        self.store.lock().map_err(|_| ServerError::InternalError)
    }

    fn ledger(&self) -> Result<MutexGuard<'_, FavoriteLedger<SqliteStorage>>, ServerError> {
        self.ledger.lock().map_err(|_| ServerError::InternalError)
    }

    pub fn status(&self) -> Result<LoadStatus, ServerError> {
        Ok(self.store()?.status())
    }

    /// Runs one fetch unless one is already in flight. The store lock is not
    /// held while the backend is being called.
    pub fn load(&self) -> Result<bool, ServerError> {
        let ticket = match self.store()?.begin_load() {
            Some(ticket) => ticket,
            None => return Ok(false),
        };

        let result = self.source.fetch();
        Ok(self.store()?.finish_load(ticket, result))
    }

    /// First request after startup triggers the initial fetch.
    pub fn ensure_loaded(&self) -> Result<(), ServerError> {
        if self.status()? == LoadStatus::Idle {
            self.load()?;
        }
        Ok(())
    }

    /// Evaluates `query` and discloses the first `query.shown` cards (one batch
    /// when absent). Positions below the eager count render fully, the rest as
    /// placeholders that mount when revealed.
    pub fn catalog_window(
        &self,
        query: &CatalogQuery,
        now: DateTime<Utc>,
    ) -> Result<CatalogWindow, ServerError> {
        self.disclose(query, now, false)
    }

    /// The batch revealed when the sentinel after `query.shown` cards becomes
    /// visible. Only the new cards are returned.
    pub fn next_batch(
        &self,
        query: &CatalogQuery,
        now: DateTime<Utc>,
    ) -> Result<CatalogWindow, ServerError> {
        self.disclose(query, now, true)
    }

    fn disclose(
        &self,
        query: &CatalogQuery,
        now: DateTime<Utc>,
        advance: bool,
    ) -> Result<CatalogWindow, ServerError> {
        let store = self.store()?;
        let batch = self.config.batch_size;

        match store.status() {
            LoadStatus::Idle | LoadStatus::Loading => {
                return Ok(CatalogWindow {
                    view: CatalogView::Loading,
                    window: DisclosureController::new(batch, 0),
                })
            }
            LoadStatus::Failed => {
                return Ok(CatalogWindow {
                    view: CatalogView::Failed {
                        message: store.error().unwrap_or("erro desconhecido").to_string(),
                    },
                    window: DisclosureController::new(batch, 0),
                })
            }
            LoadStatus::Loaded => {}
        }

        let ordered = evaluate(store.data(), &query.criteria, &query.search, query.sort);
        let mut window = match query.shown {
            Some(shown) => DisclosureController::resume(batch, ordered.len(), shown),
            None => DisclosureController::new(batch, ordered.len()),
        };
        if ordered.is_empty() {
            return Ok(CatalogWindow {
                view: CatalogView::Empty,
                window,
            });
        }

        let range = if advance {
            window.on_sentinel_visible()
        } else {
            0..window.visible_len()
        };

        let mounts = MountTracker::new(self.config.eager_cards);
        let ledger = self.ledger()?;
        let cards = ordered[range.clone()]
            .iter()
            .zip(range)
            .map(|(listing, position)| {
                if mounts.is_mounted(position, &listing.id) {
                    CardSlot::Full(CardProps::from_listing(
                        listing,
                        ledger.is_favorite(&listing.id),
                        now,
                    ))
                } else {
                    CardSlot::Placeholder {
                        id: listing.id.clone(),
                        position,
                    }
                }
            })
            .collect();

        Ok(CatalogWindow {
            view: CatalogView::Results {
                cards,
                has_more: window.has_more(),
                total: ordered.len(),
            },
            window,
        })
    }

    /// Card props for a single listing, e.g. when its placeholder is revealed.
    pub fn card(&self, id: &str, now: DateTime<Utc>) -> Result<CardProps, ServerError> {
        let store = self.store()?;
        let listing = store
            .data()
            .iter()
            .find(|l| l.id == id)
            .ok_or(ServerError::NotFound)?;
        let is_favorite = self.ledger()?.is_favorite(id);
        Ok(CardProps::from_listing(listing, is_favorite, now))
    }

    pub fn is_known_listing(&self, id: &str) -> Result<bool, ServerError> {
        Ok(self.store()?.data().iter().any(|l| l.id == id))
    }

    /// Flips a favorite. A failed write is logged; the flipped value stands.
    pub fn toggle_favorite(&self, id: &str) -> Result<bool, ServerError> {
        let mut ledger = self.ledger()?;
        match ledger.toggle(id) {
            Ok(value) => Ok(value),
            Err(e) => {
                log::warn!("Favorite for '{id}' not persisted: {e}");
                Ok(ledger.is_favorite(id))
            }
        }
    }
}

/// Picks the listing backend from config: remote URL first, then a local file.
pub fn build_source(config: &CatalogConfig) -> Result<Arc<dyn ListingSource>, CatalogError> {
    if let Some(url) = config.listings_url.as_deref() {
        log::info!("Listings from backend {url}");
        return Ok(Arc::new(HttpListingSource::new(url, config.fetch_timeout)?));
    }
    if let Some(path) = config.listings_file.as_ref() {
        log::info!("Listings from file {}", path.display());
        return Ok(Arc::new(FileListingSource::new(path.clone())));
    }
    Err(CatalogError::Config(
        "set CATALOG_LISTINGS_URL or CATALOG_LISTINGS_FILE".to_string(),
    ))
}

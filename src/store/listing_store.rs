// src/store/listing_store.rs
use crate::domain::listing::Listing;
use crate::errors::CatalogResult;
use crate::store::source::ListingSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Proof that a fetch was started. Results delivered with a ticket from
/// before the last `detach` are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct LoadTicket {
    generation: u64,
}

/// Holds the full fetched collection plus its loading status.
#[derive(Debug)]
pub struct ListingStore {
    status: LoadStatus,
    data: Vec<Listing>,
    error: Option<String>,
    generation: u64,
    fetches: u64,
}

impl Default for ListingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingStore {
    pub fn new() -> Self {
        Self {
            status: LoadStatus::Idle,
            data: Vec::new(),
            error: None,
            generation: 0,
            fetches: 0,
        }
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    /// The loaded collection. Empty unless the status is `Loaded`.
    pub fn data(&self) -> &[Listing] {
        &self.data
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// How many fetches have been started over the store's lifetime.
    pub fn fetch_count(&self) -> u64 {
        self.fetches
    }

    /// Moves to `Loading`. Returns `None` when a fetch is already in flight.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.status == LoadStatus::Loading {
            log::debug!("Listing load already in flight, ignoring");
            return None;
        }

        self.status = LoadStatus::Loading;
        self.error = None;
        self.fetches += 1;
        Some(LoadTicket {
            generation: self.generation,
        })
    }

    /// Applies a fetch result. Returns `false` when the ticket is stale.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: CatalogResult<Vec<Listing>>) -> bool {
        if ticket.generation != self.generation || self.status != LoadStatus::Loading {
            log::debug!("Discarding listing result for a detached store");
            return false;
        }

        match result {
            Ok(listings) => {
                log::info!("Loaded {} listings", listings.len());
                self.data = listings;
                self.status = LoadStatus::Loaded;
            }
            Err(e) => {
                log::warn!("Listing load failed: {e}");
                self.data.clear();
                self.error = Some(e.to_string());
                self.status = LoadStatus::Failed;
            }
        }
        true
    }

    /// Runs one fetch against `source`. No-op while another load is in flight.
    pub fn load(&mut self, source: &dyn ListingSource) -> bool {
        match self.begin_load() {
            Some(ticket) => {
                let result = source.fetch();
                self.finish_load(ticket, result)
            }
            None => false,
        }
    }

    /// The owning screen went away: outstanding fetches must not land.
    pub fn detach(&mut self) {
        self.generation += 1;
        if self.status == LoadStatus::Loading {
            self.status = LoadStatus::Idle;
        }
    }
}

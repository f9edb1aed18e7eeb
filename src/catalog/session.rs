// src/catalog/session.rs
use crate::catalog::view::{CardSlot, CatalogView};
use crate::domain::card::CardProps;
use crate::domain::criteria::{FilterCriteria, SortKey};
use crate::domain::listing::Listing;
use crate::disclosure::{DisclosureController, MountTracker, DEFAULT_BATCH_SIZE, DEFAULT_EAGER_CARDS};
use crate::errors::CatalogResult;
use crate::favorites::{FavoriteLedger, FavoriteStorage};
use crate::query::{evaluate_indices, Debouncer, SEARCH_DEBOUNCE};
use crate::store::{ListingSource, ListingStore, LoadStatus};
use chrono::{DateTime, Utc};
use std::ops::Range;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub batch_size: usize,
    pub eager_cards: usize,
    pub search_debounce: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            eager_cards: DEFAULT_EAGER_CARDS,
            search_debounce: SEARCH_DEBOUNCE,
        }
    }
}

/// One catalog screen: store, query pipeline, disclosure window and favorites
/// wired together and driven by discrete UI events.
pub struct CatalogSession<S: FavoriteStorage> {
    source: Arc<dyn ListingSource>,
    store: ListingStore,
    ledger: FavoriteLedger<S>,

    search: Debouncer<String>,
    draft_search: String,
    applied_search: String,
    criteria: FilterCriteria,
    sort: SortKey,

    // Positions into `store.data()`, filtered and ordered.
    ordered: Vec<usize>,
    window: DisclosureController,
    mounts: MountTracker,
    evaluations: u64,
}

impl<S: FavoriteStorage> CatalogSession<S> {
    pub fn new(source: Arc<dyn ListingSource>, ledger: FavoriteLedger<S>, options: SessionOptions) -> Self {
        Self {
            source,
            store: ListingStore::new(),
            ledger,
            search: Debouncer::new(options.search_debounce),
            draft_search: String::new(),
            applied_search: String::new(),
            criteria: FilterCriteria::default(),
            sort: SortKey::default(),
            ordered: Vec::new(),
            window: DisclosureController::new(options.batch_size, 0),
            mounts: MountTracker::new(options.eager_cards),
            evaluations: 0,
        }
    }

    /// Fetches the collection. Also the retry affordance after a failure.
    pub fn load(&mut self) -> bool {
        let applied = self.store.load(self.source.as_ref());
        if applied {
            self.mounts.clear();
            self.refresh();
        }
        applied
    }

    /// The screen unmounted; late fetch results are dropped.
    pub fn detach(&mut self) {
        self.store.detach();
        self.search.cancel();
    }

    pub fn status(&self) -> LoadStatus {
        self.store.status()
    }

    pub fn store(&self) -> &ListingStore {
        &self.store
    }

    pub fn ledger(&self) -> &FavoriteLedger<S> {
        &self.ledger
    }

    // ----- Query inputs -----

    /// A keystroke. The draft updates now; evaluation waits for `tick`.
    pub fn on_search_input(&mut self, text: &str, now: Instant) {
        self.draft_search = text.to_string();
        self.search.push(self.draft_search.clone(), now);
    }

    pub fn draft_search(&self) -> &str {
        &self.draft_search
    }

    pub fn applied_search(&self) -> &str {
        &self.applied_search
    }

    /// When the next `tick` could apply pending search text.
    pub fn search_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// Applies debounced search text once it has been quiet long enough.
    /// Returns `true` when the pipeline re-ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.search.poll(now) {
            Some(text) => self.apply_search(text),
            None => false,
        }
    }

    /// Applies pending search text immediately (explicit submit).
    pub fn flush_search(&mut self) -> bool {
        match self.search.flush() {
            Some(text) => self.apply_search(text),
            None => false,
        }
    }

    fn apply_search(&mut self, text: String) -> bool {
        if text == self.applied_search {
            return false;
        }
        self.applied_search = text;
        self.refresh();
        true
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) -> bool {
        if criteria == self.criteria {
            return false;
        }
        self.criteria = criteria;
        self.refresh();
        true
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn set_sort(&mut self, sort: SortKey) -> bool {
        if sort == self.sort {
            return false;
        }
        self.sort = sort;
        self.refresh();
        true
    }

    /// Clears search, filters and sort in one evaluation.
    pub fn reset_filters(&mut self) {
        self.search.cancel();
        self.draft_search.clear();
        self.applied_search.clear();
        self.criteria = FilterCriteria::default();
        self.sort = SortKey::default();
        self.refresh();
    }

    /// Number of pipeline evaluations so far.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    fn refresh(&mut self) {
        self.ordered = evaluate_indices(
            self.store.data(),
            &self.criteria,
            &self.applied_search,
            self.sort,
        );
        self.evaluations += 1;
        self.window.reset(self.ordered.len());
    }

    // ----- Disclosure -----

    pub fn results(&self) -> Vec<&Listing> {
        let data = self.store.data();
        self.ordered.iter().map(|&i| &data[i]).collect()
    }

    pub fn visible(&self) -> Vec<&Listing> {
        let data = self.store.data();
        self.window
            .visible_slice(&self.ordered)
            .iter()
            .map(|&i| &data[i])
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.window.visible_count()
    }

    pub fn has_more(&self) -> bool {
        self.window.has_more()
    }

    pub fn on_sentinel_visible(&mut self) -> Range<usize> {
        self.window.on_sentinel_visible()
    }

    pub fn on_card_visible(&mut self, id: &str) -> bool {
        self.mounts.on_card_visible(id)
    }

    // ----- Favorites -----

    pub fn is_favorite(&self, id: &str) -> bool {
        self.ledger.is_favorite(id)
    }

    pub fn toggle_favorite(&mut self, id: &str) -> CatalogResult<bool> {
        self.ledger.toggle(id)
    }

    // ----- Presentation -----

    pub fn view(&self, now: DateTime<Utc>) -> CatalogView {
        match self.store.status() {
            LoadStatus::Idle | LoadStatus::Loading => CatalogView::Loading,
            LoadStatus::Failed => CatalogView::Failed {
                message: self.store.error().unwrap_or("unknown error").to_string(),
            },
            LoadStatus::Loaded if self.ordered.is_empty() => CatalogView::Empty,
            LoadStatus::Loaded => {
                let cards = self
                    .visible()
                    .into_iter()
                    .enumerate()
                    .map(|(position, listing)| {
                        if self.mounts.is_mounted(position, &listing.id) {
                            CardSlot::Full(CardProps::from_listing(
                                listing,
                                self.ledger.is_favorite(&listing.id),
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

                CatalogView::Results {
                    cards,
                    has_more: self.window.has_more(),
                    total: self.ordered.len(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::listing::{ListingImage, TransactionKind};
    use crate::errors::CatalogError;
    use crate::favorites::MemoryStorage;
    use crate::store::StaticListingSource;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn listing(n: usize) -> Listing {
        Listing {
            id: format!("p{n}"),
            title: if n % 2 == 0 { format!("Casa {n}") } else { format!("Apartamento {n}") },
            slug: None,
            description: String::new(),
            address: String::new(),
            neighborhood: String::new(),
            city: "Guararema".into(),
            price: Some(100_000 * n as i64),
            transaction: TransactionKind::Sale,
            area: None,
            bedrooms: Some((n % 5) as u32),
            bathrooms: None,
            parking_spots: None,
            published_at: None,
            highlighted: n == 7,
            image: ListingImage::default(),
        }
    }

    fn session(count: usize, batch: usize) -> CatalogSession<MemoryStorage> {
        let source = StaticListingSource::new((1..=count).map(listing).collect());
        let options = SessionOptions {
            batch_size: batch,
            eager_cards: 2,
            search_debounce: Duration::from_millis(500),
        };
        CatalogSession::new(Arc::new(source), FavoriteLedger::load(MemoryStorage::new()), options)
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn twenty_listings_disclosed_in_batches() {
        let mut s = session(20, 6);
        assert!(s.load());

        assert_eq!(s.visible().len(), 6);
        assert!(s.has_more());

        s.on_sentinel_visible();
        assert_eq!(s.visible().len(), 12);

        for _ in 0..3 {
            s.on_sentinel_visible();
        }
        assert_eq!(s.visible().len(), 20);
        assert!(!s.has_more());
        assert!(s.view(now()).is_exhausted());
    }

    #[test]
    fn criteria_change_resets_window() {
        let mut s = session(20, 6);
        s.load();
        s.on_sentinel_visible();
        s.on_sentinel_visible();
        assert_eq!(s.visible_count(), 18);

        // Only four listings have exactly 2 bedrooms.
        assert!(s.set_criteria(FilterCriteria::default().with_bedrooms(2)));
        assert_eq!(s.visible_count(), 6);
        assert_eq!(s.visible().len(), 4);
        assert!(!s.has_more());

        // Same criteria again is not a change.
        assert!(!s.set_criteria(FilterCriteria::default().with_bedrooms(2)));
    }

    #[test]
    fn sort_change_resets_window() {
        let mut s = session(20, 6);
        s.load();
        s.on_sentinel_visible();

        assert!(s.set_sort(SortKey::PriceDesc));
        assert_eq!(s.visible_count(), 6);
        assert_eq!(s.visible()[0].id, "p20");
    }

    #[test]
    fn search_burst_runs_pipeline_once_with_final_text() {
        let mut s = session(20, 6);
        s.load();
        let before = s.evaluations();

        let start = Instant::now();
        let mut ran = 0;
        for (i, text) in ["c", "ca", "cas", "casa"].iter().enumerate() {
            let at = start + Duration::from_millis(120 * i as u64);
            s.on_search_input(text, at);
            if s.tick(at) {
                ran += 1;
            }
        }
        assert_eq!(s.draft_search(), "casa");
        assert_eq!(s.applied_search(), "");

        let quiet = start + Duration::from_millis(360 + 500);
        if s.tick(quiet) {
            ran += 1;
        }
        assert!(!s.tick(quiet + Duration::from_secs(2)));

        assert_eq!(ran, 1);
        assert_eq!(s.evaluations(), before + 1);
        assert_eq!(s.applied_search(), "casa");
        // Even-numbered listings are houses.
        assert_eq!(s.results().len(), 10);
    }

    #[test]
    fn applied_search_resets_window() {
        let mut s = session(20, 6);
        s.load();
        s.on_sentinel_visible();
        s.on_sentinel_visible();
        assert_eq!(s.visible_count(), 18);

        let start = Instant::now();
        s.on_search_input("apartamento", start);
        // Draft only; the window holds until the text is applied.
        assert!(!s.tick(start + Duration::from_millis(100)));
        assert_eq!(s.visible_count(), 18);

        assert!(s.tick(start + Duration::from_millis(500)));
        assert_eq!(s.applied_search(), "apartamento");
        assert_eq!(s.visible_count(), 6);
        assert_eq!(s.results().len(), 10);
        assert_eq!(s.visible().len(), 6);
        assert!(s.has_more());
    }

    #[test]
    fn placeholders_past_eager_prefix() {
        let mut s = session(8, 6);
        s.load();

        let CatalogView::Results { cards, has_more, total } = s.view(now()) else {
            panic!("expected results");
        };
        assert!(has_more);
        assert_eq!(total, 8);
        // p7 is highlighted and sorts first under relevance.
        assert_eq!(cards[0].id(), "p7");
        assert!(!cards[1].is_placeholder());
        assert!(cards[2].is_placeholder());

        let id = cards[2].id().to_string();
        assert!(s.on_card_visible(&id));
        assert!(!s.on_card_visible(&id));

        let CatalogView::Results { cards, .. } = s.view(now()) else {
            panic!("expected results");
        };
        assert!(!cards[2].is_placeholder());
        assert!(cards[3].is_placeholder());
    }

    #[test]
    fn favorites_flow_into_cards() {
        let mut s = session(3, 6);
        s.load();
        assert!(s.toggle_favorite("p1").unwrap());

        let CatalogView::Results { cards, .. } = s.view(now()) else {
            panic!("expected results");
        };
        let fav = cards
            .iter()
            .find_map(|c| match c {
                CardSlot::Full(p) if p.id == "p1" => Some(p.is_favorite),
                _ => None,
            })
            .unwrap();
        assert!(fav);
    }

    #[test]
    fn empty_and_reset_states() {
        let mut s = session(5, 6);
        assert_eq!(s.view(now()), CatalogView::Loading);
        s.load();

        s.on_search_input("mansão", Instant::now());
        assert!(s.flush_search());
        assert_eq!(s.view(now()), CatalogView::Empty);

        s.reset_filters();
        assert_eq!(s.results().len(), 5);
        assert_eq!(s.applied_search(), "");
    }

    struct FlakySource {
        fail: AtomicBool,
    }

    impl ListingSource for FlakySource {
        fn fetch(&self) -> CatalogResult<Vec<Listing>> {
            if self.fail.swap(false, Ordering::SeqCst) {
                Err(CatalogError::Network("connection reset".into()))
            } else {
                Ok(vec![listing(1)])
            }
        }
    }

    #[test]
    fn failed_load_can_be_retried() {
        let source = Arc::new(FlakySource {
            fail: AtomicBool::new(true),
        });
        let mut s = CatalogSession::new(
            source,
            FavoriteLedger::load(MemoryStorage::new()),
            SessionOptions::default(),
        );

        s.load();
        assert!(matches!(s.view(now()), CatalogView::Failed { .. }));
        assert!(s.results().is_empty());

        s.load();
        assert_eq!(s.status(), LoadStatus::Loaded);
        assert_eq!(s.results().len(), 1);
    }
}

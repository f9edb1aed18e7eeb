use crate::errors::{CatalogError, CatalogResult, ServerError};
use crate::router::handle;
use crate::store::{ListingSource, LoadStatus};
use crate::domain::Listing;
use crate::tests::utils::{body_string, listing, listings, make_db, make_state, request, static_state};
use http::Method;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

/// Fails the first `failures` fetches, then serves `listings`.
struct FlakySource {
    failures: usize,
    calls: AtomicUsize,
    listings: Vec<Listing>,
}

impl ListingSource for FlakySource {
    fn fetch(&self) -> CatalogResult<Vec<Listing>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            Err(CatalogError::Network("connection refused".into()))
        } else {
            Ok(self.listings.clone())
        }
    }
}

/// Signals when a fetch starts, then blocks until released.
struct GatedSource {
    calls: AtomicUsize,
    started: Mutex<Sender<()>>,
    release: Mutex<Receiver<()>>,
    listings: Vec<Listing>,
}

impl ListingSource for GatedSource {
    fn fetch(&self) -> CatalogResult<Vec<Listing>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.started
            .lock()
            .map_err(|_| CatalogError::Network("poisoned".into()))?
            .send(())
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        self.release
            .lock()
            .map_err(|_| CatalogError::Network("poisoned".into()))?
            .recv()
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        Ok(self.listings.clone())
    }
}

#[test]
fn catalog_page_discloses_first_batch() {
    let db = make_db("catalog_page");
    let state = static_state(&db, listings(20));

    let resp = handle(request(Method::GET, "/"), &state).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("<strong>20</strong>"));

    // Batch of 6: two eager cards, four placeholders, then the sentinel.
    assert_eq!(body.matches(r#"class="property-card""#).count(), 2);
    assert_eq!(body.matches("property-card-placeholder").count(), 4);
    assert!(body.contains(r#"hx-get="/catalog/card/l5""#));
    assert!(!body.contains("card-l6"));
    assert!(body.contains(r#"hx-get="/catalog/more?shown=6""#));
}

#[test]
fn first_request_triggers_load() {
    let db = make_db("catalog_lazy_load");
    let state = static_state(&db, listings(3));
    assert_eq!(state.status().unwrap(), LoadStatus::Idle);

    let body = body_string(handle(request(Method::GET, "/"), &state).unwrap());

    assert_eq!(state.status().unwrap(), LoadStatus::Loaded);
    assert!(body.contains("catalog-end"));
    assert!(!body.contains("catalog-sentinel"));
}

#[test]
fn more_returns_next_batch_only() {
    let db = make_db("catalog_more");
    let state = static_state(&db, listings(20));
    state.load().unwrap();

    let body = body_string(
        handle(request(Method::GET, "/catalog/more?ordem=price-desc&shown=6"), &state).unwrap(),
    );

    // Descending price: l19..l14 were shown, l13..l8 come next.
    assert!(body.contains("card-l13"));
    assert!(body.contains("card-l8"));
    assert!(!body.contains("card-l14"));
    assert!(!body.contains("card-l7"));
    assert!(body.contains(r#"hx-get="/catalog/more?ordem=price-desc&amp;shown=12""#));
}

#[test]
fn last_batch_is_short_and_ends_the_list() {
    let db = make_db("catalog_last_batch");
    let state = static_state(&db, listings(20));
    state.load().unwrap();

    let body = body_string(handle(request(Method::GET, "/catalog/more?shown=18"), &state).unwrap());

    assert_eq!(body.matches("property-card-placeholder").count(), 2);
    assert!(body.contains("card-l18"));
    assert!(body.contains("card-l19"));
    assert!(body.contains("Todos os 20 imóveis"));
    assert!(!body.contains("catalog-sentinel"));
}

#[test]
fn filters_narrow_results() {
    let db = make_db("catalog_filters");
    let items = vec![
        listing("a", 300_000, 2),
        listing("b", 500_000, 4),
        listing("c", 800_000, 5),
    ];
    let state = static_state(&db, items);

    let body = body_string(
        handle(request(Method::GET, "/?dormitorios=4&precoMax=600000"), &state).unwrap(),
    );

    assert!(body.contains("<strong>1</strong>"));
    assert!(body.contains(r#"id="card-b""#));
    assert!(!body.contains(r#"id="card-a""#));
    assert!(!body.contains(r#"id="card-c""#));
}

#[test]
fn no_matches_renders_empty_state() {
    let db = make_db("catalog_empty");
    let state = static_state(&db, listings(5));

    let body = body_string(handle(request(Method::GET, "/?q=mansao"), &state).unwrap());

    assert!(body.contains("Nenhum imóvel encontrado"));
    assert!(!body.contains("catalog-sentinel"));
}

#[test]
fn card_route_mounts_placeholder() {
    let db = make_db("catalog_card");
    let state = static_state(&db, listings(10));
    state.load().unwrap();

    let body = body_string(handle(request(Method::GET, "/catalog/card/l7"), &state).unwrap());
    assert!(body.contains(r#"id="card-l7""#));
    assert!(body.contains("Casa l7"));
    assert!(body.contains(r#"href="/imovel/casa-l7""#));

    let missing = handle(request(Method::GET, "/catalog/card/nope"), &state);
    assert!(matches!(missing, Err(ServerError::NotFound)));
}

#[test]
fn unknown_route_is_not_found() {
    let db = make_db("catalog_404");
    let state = static_state(&db, listings(1));

    assert!(matches!(
        handle(request(Method::GET, "/admin"), &state),
        Err(ServerError::NotFound)
    ));
    assert!(matches!(
        handle(request(Method::GET, "/catalog/reload"), &state),
        Err(ServerError::NotFound)
    ));
}

#[test]
fn failed_load_offers_retry() {
    let db = make_db("catalog_retry");
    let source = Arc::new(FlakySource {
        failures: 1,
        calls: AtomicUsize::new(0),
        listings: listings(3),
    });
    let state = make_state(&db, source);

    let body = body_string(handle(request(Method::GET, "/?q=casa&ordem=newest"), &state).unwrap());
    assert_eq!(state.status().unwrap(), LoadStatus::Failed);
    assert!(body.contains("Erro ao carregar imóveis"));
    assert!(body.contains("connection refused"));
    assert!(body.contains(r#"action="/catalog/reload?q=casa&amp;ordem=newest""#));

    // Retry lands back on the same search.
    let resp = handle(request(Method::POST, "/catalog/reload?q=casa&ordem=newest"), &state).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers().get("Location").unwrap(), "/?q=casa&ordem=newest");
    assert_eq!(state.status().unwrap(), LoadStatus::Loaded);

    let body = body_string(handle(request(Method::GET, "/?q=casa&ordem=newest"), &state).unwrap());
    assert!(body.contains("<strong>3</strong>"));

    let resp = handle(request(Method::POST, "/catalog/reload"), &state).unwrap();
    assert_eq!(resp.headers().get("Location").unwrap(), "/");
}

#[test]
fn concurrent_load_runs_one_fetch() {
    let db = make_db("catalog_concurrent_load");
    let (started_tx, started_rx) = channel();
    let (release_tx, release_rx) = channel();
    let source = Arc::new(GatedSource {
        calls: AtomicUsize::new(0),
        started: Mutex::new(started_tx),
        release: Mutex::new(release_rx),
        listings: listings(4),
    });
    let state = make_state(&db, source.clone());

    thread::scope(|scope| {
        let first = scope.spawn(|| state.load());

        // First fetch is in flight with the store lock released.
        started_rx.recv().unwrap();
        assert_eq!(state.status().unwrap(), LoadStatus::Loading);
        assert!(!state.load().unwrap());

        let body = body_string(handle(request(Method::GET, "/"), &state).unwrap());
        assert!(body.contains("is-loading"));

        release_tx.send(()).unwrap();
        assert!(first.join().unwrap().unwrap());
    });

    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    assert_eq!(state.status().unwrap(), LoadStatus::Loaded);
}

use crate::errors::ServerError;
use crate::favorites::{FavoriteLedger, SqliteStorage};
use crate::router::handle;
use crate::tests::utils::{body_string, listing, listings, make_db, request, static_state};
use http::Method;

#[test]
fn toggle_flips_and_persists() {
    let db = make_db("favorites_toggle");
    let state = static_state(&db, listings(3));
    state.load().unwrap();

    let body = body_string(handle(request(Method::POST, "/favorites/l1/toggle"), &state).unwrap());
    assert!(body.contains(r#"id="fav-l1""#));
    assert!(body.contains(r#"aria-pressed="true""#));

    // A fresh ledger over the same database sees the write.
    let reloaded = FavoriteLedger::load(SqliteStorage::new(db.clone()));
    assert!(reloaded.is_favorite("l1"));
    assert_eq!(reloaded.len(), 1);

    let body = body_string(handle(request(Method::POST, "/favorites/l1/toggle"), &state).unwrap());
    assert!(body.contains(r#"aria-pressed="false""#));

    let reloaded = FavoriteLedger::load(SqliteStorage::new(db));
    assert!(!reloaded.is_favorite("l1"));
}

#[test]
fn favorite_shows_on_cards() {
    let db = make_db("favorites_cards");
    let state = static_state(&db, listings(3));
    state.load().unwrap();
    state.toggle_favorite("l0").unwrap();

    let body = body_string(handle(request(Method::GET, "/"), &state).unwrap());
    assert!(body.contains("favorite-toggle is-favorite"));
    assert_eq!(body.matches(r#"aria-pressed="true""#).count(), 1);
}

#[test]
fn favorites_survive_restart() {
    let db = make_db("favorites_restart");
    {
        let state = static_state(&db, listings(3));
        state.load().unwrap();
        state.toggle_favorite("l2").unwrap();
    }

    let state = static_state(&db, listings(3));
    state.load().unwrap();
    let body = body_string(handle(request(Method::GET, "/catalog/card/l2"), &state).unwrap());
    assert!(body.contains(r#"aria-pressed="true""#));
}

#[test]
fn toggle_unknown_listing_is_not_found() {
    let db = make_db("favorites_unknown");
    let state = static_state(&db, listings(1));
    state.load().unwrap();

    assert!(matches!(
        handle(request(Method::POST, "/favorites/ghost/toggle"), &state),
        Err(ServerError::NotFound)
    ));
    assert!(matches!(
        handle(request(Method::GET, "/favorites/l0/toggle"), &state),
        Err(ServerError::NotFound)
    ));
}

#[test]
fn ids_are_escaped_in_routes() {
    let db = make_db("favorites_escaped_ids");
    let items = vec![
        listing("casa centro", 300_000, 2),
        listing("l1", 400_000, 2),
        listing("sala/2", 500_000, 1),
    ];
    let state = static_state(&db, items);

    let body = body_string(handle(request(Method::GET, "/"), &state).unwrap());
    assert!(body.contains(r#"hx-post="/favorites/casa%20centro/toggle""#));
    assert!(body.contains(r#"hx-get="/catalog/card/sala%2F2""#));

    let body = body_string(
        handle(request(Method::POST, "/favorites/casa%20centro/toggle"), &state).unwrap(),
    );
    assert!(body.contains(r#"aria-pressed="true""#));
    assert!(body.contains(r#"hx-post="/favorites/casa%20centro/toggle""#));

    let reloaded = FavoriteLedger::load(SqliteStorage::new(db));
    assert!(reloaded.is_favorite("casa centro"));

    let body = body_string(handle(request(Method::GET, "/catalog/card/sala%2F2"), &state).unwrap());
    assert!(body.contains("Casa sala/2"));

    assert!(matches!(
        handle(request(Method::GET, "/catalog/card/%FF"), &state),
        Err(ServerError::BadRequest(_))
    ));
}

use crate::app::AppState;
use crate::config::CatalogConfig;
use crate::db::{init_db, Database};
use crate::domain::{Listing, ListingImage, TransactionKind};
use crate::favorites::{FavoriteLedger, SqliteStorage};
use crate::store::{ListingSource, StaticListingSource};
use astra::{Body, Response};
use chrono::{TimeZone, Utc};
use http::{Method, Request};
use std::io::Read;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Fresh database file per call, using the production schema.
pub fn make_db(name: &str) -> Database {
    let path = std::env::temp_dir().join(format!(
        "{name}_{}.sqlite",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let db = Database::new(path.to_string_lossy().into_owned());
    init_db(&db).expect("Failed to initialize DB");
    db
}

pub fn listing(id: &str, price: i64, bedrooms: u32) -> Listing {
    Listing {
        id: id.to_string(),
        title: format!("Casa {id}"),
        slug: Some(format!("casa-{id}")),
        description: String::new(),
        address: format!("Rua {id}"),
        neighborhood: "Centro".to_string(),
        city: "Guararema".to_string(),
        price: Some(price),
        transaction: TransactionKind::Sale,
        area: Some(100.0),
        bedrooms: Some(bedrooms),
        bathrooms: Some(1),
        parking_spots: None,
        published_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single(),
        highlighted: false,
        image: ListingImage::default(),
    }
}

/// `n` listings with ids l0..l{n-1} and ascending prices.
pub fn listings(n: usize) -> Vec<Listing> {
    (0..n)
        .map(|i| listing(&format!("l{i}"), 100_000 + i as i64 * 1_000, 2))
        .collect()
}

pub fn make_state(db: &Database, source: Arc<dyn ListingSource>) -> AppState {
    let config = CatalogConfig {
        batch_size: 6,
        eager_cards: 2,
        ..CatalogConfig::default()
    };
    let ledger = FavoriteLedger::load(SqliteStorage::new(db.clone()));
    AppState::new(config, source, ledger)
}

pub fn static_state(db: &Database, items: Vec<Listing>) -> AppState {
    make_state(db, Arc::new(StaticListingSource::new(items)))
}

pub fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

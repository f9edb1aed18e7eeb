use astra::Server;
use listing_catalog::app::{build_source, AppState};
use listing_catalog::config::CatalogConfig;
use listing_catalog::db::{init_db, Database};
use listing_catalog::favorites::{FavoriteLedger, SqliteStorage};
use listing_catalog::responses::error_to_response;
use listing_catalog::router::handle;
use std::sync::Arc;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match CatalogConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    // Favorites live in the local database.
    let db = Database::new(config.db_path.clone());
    if let Err(e) = init_db(&db) {
        log::error!("Database initialization failed: {e}");
        std::process::exit(1);
    }

    let source = match build_source(&config) {
        Ok(source) => source,
        Err(e) => {
            log::error!("No listing source: {e}");
            std::process::exit(1);
        }
    };

    let ledger = FavoriteLedger::load(SqliteStorage::new(db));
    log::info!("Loaded {} favorites", ledger.len());

    let addr = config.bind_addr;
    let workers = config.max_workers;
    let state = Arc::new(AppState::new(config, source, ledger));

    // Initial fetch; a failure is shown on the page with a retry.
    if let Err(e) = state.load() {
        log::error!("Initial listing load failed: {e}");
    }

    log::info!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(workers);

    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        log::error!("Server ended with error: {e}");
    }

    log::info!("Server shut down cleanly.");
}

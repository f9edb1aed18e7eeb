use crate::app::AppState;
use crate::catalog::{CatalogQuery, CatalogView};
use crate::domain::FavoriteToggle;
use crate::errors::ServerError;
use crate::responses::{html_response, redirect, ResultResp};
use crate::templates::components::{favorite_button_for, property_card};
use crate::templates::pages::{card_batch, catalog_page, catalog_results, CatalogPageVm};
use astra::Request;
use chrono::Utc;
use maud::html;

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();
    let query = CatalogQuery::parse(req.uri().query());

    log::debug!("{method} {path}");

    match (method, path) {
        ("GET", "/") => catalog(state, &query),
        ("GET", "/catalog/more") => more(state, &query),
        ("POST", "/catalog/reload") => {
            if !state.load()? {
                log::info!("Reload skipped, a fetch is already running");
            }
            redirect(&query.page_url())
        }
        ("GET", p) if p.starts_with("/catalog/card/") => {
            let id = path_id(p, "/catalog/card/", "")?;
            let props = state.card(&id, Utc::now())?;
            html_response(property_card(&props))
        }
        ("POST", p) if p.starts_with("/favorites/") && p.ends_with("/toggle") => {
            let id = path_id(p, "/favorites/", "/toggle")?;
            if !state.is_known_listing(&id)? {
                return Err(ServerError::NotFound);
            }
            let is_favorite = state.toggle_favorite(&id)?;
            let toggle = FavoriteToggle { listing_id: id };
            html_response(favorite_button_for(&toggle.listing_id, &toggle.path(), is_favorite))
        }
        _ => Err(ServerError::NotFound),
    }
}

fn catalog(state: &AppState, query: &CatalogQuery) -> ResultResp {
    state.ensure_loaded()?;
    let result = state.catalog_window(query, Utc::now())?;

    html_response(catalog_page(&CatalogPageVm {
        query,
        view: &result.view,
        debounce_ms: state.config.search_debounce.as_millis() as u64,
        shown: result.window.visible_len(),
    }))
}

/// Body swapped in for the sentinel: the next batch plus a new sentinel.
fn more(state: &AppState, query: &CatalogQuery) -> ResultResp {
    let result = state.next_batch(query, Utc::now())?;

    let markup = match &result.view {
        CatalogView::Results { cards, has_more, total } => {
            card_batch(query, cards, *has_more, *total, result.window.visible_len())
        }
        CatalogView::Empty => html! {},
        other => catalog_results(query, other, 0),
    };
    html_response(markup)
}

/// Single path segment between `prefix` and `suffix`, percent-decoded.
fn path_id(path: &str, prefix: &str, suffix: &str) -> Result<String, ServerError> {
    let raw = path
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(suffix))
        .ok_or(ServerError::NotFound)?;

    if raw.is_empty() || raw.contains('/') {
        return Err(ServerError::NotFound);
    }
    urlencoding::decode(raw)
        .map(|id| id.into_owned())
        .map_err(|_| ServerError::BadRequest(format!("invalid listing id '{raw}'")))
}

use crate::catalog::{CardSlot, CatalogQuery, CatalogView};
use crate::domain::criteria::{SortKey, MAX_BATHROOM_BUCKET, MAX_BEDROOM_BUCKET};
use crate::domain::listing::TransactionKind;
use crate::templates::components::{
    card_placeholder, empty_state, end_of_results, failed_state, load_more_sentinel,
    loading_state, property_card,
};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub struct CatalogPageVm<'a> {
    pub query: &'a CatalogQuery,
    pub view: &'a CatalogView,
    /// Quiet period before the search box re-queries.
    pub debounce_ms: u64,
    /// Cards rendered so far; the sentinel asks for the batch after these.
    pub shown: usize,
}

pub fn catalog_page(vm: &CatalogPageVm) -> Markup {
    desktop_layout(
        "Imóveis",
        html! {
            main class="container catalog" {
                h1 { "Encontre seu imóvel" }
                (filter_form(vm.query, vm.debounce_ms))
                section id="catalog-results" {
                    (catalog_results(vm.query, vm.view, vm.shown))
                }
            }
        },
    )
}

/// Grid for the current view, including the trailing sentinel or end marker.
pub fn catalog_results(query: &CatalogQuery, view: &CatalogView, shown: usize) -> Markup {
    match view {
        CatalogView::Loading => loading_state(6),
        CatalogView::Failed { message } => failed_state(message, &query.reload_url()),
        CatalogView::Empty => empty_state(),
        CatalogView::Results { cards, has_more, total } => html! {
            p class="catalog-count" { strong { (total) } " imóveis encontrados" }
            div class="catalog-grid" {
                (card_batch(query, cards, *has_more, *total, shown))
            }
        },
    }
}

/// A run of cards followed by the sentinel (more to come) or the end marker.
/// Also the body of a "load more" response, which replaces the old sentinel.
pub fn card_batch(
    query: &CatalogQuery,
    cards: &[CardSlot],
    has_more: bool,
    total: usize,
    shown: usize,
) -> Markup {
    html! {
        @for slot in cards {
            @match slot {
                CardSlot::Full(props) => { (property_card(props)) }
                CardSlot::Placeholder { id, position } => { (card_placeholder(id, *position)) }
            }
        }
        @if has_more {
            (load_more_sentinel(&query.more_url(shown)))
        } @else {
            (end_of_results(total))
        }
    }
}

fn filter_form(query: &CatalogQuery, debounce_ms: u64) -> Markup {
    let c = &query.criteria;
    let bedrooms = c.bedrooms.map(|b| b.bucket());
    let bathrooms = c.bathrooms.map(|b| b.bucket());

    html! {
        form
            id="catalog-filters"
            class="catalog-filters"
            method="get"
            action="/"
            hx-get="/"
            hx-select="#catalog-results"
            hx-target="#catalog-results"
            hx-swap="outerHTML"
            hx-push-url="true"
            hx-trigger=(format!("change, submit, keyup changed delay:{debounce_ms}ms from:#catalog-search"))
        {
            input
                type="search"
                id="catalog-search"
                name="q"
                value=(query.search)
                placeholder="Buscar por localização, tipo, características..."
                autocomplete="off";

            select name="tipo" {
                option value="" { "Venda ou aluguel" }
                @for kind in [TransactionKind::Sale, TransactionKind::Rent] {
                    option value=(kind.as_str()) selected[c.transaction == Some(kind)] { (kind.label()) }
                }
            }

            input type="text" name="local" placeholder="Bairro ou cidade"
                value=(c.location.as_deref().unwrap_or(""));

            input type="number" name="precoMin" placeholder="Preço mínimo" min="0"
                value=(c.price_min.map(|p| p.to_string()).unwrap_or_default());
            input type="number" name="precoMax" placeholder="Preço máximo" min="0"
                value=(c.price_max.map(|p| p.to_string()).unwrap_or_default());

            (count_select("dormitorios", "Dormitórios", MAX_BEDROOM_BUCKET, bedrooms))
            (count_select("banheiros", "Banheiros", MAX_BATHROOM_BUCKET, bathrooms))

            select name="ordem" {
                @for key in SortKey::ALL {
                    option value=(key.as_str()) selected[query.sort == key] { (key.label()) }
                }
            }

            button type="submit" class="btn primary" { "Buscar" }
            a href="/" class="btn" { "Limpar" }
        }
    }
}

/// Room-count select; the last bucket reads "N+".
fn count_select(name: &str, label: &str, max_bucket: u32, selected: Option<u32>) -> Markup {
    html! {
        select name=(name) aria-label=(label) {
            option value="" { (label) }
            @for n in 1..=max_bucket {
                @let text = if n == max_bucket { format!("{n}+") } else { n.to_string() };
                option value=(n) selected[selected == Some(n)] { (text) }
            }
        }
    }
}

use crate::templates::components::card::card_skeleton;
use maud::{html, Markup};

pub fn loading_state(skeletons: usize) -> Markup {
    html! {
        div class="catalog-grid is-loading" aria-busy="true" {
            @for i in 0..skeletons {
                (card_skeleton(i))
            }
        }
    }
}

pub fn empty_state() -> Markup {
    html! {
        div class="catalog-empty" {
            h3 { "Nenhum imóvel encontrado" }
            p { "Tente ajustar os filtros ou a busca." }
            a href="/" class="btn" { "Limpar filtros" }
        }
    }
}

/// Fetch failed; offers a retry that re-runs the store load and returns to
/// `reload_url`'s filters.
pub fn failed_state(message: &str, reload_url: &str) -> Markup {
    html! {
        div class="catalog-error" role="alert" {
            h3 { "Erro ao carregar imóveis" }
            p { (message) }
            form method="post" action=(reload_url) {
                button type="submit" class="btn primary" { "Tentar novamente" }
            }
        }
    }
}

/// Element after the last card; asks for the next batch when revealed.
pub fn load_more_sentinel(next_url: &str) -> Markup {
    html! {
        div
            class="catalog-sentinel"
            id="catalog-sentinel"
            hx-get=(next_url)
            hx-trigger="revealed"
            hx-swap="outerHTML"
        {
            span class="spinner" aria-hidden="true" {}
        }
    }
}

pub fn end_of_results(total: usize) -> Markup {
    html! {
        p class="catalog-end" id="catalog-end" {
            "Todos os " (total) " imóveis foram exibidos."
        }
    }
}

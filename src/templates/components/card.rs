use crate::domain::card::{path_segment, CardProps};
use maud::{html, Markup};

/// Full property card.
pub fn property_card(props: &CardProps) -> Markup {
    html! {
        article class="property-card" id=(card_dom_id(&props.id)) data-listing-id=(props.id) {
            a href=(props.href()) class="property-card-link" {
                div class="property-card-media" {
                    @if props.image.url.is_empty() {
                        div class="property-card-noimage" { "Sem foto" }
                    } @else {
                        img src=(props.image.url) alt=(props.image.alt) loading="lazy" decoding="async";
                    }
                    div class="property-card-badges" {
                        @if props.is_highlight {
                            span class="badge badge-highlight" { "Destaque" }
                        }
                        @if props.is_new {
                            span class="badge badge-new" { "Novo" }
                        }
                        span class="badge badge-kind" { (props.transaction.label()) }
                    }
                }

                div class="property-card-body" {
                    h3 class="property-card-title" { (props.title) }
                    p class="property-card-location" {
                        (props.location)
                        @if !props.location.is_empty() && !props.city.is_empty() { ", " }
                        (props.city)
                    }
                    p class="property-card-price" { (props.formatted_price()) }

                    ul class="property-card-facts" {
                        @if let Some(area) = props.area {
                            li { (format!("{area:.0}")) " m²" }
                        }
                        @if let Some(n) = props.bedrooms {
                            li { (n) " dorm." }
                        }
                        @if let Some(n) = props.bathrooms {
                            li { (n) " banh." }
                        }
                        @if let Some(n) = props.parking_spots {
                            li { (n) " vagas" }
                        }
                    }
                }
            }
            (favorite_button(props))
        }
    }
}

/// Heart toggle; swaps itself with the server's answer.
pub fn favorite_button(props: &CardProps) -> Markup {
    favorite_button_for(&props.id, &props.toggle.path(), props.is_favorite)
}

pub fn favorite_button_for(id: &str, toggle_path: &str, is_favorite: bool) -> Markup {
    let label = if is_favorite {
        "Remover dos favoritos"
    } else {
        "Adicionar aos favoritos"
    };

    html! {
        button
            type="button"
            class=(if is_favorite { "favorite-toggle is-favorite" } else { "favorite-toggle" })
            id=(format!("fav-{id}"))
            aria-pressed=(if is_favorite { "true" } else { "false" })
            aria-label=(label)
            hx-post=(toggle_path)
            hx-swap="outerHTML"
        {
            @if is_favorite { "♥" } @else { "♡" }
        }
    }
}

/// Stand-in for a disclosed card whose content is not mounted yet.
/// Asks for the full card the first time it scrolls into view.
pub fn card_placeholder(id: &str, position: usize) -> Markup {
    html! {
        div
            class="property-card-placeholder"
            id=(card_dom_id(id))
            style=(format!("animation-delay: {}ms", position * 50))
            hx-get=(format!("/catalog/card/{}", path_segment(id)))
            hx-trigger="revealed"
            hx-swap="outerHTML"
        {
            span class="placeholder-label" { "Carregando..." }
        }
    }
}

/// Skeleton shown while the collection itself is loading.
pub fn card_skeleton(index: usize) -> Markup {
    html! {
        div class="property-card-skeleton" aria-hidden="true"
            style=(format!("animation-delay: {}ms", index * 100))
        {
            div class="skeleton-media" {}
            div class="skeleton-line" {}
            div class="skeleton-line short" {}
            div class="skeleton-price" {}
        }
    }
}

fn card_dom_id(id: &str) -> String {
    format!("card-{id}")
}

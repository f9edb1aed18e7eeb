// src/query/pipeline.rs

use crate::domain::criteria::{FilterCriteria, SortKey};
use crate::domain::listing::Listing;
use std::cmp::Ordering;

/// Filters, searches and orders `listings`.
///
/// Pure: the same inputs always produce the same identifiers in the same order.
/// The result borrows from `listings` and never contains anything else.
pub fn evaluate<'a>(
    listings: &'a [Listing],
    criteria: &FilterCriteria,
    search_text: &str,
    sort: SortKey,
) -> Vec<&'a Listing> {
    evaluate_indices(listings, criteria, search_text, sort)
        .into_iter()
        .map(|i| &listings[i])
        .collect()
}

/// Same as [`evaluate`] but yields positions into `listings`.
pub fn evaluate_indices(
    listings: &[Listing],
    criteria: &FilterCriteria,
    search_text: &str,
    sort: SortKey,
) -> Vec<usize> {
    let term = normalize_term(search_text);

    let mut result: Vec<usize> = listings
        .iter()
        .enumerate()
        .filter(|(_, l)| term.as_deref().map_or(true, |t| matches_search(l, t)))
        .filter(|(_, l)| matches_criteria(l, criteria))
        .map(|(i, _)| i)
        .collect();

    // sort_by is stable: ties keep fetch order.
    result.sort_by(|&a, &b| compare(&listings[a], &listings[b], sort));
    result
}

/// Lowercased, trimmed search term; `None` when there is nothing to search for.
fn normalize_term(search_text: &str) -> Option<String> {
    let term = search_text.trim();
    if term.is_empty() {
        None
    } else {
        Some(term.to_lowercase())
    }
}

fn contains_ci(haystack: &str, lowered_needle: &str) -> bool {
    !haystack.is_empty() && haystack.to_lowercase().contains(lowered_needle)
}

/// `term` must already be lowercased.
pub fn matches_search(listing: &Listing, term: &str) -> bool {
    [
        &listing.title,
        &listing.address,
        &listing.neighborhood,
        &listing.city,
        &listing.description,
    ]
    .iter()
    .any(|field| contains_ci(field, term))
}

pub fn matches_criteria(listing: &Listing, criteria: &FilterCriteria) -> bool {
    if let Some(kind) = criteria.transaction {
        if listing.transaction != kind {
            return false;
        }
    }

    if let Some(location) = criteria.location.as_deref().map(str::trim) {
        if !location.is_empty() {
            let term = location.to_lowercase();
            let hit = contains_ci(&listing.address, &term)
                || contains_ci(&listing.neighborhood, &term)
                || contains_ci(&listing.city, &term);
            if !hit {
                return false;
            }
        }
    }

    let price = listing.price_or_zero();
    if criteria.price_min.is_some_and(|min| price < min) {
        return false;
    }
    if criteria.price_max.is_some_and(|max| price > max) {
        return false;
    }

    if let Some(constraint) = criteria.bedrooms {
        if !constraint.matches(listing.bedrooms.unwrap_or(0)) {
            return false;
        }
    }
    if let Some(constraint) = criteria.bathrooms {
        if !constraint.matches(listing.bathrooms.unwrap_or(0)) {
            return false;
        }
    }

    true
}

/// The single comparator behind every sort key.
pub fn compare(a: &Listing, b: &Listing, sort: SortKey) -> Ordering {
    match sort {
        // Highlighted first; nothing else is implied.
        SortKey::Relevance => b.highlighted.cmp(&a.highlighted),
        SortKey::PriceAsc => a.price_or_zero().cmp(&b.price_or_zero()),
        SortKey::PriceDesc => b.price_or_zero().cmp(&a.price_or_zero()),
        SortKey::AreaDesc => b.area_or_zero().total_cmp(&a.area_or_zero()),
        SortKey::Newest => {
            let ts = |l: &Listing| l.published_at.map(|t| t.timestamp_millis()).unwrap_or(0);
            ts(b).cmp(&ts(a))
        }
    }
}

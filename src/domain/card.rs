// src/domain/card.rs

use crate::domain::listing::{Listing, ListingImage, TransactionKind};
use chrono::{DateTime, Duration, Utc};
use std::borrow::Cow;

/// Listings published within this many days get the "new" badge.
pub const NEW_LISTING_DAYS: i64 = 30;

/// Flat presentation contract for one disclosed listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CardProps {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub location: String,
    pub city: String,
    pub price: i64,
    pub transaction: TransactionKind,
    pub area: Option<f64>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub parking_spots: Option<u32>,
    pub image: ListingImage,
    pub is_highlight: bool,
    pub is_new: bool,
    pub is_favorite: bool,
    pub toggle: FavoriteToggle,
}

/// Toggle action bound to one listing identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteToggle {
    pub listing_id: String,
}

impl FavoriteToggle {
    /// Endpoint the rendered button posts to.
    pub fn path(&self) -> String {
        format!("/favorites/{}/toggle", path_segment(&self.listing_id))
    }
}

/// Listing id escaped for use as one URL path segment.
pub fn path_segment(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}

impl CardProps {
    pub fn from_listing(listing: &Listing, is_favorite: bool, now: DateTime<Utc>) -> Self {
        // Prefer the street address, fall back to the neighborhood.
        let location = if listing.address.is_empty() {
            listing.neighborhood.clone()
        } else {
            listing.address.clone()
        };

        Self {
            id: listing.id.clone(),
            title: listing.title.clone(),
            slug: listing.route_key(),
            location,
            city: listing.city.clone(),
            price: listing.price_or_zero(),
            transaction: listing.transaction,
            area: listing.area,
            bedrooms: listing.bedrooms.filter(|n| *n > 0),
            bathrooms: listing.bathrooms.filter(|n| *n > 0),
            parking_spots: listing.parking_spots.filter(|n| *n > 0),
            image: listing.image.clone(),
            is_highlight: listing.highlighted,
            is_new: is_new_listing(listing.published_at, now),
            is_favorite,
            toggle: FavoriteToggle {
                listing_id: listing.id.clone(),
            },
        }
    }

    pub fn href(&self) -> String {
        format!("/imovel/{}", path_segment(&self.slug))
    }

    pub fn formatted_price(&self) -> String {
        format_price(self.price)
    }
}

pub fn is_new_listing(published_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    published_at
        .map(|ts| ts > now - Duration::days(NEW_LISTING_DAYS))
        .unwrap_or(false)
}

/// Brazilian reais without cents, e.g. `R$ 1.250.000`. Zero reads "Consulte".
pub fn format_price(price: i64) -> String {
    if price <= 0 {
        return "Consulte".to_string();
    }

    let digits = price.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("R$ {grouped}")
}

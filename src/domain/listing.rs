// src/domain/listing.rs

use crate::errors::ListingError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Whether a listing is offered for sale or for rent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Sale,
    Rent,
}

impl TransactionKind {
    /// Backend `finalidade` values: "Venda" is a sale, everything else is a rental.
    pub fn from_backend(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()) {
            Some(s) if s == "venda" || s == "sale" => TransactionKind::Sale,
            _ => TransactionKind::Rent,
        }
    }

    /// Parses a user-facing filter value. Unknown values mean "no constraint".
    pub fn parse_filter(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "venda" | "sale" => Some(TransactionKind::Sale),
            "aluguel" | "locacao" | "locação" | "rent" => Some(TransactionKind::Rent),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Sale => "sale",
            TransactionKind::Rent => "rent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Sale => "Venda",
            TransactionKind::Rent => "Aluguel",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListingImage {
    pub url: String,
    pub alt: String,
}

/// A property record as the catalog sees it.
/// Immutable for the duration of a browsing session.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub slug: Option<String>,
    pub description: String,

    // Location
    pub address: String,
    pub neighborhood: String,
    pub city: String,

    pub price: Option<i64>,
    pub transaction: TransactionKind,

    // Facts (any may be omitted by the backend)
    pub area: Option<f64>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub parking_spots: Option<u32>,

    pub published_at: Option<DateTime<Utc>>,
    pub highlighted: bool,
    pub image: ListingImage,
}

impl Listing {
    /// Route key used in card links. Falls back to `imovel-{id}`.
    pub fn route_key(&self) -> String {
        match self.slug.as_deref() {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => format!("imovel-{}", self.id),
        }
    }

    pub fn price_or_zero(&self) -> i64 {
        self.price.unwrap_or(0)
    }

    pub fn area_or_zero(&self) -> f64 {
        self.area.unwrap_or(0.0)
    }

    /// Mapped from the raw backend record. Only the identifier is mandatory.
    pub fn from_raw(raw: RawListing) -> Result<Self, ListingError> {
        let id = raw
            .id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ListingError::MissingId)?
            .to_string();

        let title = raw.title.unwrap_or_default();

        let image = raw
            .image
            .filter(|img| img.url.as_deref().is_some_and(|u| !u.is_empty()))
            .or_else(|| raw.gallery.and_then(|g| g.into_iter().next()))
            .map(|img| ListingImage {
                url: img.url.unwrap_or_default(),
                alt: img.alt.filter(|a| !a.is_empty()).unwrap_or_else(|| title.clone()),
            })
            .unwrap_or_else(|| ListingImage {
                url: String::new(),
                alt: title.clone(),
            });

        Ok(Listing {
            id,
            slug: raw.slug.filter(|s| !s.is_empty()),
            description: raw.description.unwrap_or_default(),
            address: raw.address.unwrap_or_default(),
            neighborhood: raw.neighborhood.unwrap_or_default(),
            city: raw.city.unwrap_or_default(),
            price: raw.price.map(|p| p.round() as i64),
            transaction: TransactionKind::from_backend(raw.purpose.as_deref()),
            area: raw.area.filter(|a| *a > 0.0),
            bedrooms: raw.bedrooms.and_then(to_count),
            bathrooms: raw.bathrooms.and_then(to_count),
            parking_spots: raw.parking_spots.and_then(to_count),
            published_at: raw.published_at.as_deref().and_then(parse_timestamp),
            highlighted: raw.highlighted.unwrap_or(false),
            image,
            title,
        })
    }
}

fn to_count(n: f64) -> Option<u32> {
    if n.is_finite() && n >= 0.0 {
        Some(n.round() as u32)
    } else {
        None
    }
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|ndt| ndt.and_utc())
        })
}

// raw
//  ├── _id
//  ├── titulo / slug / descricao
//  ├── endereco / bairro / cidade
//  ├── preco / finalidade
//  ├── areaUtil / dormitorios / banheiros / vagas
//  ├── destaque / dataPublicacao
//  ├── imagem  { imagemUrl, alt }
//  └── galeria [{ imagemUrl, alt }]

/// A listing document as delivered by the data backend.
///
/// Every field is optional and a value of the wrong type reads as absent, so a
/// bad optional field never costs the whole record.
#[derive(Debug, Default, Deserialize)]
pub struct RawListing {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(rename = "titulo", default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub slug: Option<String>,
    #[serde(rename = "descricao", default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(rename = "endereco", default, deserialize_with = "lenient")]
    pub address: Option<String>,
    #[serde(rename = "bairro", default, deserialize_with = "lenient")]
    pub neighborhood: Option<String>,
    #[serde(rename = "cidade", default, deserialize_with = "lenient")]
    pub city: Option<String>,
    #[serde(rename = "preco", default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(rename = "finalidade", default, deserialize_with = "lenient")]
    pub purpose: Option<String>,
    #[serde(rename = "areaUtil", default, deserialize_with = "lenient_number")]
    pub area: Option<f64>,
    #[serde(rename = "dormitorios", default, deserialize_with = "lenient_number")]
    pub bedrooms: Option<f64>,
    #[serde(rename = "banheiros", default, deserialize_with = "lenient_number")]
    pub bathrooms: Option<f64>,
    #[serde(rename = "vagas", default, deserialize_with = "lenient_number")]
    pub parking_spots: Option<f64>,
    #[serde(rename = "destaque", default, deserialize_with = "lenient")]
    pub highlighted: Option<bool>,
    #[serde(rename = "dataPublicacao", default, deserialize_with = "lenient")]
    pub published_at: Option<String>,
    #[serde(rename = "imagem", default, deserialize_with = "lenient")]
    pub image: Option<RawImage>,
    #[serde(rename = "galeria", default, deserialize_with = "lenient")]
    pub gallery: Option<Vec<RawImage>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawImage {
    #[serde(rename = "imagemUrl", default, deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub alt: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Numbers, or strings holding a plain number ("3", "850000.5").
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Document ids may come as strings or numbers.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

// src/catalog/params.rs
use crate::domain::criteria::{CountConstraint, FilterCriteria, SortKey, MAX_BATHROOM_BUCKET, MAX_BEDROOM_BUCKET};
use crate::domain::listing::TransactionKind;
use url::form_urlencoded;

/// Catalog state carried in the URL: search text, filters, sort and how many
/// cards the client already shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogQuery {
    pub search: String,
    pub criteria: FilterCriteria,
    pub sort: SortKey,
    pub shown: Option<usize>,
}

impl CatalogQuery {
    /// Lenient: unparsable values are treated as unset.
    pub fn parse(query: Option<&str>) -> Self {
        let mut out = CatalogQuery::default();

        let Some(query) = query else {
            return out;
        };

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "q" => out.search = value.to_string(),
                "tipo" => out.criteria.transaction = TransactionKind::parse_filter(value),
                "local" => out.criteria.location = Some(value.to_string()),
                "precoMin" => out.criteria.price_min = parse_price(value),
                "precoMax" => out.criteria.price_max = parse_price(value),
                "dormitorios" => {
                    out.criteria.bedrooms = value
                        .parse()
                        .ok()
                        .map(|n| CountConstraint::from_bucket(n, MAX_BEDROOM_BUCKET))
                }
                "banheiros" => {
                    out.criteria.bathrooms = value
                        .parse()
                        .ok()
                        .map(|n| CountConstraint::from_bucket(n, MAX_BATHROOM_BUCKET))
                }
                "ordem" => out.sort = SortKey::parse(value),
                "shown" => out.shown = value.parse().ok(),
                _ => {}
            }
        }

        out
    }

    /// Query string that reproduces this state, without `shown`.
    pub fn to_query_string(&self) -> String {
        let mut ser = form_urlencoded::Serializer::new(String::new());
        let c = &self.criteria;

        if !self.search.trim().is_empty() {
            ser.append_pair("q", &self.search);
        }
        if let Some(kind) = c.transaction {
            ser.append_pair("tipo", kind.as_str());
        }
        if let Some(location) = c.location.as_deref() {
            ser.append_pair("local", location);
        }
        if let Some(min) = c.price_min {
            ser.append_pair("precoMin", &min.to_string());
        }
        if let Some(max) = c.price_max {
            ser.append_pair("precoMax", &max.to_string());
        }
        if let Some(b) = c.bedrooms {
            ser.append_pair("dormitorios", &b.bucket().to_string());
        }
        if let Some(b) = c.bathrooms {
            ser.append_pair("banheiros", &b.bucket().to_string());
        }
        if self.sort != SortKey::Relevance {
            ser.append_pair("ordem", self.sort.as_str());
        }

        ser.finish()
    }

    /// Catalog page URL for this state.
    pub fn page_url(&self) -> String {
        let qs = self.to_query_string();
        if qs.is_empty() {
            "/".to_string()
        } else {
            format!("/?{qs}")
        }
    }

    /// Reload endpoint that lands back on this state.
    pub fn reload_url(&self) -> String {
        let qs = self.to_query_string();
        if qs.is_empty() {
            "/catalog/reload".to_string()
        } else {
            format!("/catalog/reload?{qs}")
        }
    }

    /// URL of the next "load more" request after `shown` cards.
    pub fn more_url(&self, shown: usize) -> String {
        let qs = self.to_query_string();
        if qs.is_empty() {
            format!("/catalog/more?shown={shown}")
        } else {
            format!("/catalog/more?{qs}&shown={shown}")
        }
    }
}

/// Prices may arrive as "500000" or "500.000"; non-positive means unset.
fn parse_price(raw: &str) -> Option<i64> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok().filter(|p: &i64| *p > 0)
}

// src/store/backend.rs
use crate::domain::listing::Listing;
use crate::errors::{CatalogError, CatalogResult};
use crate::store::source::{extract_records, map_records, ListingSource};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde_json::Value;
use std::time::{Duration, Instant};
use url::Url;

const USER_AGENT: &str = concat!("listing_catalog/", env!("CARGO_PKG_VERSION"));

/// Fetches the full listing collection from the hosted data backend.
pub struct HttpListingSource {
    client: Client,
    endpoint: Url,
}

impl HttpListingSource {
    pub fn new(endpoint: &str, timeout: Duration) -> CatalogResult<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| CatalogError::Config(format!("invalid listings url '{endpoint}': {e}")))?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn fetch_payload(&self) -> CatalogResult<Value> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let resp = self
            .client
            .get(self.endpoint.clone())
            .headers(headers)
            .send()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(CatalogError::Backend {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| CatalogError::JsonParse(e.to_string()))
    }
}

impl ListingSource for HttpListingSource {
    fn fetch(&self) -> CatalogResult<Vec<Listing>> {
        let start = Instant::now();
        let payload = self.fetch_payload()?;
        let listings = map_records(extract_records(payload)?);

        log::info!(
            "Fetched {} listings from {} in {:?}",
            listings.len(),
            self.endpoint,
            start.elapsed()
        );
        Ok(listings)
    }
}

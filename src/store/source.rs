// src/store/source.rs
use crate::domain::listing::{Listing, RawListing};
use crate::errors::{CatalogError, CatalogResult, ListingError};
use serde_json::Value;
use std::collections::HashSet;
use std::path::PathBuf;

/// Anything that can hand the store a full listing collection.
pub trait ListingSource: Send + Sync {
    fn fetch(&self) -> CatalogResult<Vec<Listing>>;
}

/// Pulls the record array out of a backend payload: either a bare array or an
/// object whose `result` field is the array.
pub fn extract_records(payload: Value) -> CatalogResult<Vec<Value>> {
    match payload {
        Value::Array(items) => Ok(items),
        Value::Object(mut obj) => match obj.remove("result") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(CatalogError::UnexpectedShape(
                "expected an array or an object with a 'result' array".to_string(),
            )),
        },
        _ => Err(CatalogError::UnexpectedShape(
            "listing payload is not an array".to_string(),
        )),
    }
}

fn map_record(value: Value) -> Result<Listing, ListingError> {
    let raw: RawListing =
        serde_json::from_value(value).map_err(|e| ListingError::Malformed(e.to_string()))?;
    Listing::from_raw(raw)
}

/// Maps raw records into listings. Records that cannot be mapped, and repeats
/// of an identifier already seen, are dropped; the batch always survives.
pub fn map_records(records: Vec<Value>) -> Vec<Listing> {
    let total = records.len();
    let mut seen = HashSet::new();
    let mut listings = Vec::with_capacity(total);

    for (i, record) in records.into_iter().enumerate() {
        match map_record(record) {
            Ok(listing) => {
                if seen.insert(listing.id.clone()) {
                    listings.push(listing);
                } else {
                    log::warn!("Skipping record {i}: duplicate id '{}'", listing.id);
                }
            }
            Err(e) => log::warn!("Skipping record {i}: {e}"),
        }
    }

    log::debug!("Mapped {} of {total} listing records", listings.len());
    listings
}

/// Reads a JSON export of the backend from disk.
#[derive(Debug, Clone)]
pub struct FileListingSource {
    path: PathBuf,
}

impl FileListingSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ListingSource for FileListingSource {
    fn fetch(&self) -> CatalogResult<Vec<Listing>> {
        let text = std::fs::read_to_string(&self.path)?;
        let payload: Value =
            serde_json::from_str(&text).map_err(|e| CatalogError::JsonParse(e.to_string()))?;
        Ok(map_records(extract_records(payload)?))
    }
}

/// Fixed in-memory collection.
#[derive(Debug, Clone, Default)]
pub struct StaticListingSource {
    listings: Vec<Listing>,
}

impl StaticListingSource {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }
}

impl ListingSource for StaticListingSource {
    fn fetch(&self) -> CatalogResult<Vec<Listing>> {
        Ok(self.listings.clone())
    }
}

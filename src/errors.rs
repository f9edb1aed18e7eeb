// errors.rs
use thiserror::Error;

/// Errors from the catalog engine and its collaborators
/// (listing backend, favorite storage, configuration).
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend returned HTTP {status}: {body}")]
    Backend { status: u16, body: String },

    #[error("Unexpected data shape: {0}")]
    UnexpectedShape(String),

    #[error("JSON parse error: {0}")]
    JsonParse(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a single raw record could not become a `Listing`.
/// The record is dropped; the rest of the batch survives.
#[derive(Debug, Error, PartialEq)]
pub enum ListingError {
    #[error("record has no identifier")]
    MissingId,

    #[error("malformed record: {0}")]
    Malformed(String),
}

/// Errors originating from either the server logic
/// (routing, missing resources, etc.) or downstream layers (DB, catalog).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Database Error: {0}")]
    DbError(String),

    #[error("Catalog Error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Internal Server Error")]
    InternalError,
}

pub type CatalogResult<T> = Result<T, CatalogError>;


mod backend;
mod listing_store;
mod source;

pub use backend::HttpListingSource;
pub use listing_store::{ListingStore, LoadStatus, LoadTicket};
pub use source::{
    extract_records, map_records, FileListingSource, ListingSource, StaticListingSource,
};

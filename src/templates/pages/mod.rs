pub mod catalog;

pub use catalog::{card_batch, catalog_page, catalog_results, CatalogPageVm};

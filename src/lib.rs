pub mod app;
pub mod catalog;
pub mod config;
pub mod db;
pub mod disclosure;
pub mod domain;
pub mod errors;
pub mod favorites;
pub mod query;
pub mod responses;
pub mod router;
pub mod store;
pub mod templates;

#[cfg(test)]
mod tests;

mod debounce;
mod pipeline;

pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use pipeline::{compare, evaluate, evaluate_indices, matches_criteria, matches_search};

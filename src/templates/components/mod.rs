pub mod card;
pub mod states;

pub use card::{card_placeholder, card_skeleton, favorite_button, favorite_button_for, property_card};
pub use states::{empty_state, end_of_results, failed_state, load_more_sentinel, loading_state};

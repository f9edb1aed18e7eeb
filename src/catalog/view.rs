// src/catalog/view.rs
use crate::domain::card::CardProps;

/// One disclosed position in the grid.
#[derive(Debug, Clone, PartialEq)]
pub enum CardSlot {
    /// Rich card content is mounted.
    Full(CardProps),
    /// Lightweight stand-in until the card's own visibility edge fires.
    Placeholder { id: String, position: usize },
}

impl CardSlot {
    pub fn id(&self) -> &str {
        match self {
            CardSlot::Full(props) => &props.id,
            CardSlot::Placeholder { id, .. } => id,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, CardSlot::Placeholder { .. })
    }
}

/// What the catalog screen should show right now.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogView {
    Loading,
    Failed { message: String },
    /// Loaded, but nothing matches the current query.
    Empty,
    Results {
        cards: Vec<CardSlot>,
        has_more: bool,
        total: usize,
    },
}

impl CatalogView {
    /// Window covers the whole filtered result.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, CatalogView::Results { has_more: false, .. })
    }
}

// src/domain/criteria.rs

use crate::domain::listing::TransactionKind;

/// Highest selectable bedroom bucket. Selecting it means "this many or more".
pub const MAX_BEDROOM_BUCKET: u32 = 4;
/// Highest selectable bathroom bucket. Selecting it means "this many or more".
pub const MAX_BATHROOM_BUCKET: u32 = 3;

/// Constraint on a room count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountConstraint {
    Exactly(u32),
    AtLeast(u32),
}

impl CountConstraint {
    /// Maps a selected bucket to a constraint; the top bucket is open-ended.
    pub fn from_bucket(selected: u32, max_bucket: u32) -> Self {
        if selected >= max_bucket {
            CountConstraint::AtLeast(max_bucket)
        } else {
            CountConstraint::Exactly(selected)
        }
    }

    pub fn matches(&self, count: u32) -> bool {
        match *self {
            CountConstraint::Exactly(n) => count == n,
            CountConstraint::AtLeast(n) => count >= n,
        }
    }

    /// Value to echo back into a filter form.
    pub fn bucket(&self) -> u32 {
        match *self {
            CountConstraint::Exactly(n) | CountConstraint::AtLeast(n) => n,
        }
    }
}

/// User-entered filter state. Every field is optional; `None` means no constraint.
/// Search text is kept separately because it passes through the debouncer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub transaction: Option<TransactionKind>,
    pub location: Option<String>,
    pub price_min: Option<i64>,
    pub price_max: Option<i64>,
    pub bedrooms: Option<CountConstraint>,
    pub bathrooms: Option<CountConstraint>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        *self == FilterCriteria::default()
    }

    pub fn with_bedrooms(mut self, selected: u32) -> Self {
        self.bedrooms = Some(CountConstraint::from_bucket(selected, MAX_BEDROOM_BUCKET));
        self
    }

    pub fn with_bathrooms(mut self, selected: u32) -> Self {
        self.bathrooms = Some(CountConstraint::from_bucket(selected, MAX_BATHROOM_BUCKET));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    AreaDesc,
    Newest,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Relevance,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::AreaDesc,
        SortKey::Newest,
    ];

    /// Unknown values fall back to relevance.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "price-asc" => SortKey::PriceAsc,
            "price-desc" => SortKey::PriceDesc,
            "area-desc" => SortKey::AreaDesc,
            "newest" => SortKey::Newest,
            _ => SortKey::Relevance,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::AreaDesc => "area-desc",
            SortKey::Newest => "newest",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Relevance => "Relevância",
            SortKey::PriceAsc => "Menor preço",
            SortKey::PriceDesc => "Maior preço",
            SortKey::AreaDesc => "Maior área",
            SortKey::Newest => "Mais recentes",
        }
    }
}

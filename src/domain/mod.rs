pub mod card;
pub mod criteria;
pub mod listing;

pub use card::{format_price, path_segment, CardProps, FavoriteToggle};
pub use criteria::{CountConstraint, FilterCriteria, SortKey};
pub use listing::{Listing, ListingImage, RawListing, TransactionKind};

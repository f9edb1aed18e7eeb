mod params;
mod session;
mod view;

pub use params::CatalogQuery;
pub use session::{CatalogSession, SessionOptions};
pub use view::{CardSlot, CatalogView};

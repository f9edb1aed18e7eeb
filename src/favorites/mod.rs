mod ledger;
mod storage;

pub use ledger::{FavoriteLedger, Subscription, FAVORITES_KEY};
pub use storage::{FavoriteStorage, MemoryStorage, SqliteStorage};

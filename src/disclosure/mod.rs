mod controller;
mod mount;

pub use controller::{DisclosureController, DEFAULT_BATCH_SIZE};
pub use mount::{MountTracker, DEFAULT_EAGER_CARDS};

// src/disclosure/mount.rs

use std::collections::HashSet;

/// Cards at positions below this are always rendered in full.
pub const DEFAULT_EAGER_CARDS: usize = 6;

/// Tracks which cards have had their rich content mounted.
///
/// Being inside the disclosed window and being mounted are separate questions:
/// cards past the eager prefix render a placeholder until their own
/// visibility edge fires. Once mounted, a card stays mounted (keyed by id)
/// across filter changes until `clear` is called.
#[derive(Debug, Clone, Default)]
pub struct MountTracker {
    eager: usize,
    mounted: HashSet<String>,
}

impl MountTracker {
    pub fn new(eager: usize) -> Self {
        Self {
            eager,
            mounted: HashSet::new(),
        }
    }

    pub fn eager(&self) -> usize {
        self.eager
    }

    pub fn is_mounted(&self, position: usize, id: &str) -> bool {
        position < self.eager || self.mounted.contains(id)
    }

    /// Visibility edge for one placeholder. Returns `true` only on the first
    /// signal for `id`, i.e. when the placeholder should swap to the full card.
    pub fn on_card_visible(&mut self, id: &str) -> bool {
        self.mounted.insert(id.to_string())
    }

    /// Forget all mounts (the collection was reloaded).
    pub fn clear(&mut self) {
        self.mounted.clear();
    }
}

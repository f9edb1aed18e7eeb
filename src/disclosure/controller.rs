// src/disclosure/controller.rs

/// Default number of cards revealed per batch.
pub const DEFAULT_BATCH_SIZE: usize = 12;

/// Growing window over an ordered result.
///
/// `visible_count` starts at one batch, only grows while the result stays the
/// same, and goes back to one batch whenever the result is replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisclosureController {
    batch_size: usize,
    visible_count: usize,
    total: usize,
}

impl DisclosureController {
    pub fn new(batch_size: usize, total: usize) -> Self {
        let batch_size = batch_size.max(1);
        Self {
            batch_size,
            visible_count: batch_size,
            total,
        }
    }

    /// Rebuilds a controller for a window that was already `shown` items wide,
    /// e.g. from a "load more" request. Never narrower than one batch.
    pub fn resume(batch_size: usize, total: usize, shown: usize) -> Self {
        let mut controller = Self::new(batch_size, total);
        controller.visible_count = shown.clamp(controller.batch_size, total.max(controller.batch_size));
        controller
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of items actually rendered.
    pub fn visible_len(&self) -> usize {
        self.visible_count.min(self.total)
    }

    pub fn has_more(&self) -> bool {
        self.visible_count < self.total
    }

    pub fn visible_slice<'a, T>(&self, ordered: &'a [T]) -> &'a [T] {
        &ordered[..self.visible_count.min(ordered.len())]
    }

    /// The ordered result was replaced (filter, sort, search or data change).
    pub fn reset(&mut self, total: usize) {
        self.total = total;
        self.visible_count = self.batch_size;
    }

    /// The sentinel after the last card became visible.
    /// Returns the newly revealed range, empty when there is nothing more.
    pub fn on_sentinel_visible(&mut self) -> std::ops::Range<usize> {
        let before = self.visible_len();
        if self.has_more() {
            self.visible_count = (self.visible_count + self.batch_size).min(self.total);
        }
        before..self.visible_len()
    }
}

impl Default for DisclosureController {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE, 0)
    }
}

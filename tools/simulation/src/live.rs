//! Registry of live (resting) order ids
//!
//! Backs cancel targeting: a flat vector for O(1) uniform sampling plus an
//! id→slot map so removal is a swap-with-last. Insert is idempotent and
//! removing an unknown id is a no-op.

use rand::Rng;
use std::collections::HashMap;
use types::ids::OrderId;

/// Flat set of currently resting order ids with O(1) sample and removal
#[derive(Debug, Clone, Default)]
pub struct LiveOrders {
    ids: Vec<OrderId>,
    pos: HashMap<OrderId, usize>,
}

impl LiveOrders {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` to the registry; already-present ids are left alone
    pub fn insert(&mut self, id: OrderId) {
        if self.pos.contains_key(&id) {
            return;
        }
        self.pos.insert(id, self.ids.len());
        self.ids.push(id);
    }

    /// Remove `id` by swapping the last slot into its place
    pub fn remove(&mut self, id: OrderId) {
        let Some(slot) = self.pos.remove(&id) else {
            return;
        };
        let last = self.ids.len() - 1;
        self.ids.swap_remove(slot);
        if slot < last {
            self.pos.insert(self.ids[slot], slot);
        }
    }

    /// Draw a uniformly random live id, or `None` when nothing rests
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<OrderId> {
        if self.ids.is_empty() {
            return None;
        }
        Some(self.ids[rng.gen_range(0..self.ids.len())])
    }

    /// Check whether `id` is registered
    pub fn contains(&self, id: OrderId) -> bool {
        self.pos.contains_key(&id)
    }

    /// All registered ids, in slot order
    pub fn ids(&self) -> &[OrderId] {
        &self.ids
    }

    /// Number of registered ids
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

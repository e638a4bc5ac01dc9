//! Pointer identity table
//!
//! Remaps volatile platform pointer ids to small ids that stay fixed for the
//! lifetime of one touch sequence.

use rustc_hash::FxHashMap;
use tether_core::{RawPointerId, StableId};

/// Live raw-id to stable-id mapping
///
/// Stable ids come from a monotonic counter, so an id is never handed out
/// again while the pointer that holds it is live. The counter restarts only
/// when the table is cleared on surface teardown.
#[derive(Debug)]
pub struct PointerIdTable {
    ids: FxHashMap<RawPointerId, StableId>,
    next: u32,
}

impl PointerIdTable {
    pub fn new() -> Self {
        Self {
            ids: FxHashMap::default(),
            next: 1,
        }
    }

    /// Existing mapping for `raw`, or a freshly issued one
    pub fn resolve(&mut self, raw: RawPointerId) -> StableId {
        if let Some(id) = self.ids.get(&raw) {
            return *id;
        }
        let id = StableId(self.next);
        self.next = self.next.wrapping_add(1);
        self.ids.insert(raw, id);
        tracing::trace!("pointer {} -> stable id {}", raw, id.get());
        id
    }

    /// Drop the mapping for `raw`; absent ids are ignored
    pub fn release(&mut self, raw: RawPointerId) -> Option<StableId> {
        self.ids.remove(&raw)
    }

    pub fn get(&self, raw: RawPointerId) -> Option<StableId> {
        self.ids.get(&raw).copied()
    }

    /// Number of live pointers
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.next = 1;
    }
}

impl Default for PointerIdTable {
    fn default() -> Self {
        Self::new()
    }
}

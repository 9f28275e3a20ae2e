//! Scene and hit-test membership containers.
//!
//! The host framework owns a scene container and a hit-test ("trigger")
//! container with the same add/remove contract; meshes are registered in both
//! by id so the host can render them and route clicks back to their owner.
//! [`IdSet`] is the bundled implementation for hosts that only need a flat
//! membership set.

use std::collections::HashSet;

/// Contract shared by the scene container and the hit-test trigger container.
///
/// Ids are the stable per-mesh keys the renderer uses to resolve picks back to
/// scene objects.
pub trait MeshCollection {
    fn add(&mut self, id: u32);

    /// Removing an id that was never added is a no-op.
    fn remove(&mut self, id: u32);
}

/// Flat id-set implementation of [`MeshCollection`].
#[derive(Debug, Default)]
pub struct IdSet {
    ids: HashSet<u32>,
}

impl IdSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl MeshCollection for IdSet {
    fn add(&mut self, id: u32) {
        self.ids.insert(id);
    }

    fn remove(&mut self, id: u32) {
        self.ids.remove(&id);
    }
}

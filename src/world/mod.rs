mod anchor;

pub use anchor::{Anchor, AnchorId};

use slotmap::SlotMap;

use crate::math::Placement;

/// World-space lookups for the objects that anchor segments.
pub trait AnchorPlacement {
    /// Returns where the anchor places its segment.
    ///
    /// Anchors without a known placement sit at the origin, unrotated.
    fn placement(&self, anchor: AnchorId) -> Placement;

    /// Returns `true` while the anchor is still present in the world.
    fn exists(&self, anchor: AnchorId) -> bool;
}

/// Arena of anchors keyed by generational [`AnchorId`]s.
///
/// Removing an anchor invalidates its id, so travelers still pointing at it
/// can be detected as stale.
#[derive(Debug, Default)]
pub struct AnchorStore {
    anchors: SlotMap<AnchorId, Anchor>,
}

impl AnchorStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an anchor and returns its ID.
    pub fn add(&mut self, anchor: Anchor) -> AnchorId {
        self.anchors.insert(anchor)
    }

    /// Removes an anchor, returning it if it was present.
    pub fn remove(&mut self, id: AnchorId) -> Option<Anchor> {
        self.anchors.remove(id)
    }

    /// Returns the anchor, if present.
    #[must_use]
    pub fn get(&self, id: AnchorId) -> Option<&Anchor> {
        self.anchors.get(id)
    }

    /// Returns a mutable reference to the anchor, if present.
    pub fn get_mut(&mut self, id: AnchorId) -> Option<&mut Anchor> {
        self.anchors.get_mut(id)
    }

    /// Number of anchors in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Returns `true` if the store holds no anchors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

impl AnchorPlacement for AnchorStore {
    fn placement(&self, anchor: AnchorId) -> Placement {
        self.anchors
            .get(anchor)
            .map_or_else(Placement::identity, Anchor::placement)
    }

    fn exists(&self, anchor: AnchorId) -> bool {
        self.anchors.contains_key(anchor)
    }
}

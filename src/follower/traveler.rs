use std::sync::Arc;

use crate::cache::SegmentDescriptor;
use crate::math::Vector3;
use crate::traversal::SegmentMeta;
use crate::world::AnchorId;

/// A path-following entity.
///
/// `meta` is `None` while the traveler is not attached to any path.
/// `heading` is the world direction it faces, refreshed on every move.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Traveler {
    pub meta: Option<SegmentMeta>,
    pub heading: Vector3,
}

impl Traveler {
    /// A detached traveler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A traveler already placed on a segment.
    #[must_use]
    pub fn on(meta: SegmentMeta) -> Self {
        Self {
            meta: Some(meta),
            heading: Vector3::zeros(),
        }
    }

    /// Attaches to a segment, replacing any previous placement.
    pub fn attach(&mut self, descriptor: Arc<SegmentDescriptor>, anchor: AnchorId, position: f64) {
        self.meta = Some(SegmentMeta::new(descriptor, anchor, position));
    }

    /// Detaches from the path, returning the last placement.
    pub fn detach(&mut self) -> Option<SegmentMeta> {
        self.meta.take()
    }

    /// Returns `true` while attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.meta.is_some()
    }
}

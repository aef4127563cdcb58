use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::SegmentDescriptor;
use crate::world::AnchorId;

use super::{SegmentEnd, SegmentMeta};

/// The segment chained to one end of another.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingResult {
    pub descriptor: Arc<SegmentDescriptor>,
    pub anchor: AnchorId,
}

impl MappingResult {
    /// Creates a new mapping result.
    #[must_use]
    pub fn new(descriptor: Arc<SegmentDescriptor>, anchor: AnchorId) -> Self {
        Self { descriptor, anchor }
    }
}

/// Resolves which segment continues a path past one end of the current one.
///
/// Implementations may use fixed tables, spatial lookups or switch state,
/// but must answer consistently for the same meta and end within a single
/// traversal call.
pub trait SegmentMapping {
    /// Returns the segment chained to `end` of the meta's segment, if any.
    fn next_segment(&self, meta: &SegmentMeta, end: SegmentEnd) -> Option<MappingResult>;
}

impl<F> SegmentMapping for F
where
    F: Fn(&SegmentMeta, SegmentEnd) -> Option<MappingResult>,
{
    fn next_segment(&self, meta: &SegmentMeta, end: SegmentEnd) -> Option<MappingResult> {
        self(meta, end)
    }
}

/// A fixed neighbour table keyed by anchor and end.
#[derive(Debug, Clone, Default)]
pub struct NeighborMapping {
    links: HashMap<(AnchorId, SegmentEnd), MappingResult>,
}

impl NeighborMapping {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a one-way link from `end` of `anchor` to `next`.
    pub fn link(&mut self, anchor: AnchorId, end: SegmentEnd, next: MappingResult) {
        self.links.insert((anchor, end), next);
    }

    /// Records links in both directions between two segment ends.
    pub fn connect(
        &mut self,
        (a, a_end): (&MappingResult, SegmentEnd),
        (b, b_end): (&MappingResult, SegmentEnd),
    ) {
        self.link(a.anchor, a_end, b.clone());
        self.link(b.anchor, b_end, a.clone());
    }

    /// Removes the link leaving `end` of `anchor`.
    pub fn unlink(&mut self, anchor: AnchorId, end: SegmentEnd) -> Option<MappingResult> {
        self.links.remove(&(anchor, end))
    }
}

impl SegmentMapping for NeighborMapping {
    fn next_segment(&self, meta: &SegmentMeta, end: SegmentEnd) -> Option<MappingResult> {
        self.links.get(&(meta.anchor, end)).cloned()
    }
}

use std::sync::Arc;

use crate::cache::SegmentDescriptor;
use crate::world::AnchorId;

/// One of the two ends of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentEnd {
    /// Distance `0`.
    Start,
    /// Distance `max_distance()`.
    End,
}

impl SegmentEnd {
    /// Returns the other end.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Start,
        }
    }

    /// The end a signed delta moves toward.
    #[must_use]
    pub fn toward(delta: f64) -> Self {
        if delta < 0.0 {
            Self::Start
        } else {
            Self::End
        }
    }
}

/// Where a traveler is: which segment, how far along it, and which way it faces.
///
/// `sign` is `+1` while increasing `position` moves the traveler forward and
/// `-1` after an odd number of reversing joints.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentMeta {
    pub position: f64,
    pub descriptor: Arc<SegmentDescriptor>,
    pub anchor: AnchorId,
    pub sign: i8,
}

impl SegmentMeta {
    /// Places a traveler `position` along the segment built from `descriptor`.
    #[must_use]
    pub fn new(descriptor: Arc<SegmentDescriptor>, anchor: AnchorId, position: f64) -> Self {
        Self {
            position,
            descriptor,
            anchor,
            sign: 1,
        }
    }

    /// Name of the current segment descriptor.
    #[must_use]
    pub fn segment_name(&self) -> &str {
        &self.descriptor.name
    }

    /// Returns `true` if both metas are on the same segment instance.
    #[must_use]
    pub fn same_segment(&self, other: &Self) -> bool {
        self.anchor == other.anchor && self.descriptor.name == other.descriptor.name
    }

    pub(crate) fn reverse(&mut self) {
        self.sign = -self.sign;
    }
}

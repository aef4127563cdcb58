use crate::geometry::Segment;
use crate::math::{Placement, Point3};

use super::SegmentEnd;

/// Squared distance under which two segment ends count as joined (0.09²).
pub const MATCH_EPSILON_SQ: f64 = 0.09 * 0.09;

/// How two chained segments meet, named `current_next`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointMatch {
    StartStart,
    StartEnd,
    EndStart,
    EndEnd,
}

impl JointMatch {
    /// Every joint, in the order they are tested.
    pub const ALL: [Self; 4] = [Self::StartStart, Self::StartEnd, Self::EndStart, Self::EndEnd];

    /// Joints that leave the current segment through `end`, continuing
    /// joints first.
    #[must_use]
    pub fn leaving(end: SegmentEnd) -> [Self; 2] {
        match end {
            SegmentEnd::Start => [Self::StartEnd, Self::StartStart],
            SegmentEnd::End => [Self::EndStart, Self::EndEnd],
        }
    }

    /// End of the current segment at the joint.
    #[must_use]
    pub fn current_end(self) -> SegmentEnd {
        match self {
            Self::StartStart | Self::StartEnd => SegmentEnd::Start,
            Self::EndStart | Self::EndEnd => SegmentEnd::End,
        }
    }

    /// End of the next segment at the joint, where the traveler enters it.
    #[must_use]
    pub fn next_end(self) -> SegmentEnd {
        match self {
            Self::StartStart | Self::EndStart => SegmentEnd::Start,
            Self::StartEnd | Self::EndEnd => SegmentEnd::End,
        }
    }

    /// Joining like ends reverses the direction of travel along the path.
    #[must_use]
    pub fn reverses(self) -> bool {
        self.current_end() == self.next_end()
    }

    /// The same joint seen from the other segment.
    #[must_use]
    pub fn swapped(self) -> Self {
        match self {
            Self::StartEnd => Self::EndStart,
            Self::EndStart => Self::StartEnd,
            same => same,
        }
    }

    fn coincides(self, current: &[Point3; 2], next: &[Point3; 2], epsilon_sq: f64) -> bool {
        let a = current[end_slot(self.current_end())];
        let b = next[end_slot(self.next_end())];
        (a - b).norm_squared() < epsilon_sq
    }
}

fn end_slot(end: SegmentEnd) -> usize {
    match end {
        SegmentEnd::Start => 0,
        SegmentEnd::End => 1,
    }
}

fn endpoints(segment: &(impl Segment + ?Sized), placement: &Placement) -> [Point3; 2] {
    [
        segment.start_point_in_world(placement),
        segment.end_point_in_world(placement),
    ]
}

/// Classifies how `current` and `next` meet in world space.
///
/// Tests Start-Start, Start-End, End-Start, End-End in that order and
/// returns the first pair of ends closer than `epsilon_sq` (squared
/// distance), or `None` if no ends coincide.
#[must_use]
pub fn segment_match(
    current: &(impl Segment + ?Sized),
    current_placement: &Placement,
    next: &(impl Segment + ?Sized),
    next_placement: &Placement,
    epsilon_sq: f64,
) -> Option<JointMatch> {
    let a = endpoints(current, current_placement);
    let b = endpoints(next, next_placement);
    JointMatch::ALL
        .into_iter()
        .find(|joint| joint.coincides(&a, &b, epsilon_sq))
}

/// Like [`segment_match`], but only for joints at the `departed` end of `current`.
///
/// A segment whose far end also happens to touch the neighbour (a short
/// link, or a loop chained to itself) is still entered through the end the
/// traveler actually left by.
#[must_use]
pub fn segment_match_at(
    departed: SegmentEnd,
    current: &(impl Segment + ?Sized),
    current_placement: &Placement,
    next: &(impl Segment + ?Sized),
    next_placement: &Placement,
    epsilon_sq: f64,
) -> Option<JointMatch> {
    let a = endpoints(current, current_placement);
    let b = endpoints(next, next_placement);
    JointMatch::leaving(departed)
        .into_iter()
        .find(|joint| joint.coincides(&a, &b, epsilon_sq))
}

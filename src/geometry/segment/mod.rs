mod arc_length;
mod curved;
mod linear;

pub use arc_length::{ArcLengthTable, ARC_SAMPLES};
pub use curved::CurvedSegment;
pub use linear::LinearSegment;

use crate::math::{Placement, Point3, Rotation, Vector3};

/// A traversable chain of sub-curves with arc-length parameterization.
///
/// Distances run from `0` at the start of the first sub-curve to
/// [`max_distance`](Segment::max_distance) at the end of the last. Queries take a
/// sub-curve `index` plus a local parameter `t ∈ [0, 1]`; both are clamped,
/// so out-of-range input evaluates at the nearest end instead of
/// extrapolating.
pub trait Segment {
    /// Number of sub-curves in the chain.
    fn sub_curve_count(&self) -> usize;

    /// Highest valid sub-curve index.
    fn max_index(&self) -> usize {
        self.sub_curve_count().saturating_sub(1)
    }

    /// Returns the sub-curve containing `distance`.
    ///
    /// Negative distances map to `0`, distances at or past the end map to
    /// [`max_index`](Segment::max_index).
    fn index(&self, distance: f64) -> usize;

    /// Converts a chain distance into the local parameter of sub-curve `index`.
    fn local_parameter(&self, index: usize, distance: f64) -> f64;

    /// Total length of the chain.
    fn max_distance(&self) -> f64;

    /// Point on sub-curve `index` at `t`, in segment space.
    fn point(&self, index: usize, t: f64) -> Point3;

    /// Unit tangent on sub-curve `index` at `t`, in segment space.
    fn tangent(&self, index: usize, t: f64) -> Vector3;

    /// Normal on sub-curve `index` at `t`, in segment space.
    fn normal(&self, index: usize, t: f64) -> Vector3;

    /// Resolves a chain distance to `(index, t)`.
    fn locate(&self, distance: f64) -> (usize, f64) {
        let index = self.index(distance);
        (index, self.local_parameter(index, distance))
    }

    /// Point transformed by the segment's world placement.
    fn point_in_world(&self, index: usize, t: f64, placement: &Placement) -> Point3 {
        placement.transform_point(&self.point(index, t))
    }

    /// Tangent rotated into world space.
    fn tangent_in_world(&self, index: usize, t: f64, rotation: &Rotation) -> Vector3 {
        rotation * self.tangent(index, t)
    }

    /// Normal rotated into world space.
    fn normal_in_world(&self, index: usize, t: f64, rotation: &Rotation) -> Vector3 {
        rotation * self.normal(index, t)
    }

    /// World position of the chain start.
    fn start_point_in_world(&self, placement: &Placement) -> Point3 {
        self.point_in_world(0, 0.0, placement)
    }

    /// World position of the chain end.
    fn end_point_in_world(&self, placement: &Placement) -> Point3 {
        self.point_in_world(self.max_index(), 1.0, placement)
    }

    /// Chain distance of the sample nearest to `world_point`.
    ///
    /// Brute force over [`ARC_SAMPLES`] samples per sub-curve, so the cost
    /// is O(samples), not O(log n).
    fn nearest_segment_position(&self, world_point: &Point3, placement: &Placement) -> f64 {
        arc_length::nearest_sample_distance(self.sub_curve_count(), world_point, |index, t| {
            self.point_in_world(index, t, placement)
        })
    }
}

/// A constructed segment of either shape.
#[derive(Debug, Clone)]
pub enum SegmentKind {
    /// A chain of cubic Bezier sub-curves.
    Curved(CurvedSegment),
    /// A polyline.
    Linear(LinearSegment),
}

impl From<CurvedSegment> for SegmentKind {
    fn from(segment: CurvedSegment) -> Self {
        Self::Curved(segment)
    }
}

impl From<LinearSegment> for SegmentKind {
    fn from(segment: LinearSegment) -> Self {
        Self::Linear(segment)
    }
}

impl Segment for SegmentKind {
    fn sub_curve_count(&self) -> usize {
        match self {
            Self::Curved(s) => s.sub_curve_count(),
            Self::Linear(s) => s.sub_curve_count(),
        }
    }

    fn index(&self, distance: f64) -> usize {
        match self {
            Self::Curved(s) => s.index(distance),
            Self::Linear(s) => s.index(distance),
        }
    }

    fn local_parameter(&self, index: usize, distance: f64) -> f64 {
        match self {
            Self::Curved(s) => s.local_parameter(index, distance),
            Self::Linear(s) => s.local_parameter(index, distance),
        }
    }

    fn max_distance(&self) -> f64 {
        match self {
            Self::Curved(s) => s.max_distance(),
            Self::Linear(s) => s.max_distance(),
        }
    }

    fn point(&self, index: usize, t: f64) -> Point3 {
        match self {
            Self::Curved(s) => s.point(index, t),
            Self::Linear(s) => s.point(index, t),
        }
    }

    fn tangent(&self, index: usize, t: f64) -> Vector3 {
        match self {
            Self::Curved(s) => s.tangent(index, t),
            Self::Linear(s) => s.tangent(index, t),
        }
    }

    fn normal(&self, index: usize, t: f64) -> Vector3 {
        match self {
            Self::Curved(s) => s.normal(index, t),
            Self::Linear(s) => s.normal(index, t),
        }
    }
}

use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::geometry::curve::CubicBezier;
use crate::math::{rotation_to, Point3, Vector3, TOLERANCE};

use super::{ArcLengthTable, Segment};

/// A segment made of cubic Bezier sub-curves.
///
/// Normals are carried along the chain by rotating the starting normal
/// through the shortest rotation from the starting tangent to the local
/// tangent, which stays stable on straight runs where a Frenet frame would
/// not.
#[derive(Debug, Clone)]
pub struct CurvedSegment {
    curves: Vec<CubicBezier>,
    starting_binormal: Vector3,
    starting_tangent: Vector3,
    starting_normal: Vector3,
    arc: ArcLengthTable,
}

impl CurvedSegment {
    /// Builds a curved segment and its arc-length table.
    ///
    /// # Errors
    ///
    /// Returns an error if `curves` is empty, the chain has zero length, or
    /// `starting_binormal` is zero-length or parallel to the starting tangent.
    pub fn new(curves: Vec<CubicBezier>, starting_binormal: Vector3) -> Result<Self> {
        let Some(first) = curves.first() else {
            return Err(GeometryError::Degenerate(
                "curved segment needs at least one cubic sub-curve".into(),
            )
            .into());
        };
        if starting_binormal.norm() < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }

        let starting_tangent = first.tangent_at(0.0);
        let starting_normal = starting_tangent.cross(&starting_binormal);
        if starting_normal.norm() < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let arc = ArcLengthTable::sample(curves.len(), |index, t| curves[index].point_at(t));
        if arc.max_distance() < TOLERANCE {
            return Err(GeometryError::Degenerate("curved segment has zero length".into()).into());
        }

        debug!(
            sub_curves = curves.len(),
            length = arc.max_distance(),
            "built curved segment"
        );
        Ok(Self {
            curves,
            starting_binormal,
            starting_tangent,
            starting_normal,
            arc,
        })
    }

    /// Returns the Bezier sub-curves.
    #[must_use]
    pub fn curves(&self) -> &[CubicBezier] {
        &self.curves
    }

    /// Returns the binormal the normal frame was seeded with.
    #[must_use]
    pub fn starting_binormal(&self) -> &Vector3 {
        &self.starting_binormal
    }

    /// Returns `tangent(0, 0) × starting_binormal`.
    #[must_use]
    pub fn starting_normal(&self) -> &Vector3 {
        &self.starting_normal
    }

    fn curve(&self, index: usize) -> &CubicBezier {
        &self.curves[index.min(self.curves.len() - 1)]
    }
}

impl Segment for CurvedSegment {
    fn sub_curve_count(&self) -> usize {
        self.curves.len()
    }

    fn index(&self, distance: f64) -> usize {
        self.arc.index(distance)
    }

    fn local_parameter(&self, index: usize, distance: f64) -> f64 {
        self.arc.local_parameter(index.min(self.max_index()), distance)
    }

    fn max_distance(&self) -> f64 {
        self.arc.max_distance()
    }

    fn point(&self, index: usize, t: f64) -> Point3 {
        self.curve(index).point_at(t)
    }

    fn tangent(&self, index: usize, t: f64) -> Vector3 {
        self.curve(index).tangent_at(t)
    }

    fn normal(&self, index: usize, t: f64) -> Vector3 {
        let tangent = self.tangent(index, t);
        rotation_to(&self.starting_tangent, &tangent, &self.starting_normal) * self.starting_normal
    }
}

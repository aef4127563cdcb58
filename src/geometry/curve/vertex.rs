use crate::math::{Point3, Vector3};

/// A polyline vertex carrying the binormal used to orient normals along the edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearVertex {
    pub point: Point3,
    pub binormal: Vector3,
}

impl LinearVertex {
    /// Creates a new vertex.
    #[must_use]
    pub const fn new(point: Point3, binormal: Vector3) -> Self {
        Self { point, binormal }
    }
}

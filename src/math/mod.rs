/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Unit quaternion orientation of a segment in world space.
pub type Rotation = nalgebra::UnitQuaternion<f64>;

/// Rigid placement of a segment: `world = rotation * local + translation`.
pub type Placement = nalgebra::Isometry3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Builds a placement from a world position and rotation.
#[must_use]
pub fn placement(position: Vector3, rotation: Rotation) -> Placement {
    Placement::from_parts(position.into(), rotation)
}

/// Shortest rotation taking `from` onto `to`.
///
/// `rotation_between` has no answer for opposite vectors; those get a half
/// turn about `fallback_axis`, or identity if that axis is degenerate too.
#[must_use]
pub fn rotation_to(from: &Vector3, to: &Vector3, fallback_axis: &Vector3) -> Rotation {
    Rotation::rotation_between(from, to).unwrap_or_else(|| {
        nalgebra::Unit::try_new(*fallback_axis, TOLERANCE).map_or_else(Rotation::identity, |axis| {
            Rotation::from_axis_angle(&axis, std::f64::consts::PI)
        })
    })
}

use crate::math::{Point3, Vector3};

/// A cubic Bezier sub-curve defined by four control points.
///
/// The curve passes through `p0` and `p3`; `p1` and `p2` shape the tangents
/// at either end.
///
/// ```text
/// B(t) = (1-t)³P₀ + 3(1-t)²tP₁ + 3(1-t)t²P₂ + t³P₃
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: Point3,
    pub p1: Point3,
    pub p2: Point3,
    pub p3: Point3,
}

impl CubicBezier {
    /// Creates a new cubic Bezier from its control points.
    #[must_use]
    pub const fn new(p0: Point3, p1: Point3, p2: Point3, p3: Point3) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Evaluates the curve at `t`, clamped to `[0, 1]`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3 {
        let t = t.clamp(0.0, 1.0);
        let s = 1.0 - t;
        Point3::from(
            self.p0.coords * (s * s * s)
                + self.p1.coords * (3.0 * s * s * t)
                + self.p2.coords * (3.0 * s * t * t)
                + self.p3.coords * (t * t * t),
        )
    }

    /// First derivative at `t`, clamped to `[0, 1]`.
    #[must_use]
    pub fn derivative_at(&self, t: f64) -> Vector3 {
        let t = t.clamp(0.0, 1.0);
        let s = 1.0 - t;
        (self.p1 - self.p0) * (3.0 * s * s)
            + (self.p2 - self.p1) * (6.0 * s * t)
            + (self.p3 - self.p2) * (3.0 * t * t)
    }

    /// Unit tangent at `t`.
    ///
    /// Falls back to the chord direction where the derivative vanishes
    /// (coincident control points at an end), and to zero for a point curve.
    #[must_use]
    pub fn tangent_at(&self, t: f64) -> Vector3 {
        self.derivative_at(t)
            .try_normalize(crate::math::TOLERANCE)
            .or_else(|| (self.p3 - self.p0).try_normalize(crate::math::TOLERANCE))
            .unwrap_or_else(Vector3::zeros)
    }
}

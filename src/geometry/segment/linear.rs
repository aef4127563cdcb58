use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::geometry::curve::LinearVertex;
use crate::math::{Point3, Vector3, TOLERANCE};

use super::arc_length::sub_curve_index;
use super::Segment;

/// A polyline segment: straight edges between consecutive vertices.
///
/// Tangents are constant along an edge and jump at vertices. Normals blend
/// linearly between `tangent × binormal` at the two ends of the edge.
#[derive(Debug, Clone)]
pub struct LinearSegment {
    vertices: Vec<LinearVertex>,
    edges: Vec<Vector3>,
    tangents: Vec<Vector3>,
    lengths: Vec<f64>,
}

impl LinearSegment {
    /// Builds a polyline segment.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two vertices are given or any edge has
    /// zero length.
    pub fn new(vertices: Vec<LinearVertex>) -> Result<Self> {
        if vertices.len() < 2 {
            return Err(GeometryError::Degenerate(format!(
                "linear segment needs at least 2 vertices, got {}",
                vertices.len()
            ))
            .into());
        }

        let count = vertices.len() - 1;
        let mut edges = Vec::with_capacity(count);
        let mut tangents = Vec::with_capacity(count);
        let mut lengths = Vec::with_capacity(count);
        let mut distance = 0.0;

        for (i, pair) in vertices.windows(2).enumerate() {
            let edge = pair[1].point - pair[0].point;
            let len = edge.norm();
            if len < TOLERANCE {
                return Err(
                    GeometryError::Degenerate(format!("polyline edge {i} has zero length")).into(),
                );
            }
            distance += len;
            edges.push(edge);
            tangents.push(edge / len);
            lengths.push(distance);
        }

        debug!(edges = count, length = distance, "built linear segment");
        Ok(Self {
            vertices,
            edges,
            tangents,
            lengths,
        })
    }

    /// Returns the polyline vertices.
    #[must_use]
    pub fn vertices(&self) -> &[LinearVertex] {
        &self.vertices
    }

    fn clamp_index(&self, index: usize) -> usize {
        index.min(self.edges.len() - 1)
    }
}

impl Segment for LinearSegment {
    fn sub_curve_count(&self) -> usize {
        self.edges.len()
    }

    fn index(&self, distance: f64) -> usize {
        sub_curve_index(&self.lengths, distance)
    }

    fn local_parameter(&self, index: usize, distance: f64) -> f64 {
        let index = self.clamp_index(index);
        let start = if index == 0 { 0.0 } else { self.lengths[index - 1] };
        ((distance - start) / (self.lengths[index] - start)).clamp(0.0, 1.0)
    }

    fn max_distance(&self) -> f64 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    fn point(&self, index: usize, t: f64) -> Point3 {
        let index = self.clamp_index(index);
        self.vertices[index].point + self.edges[index] * t.clamp(0.0, 1.0)
    }

    fn tangent(&self, index: usize, _t: f64) -> Vector3 {
        self.tangents[self.clamp_index(index)]
    }

    fn normal(&self, index: usize, t: f64) -> Vector3 {
        let index = self.clamp_index(index);
        let tangent = &self.tangents[index];
        let n1 = tangent.cross(&self.vertices[index].binormal);
        let n2 = tangent.cross(&self.vertices[index + 1].binormal);
        n1.lerp(&n2, t.clamp(0.0, 1.0))
    }
}

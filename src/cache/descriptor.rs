use std::sync::Arc;

use crate::error::{CacheError, Result};
use crate::geometry::{CubicBezier, CurvedSegment, LinearSegment, LinearVertex, SegmentKind};
use crate::math::Vector3;

use super::SegmentCache;

/// Control data for a Bezier-chain segment.
#[derive(Debug, Clone, PartialEq)]
pub struct CurvedPath {
    pub curves: Vec<CubicBezier>,
    pub binormal: Vector3,
}

/// Control data for a polyline segment.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearPath {
    pub vertices: Vec<LinearVertex>,
}

/// A named template a segment is built from.
///
/// The name is the segment's identity: two descriptors with the same name
/// share one cached segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentDescriptor {
    pub name: String,
    pub curved: Option<CurvedPath>,
    pub linear: Option<LinearPath>,
}

impl SegmentDescriptor {
    /// A descriptor for a Bezier chain.
    #[must_use]
    pub fn curved(name: impl Into<String>, curves: Vec<CubicBezier>, binormal: Vector3) -> Self {
        Self {
            name: name.into(),
            curved: Some(CurvedPath { curves, binormal }),
            linear: None,
        }
    }

    /// A descriptor for a polyline.
    #[must_use]
    pub fn linear(name: impl Into<String>, vertices: Vec<LinearVertex>) -> Self {
        Self {
            name: name.into(),
            curved: None,
            linear: Some(LinearPath { vertices }),
        }
    }

    /// Constructs the segment this descriptor describes.
    ///
    /// The curved shape wins when both are present.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor has no shape or its geometry is
    /// degenerate.
    pub fn build(&self) -> Result<SegmentKind> {
        if let Some(path) = &self.curved {
            return Ok(CurvedSegment::new(path.curves.clone(), path.binormal)?.into());
        }
        if let Some(path) = &self.linear {
            return Ok(LinearSegment::new(path.vertices.clone())?.into());
        }
        Err(CacheError::MissingShape(self.name.clone()).into())
    }
}

/// The set of segment descriptors a path may be assembled from.
#[derive(Debug, Clone, Default)]
pub struct PathDescriptor {
    pub descriptors: Vec<Arc<SegmentDescriptor>>,
}

impl PathDescriptor {
    /// Creates a path descriptor from its segment descriptors.
    #[must_use]
    pub fn new(descriptors: Vec<Arc<SegmentDescriptor>>) -> Self {
        Self { descriptors }
    }

    /// Looks up a member descriptor by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Arc<SegmentDescriptor>> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    /// Builds every member segment into `cache` ahead of traversal.
    ///
    /// # Errors
    ///
    /// Returns the first construction failure.
    pub fn preload(&self, cache: &SegmentCache) -> Result<()> {
        for descriptor in &self.descriptors {
            cache.get_segment(descriptor)?;
        }
        Ok(())
    }
}

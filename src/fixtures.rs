//! Shared builders for unit tests: straight rails placed in an anchor store.

use std::sync::Arc;

use crate::cache::{SegmentCache, SegmentDescriptor};
use crate::geometry::LinearVertex;
use crate::math::{Point3, Rotation, Vector3};
use crate::traversal::{MappingResult, NeighborMapping, SegmentEnd, SegmentMeta, TraversalEngine};
use crate::world::{Anchor, AnchorStore};

/// A straight rail along local +X with an up (+Z) normal.
pub fn straight(name: &str, length: f64) -> Arc<SegmentDescriptor> {
    Arc::new(SegmentDescriptor::linear(
        name,
        vec![
            LinearVertex::new(Point3::origin(), Vector3::y()),
            LinearVertex::new(Point3::new(length, 0.0, 0.0), Vector3::y()),
        ],
    ))
}

/// `quarters` quarter turns about +Z.
pub fn quarter_turn(quarters: f64) -> Rotation {
    Rotation::from_axis_angle(&Vector3::z_axis(), quarters * std::f64::consts::FRAC_PI_2)
}

#[derive(Default)]
pub struct Track {
    pub world: AnchorStore,
    pub cache: SegmentCache,
    pub mapping: NeighborMapping,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place(
        &mut self,
        descriptor: Arc<SegmentDescriptor>,
        position: Vector3,
        rotation: Rotation,
    ) -> MappingResult {
        let anchor = self.world.add(Anchor::located(position, rotation));
        MappingResult::new(descriptor, anchor)
    }

    pub fn connect(&mut self, a: &MappingResult, a_end: SegmentEnd, b: &MappingResult, b_end: SegmentEnd) {
        self.mapping.connect((a, a_end), (b, b_end));
    }

    pub fn meta(&self, on: &MappingResult, position: f64) -> SegmentMeta {
        SegmentMeta::new(Arc::clone(&on.descriptor), on.anchor, position)
    }

    pub fn engine(&self) -> TraversalEngine<'_, AnchorStore> {
        TraversalEngine::new(&self.cache, &self.world)
    }
}

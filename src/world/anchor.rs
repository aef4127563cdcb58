use crate::math::{placement, Placement, Rotation, Vector3};

slotmap::new_key_type! {
    /// Unique identifier for a segment anchor in the world.
    pub struct AnchorId;
}

/// A world object that places and orients a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    /// World position of the segment's local origin.
    pub position: Vector3,
    /// World orientation of the segment.
    pub rotation: Rotation,
}

impl Anchor {
    /// An anchor at an arbitrary world position.
    #[must_use]
    pub fn located(position: Vector3, rotation: Rotation) -> Self {
        Self { position, rotation }
    }

    /// An anchor snapped to an integer grid cell, such as a placed block.
    #[must_use]
    pub fn block(cell: [i32; 3], rotation: Rotation) -> Self {
        let [x, y, z] = cell;
        Self {
            position: Vector3::new(f64::from(x), f64::from(y), f64::from(z)),
            rotation,
        }
    }

    /// Returns the rigid placement of this anchor.
    #[must_use]
    pub fn placement(&self) -> Placement {
        placement(self.position, self.rotation)
    }
}

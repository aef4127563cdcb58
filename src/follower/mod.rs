mod events;
mod traveler;

pub use events::{SegmentEvent, SegmentEvents};
pub use traveler::Traveler;

use std::sync::Arc;

use crate::cache::SegmentDescriptor;
use crate::error::Result;
use crate::geometry::{Segment, SegmentKind};
use crate::math::{Placement, Point3, Vector3};
use crate::traversal::{SegmentMapping, SegmentMeta, TraversalEngine};
use crate::world::{AnchorId, AnchorPlacement};

/// Per-traveler queries and movement on top of a [`TraversalEngine`].
///
/// The `*_at` queries evaluate at the traveler's position, or at a
/// hypothetical position `delta` further along when a mapping is supplied.
/// Deltas are in the traveler's own direction of travel, like
/// [`move_by`](Self::move_by).
/// Look-ahead runs on a copy of the meta and never moves the traveler.
#[derive(Debug)]
pub struct PathFollower<'a, W: ?Sized> {
    engine: TraversalEngine<'a, W>,
}

impl<'a, W: AnchorPlacement + ?Sized> PathFollower<'a, W> {
    /// Creates a follower driven by `engine`.
    #[must_use]
    pub fn new(engine: TraversalEngine<'a, W>) -> Self {
        Self { engine }
    }

    /// Returns the underlying engine.
    #[must_use]
    pub fn engine(&self) -> &TraversalEngine<'a, W> {
        &self.engine
    }

    /// World tangent at the traveler's position, or `delta` ahead of it.
    #[must_use]
    pub fn tangent_at(
        &self,
        traveler: &Traveler,
        delta: f64,
        mapping: Option<&dyn SegmentMapping>,
    ) -> Option<Vector3> {
        self.evaluate(traveler, delta, mapping, |segment, index, t, placement| {
            segment.tangent_in_world(index, t, &placement.rotation)
        })
    }

    /// World point at the traveler's position, or `delta` ahead of it.
    #[must_use]
    pub fn point_at(
        &self,
        traveler: &Traveler,
        delta: f64,
        mapping: Option<&dyn SegmentMapping>,
    ) -> Option<Point3> {
        self.evaluate(traveler, delta, mapping, |segment, index, t, placement| {
            segment.point_in_world(index, t, placement)
        })
    }

    /// World normal at the traveler's position, or `delta` ahead of it.
    #[must_use]
    pub fn normal_at(
        &self,
        traveler: &Traveler,
        delta: f64,
        mapping: Option<&dyn SegmentMapping>,
    ) -> Option<Vector3> {
        self.evaluate(traveler, delta, mapping, |segment, index, t, placement| {
            segment.normal_in_world(index, t, &placement.rotation)
        })
    }

    /// Moves the traveler `delta` along its path.
    ///
    /// Positive `delta` is forward for the traveler: it is scaled by the meta
    /// sign before it reaches the engine, so a traveler keeps its direction
    /// of travel through reversing joints.
    ///
    /// The heading becomes the tangent at the new position, turned round
    /// when the meta sign is negative. If the move ends on a different
    /// anchor, `events` hears one exit for the old anchor and then one visit
    /// for the new, however many segments were passed on the way.
    ///
    /// Returns `false` if the traveler is detached or the path ran out; see
    /// [`TraversalEngine::update_meta`].
    pub fn move_by(
        &self,
        traveler: &mut Traveler,
        delta: f64,
        mapping: &(impl SegmentMapping + ?Sized),
        events: &mut (impl SegmentEvents + ?Sized),
    ) -> bool {
        let Some(meta) = traveler.meta.as_mut() else {
            return false;
        };
        if delta.abs() < f64::MIN_POSITIVE {
            return true;
        }

        let previous = meta.anchor;
        let settled = self.engine.update_meta(meta, delta * f64::from(meta.sign), mapping);

        if let Some(tangent) = self.tangent_of(meta) {
            traveler.heading = tangent * f64::from(meta.sign);
        }
        if meta.anchor != previous {
            events.on_exit_segment(previous);
            events.on_visit_segment(meta.anchor);
        }
        settled
    }

    /// Returns `true` if the traveler is attached to an anchor that still exists.
    #[must_use]
    pub fn is_valid(&self, traveler: &Traveler) -> bool {
        traveler
            .meta
            .as_ref()
            .is_some_and(|meta| self.engine.world().exists(meta.anchor))
    }

    /// Signed path distance of a world vector along the traveler's heading.
    #[must_use]
    pub fn find_delta(&self, traveler: &Traveler, vector: &Vector3) -> f64 {
        traveler.heading.dot(vector)
    }

    /// Attaches the traveler at the point of a segment nearest `world_point`.
    ///
    /// Returns the chosen distance along the segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment cannot be built.
    pub fn attach_nearest(
        &self,
        traveler: &mut Traveler,
        descriptor: Arc<SegmentDescriptor>,
        anchor: AnchorId,
        world_point: &Point3,
    ) -> Result<f64> {
        let segment = self.engine.cache().get_segment(&descriptor)?;
        let placement = self.engine.segment_placement(anchor);
        let position = segment.nearest_segment_position(world_point, &placement);

        let (index, t) = segment.locate(position);
        traveler.heading = segment.tangent_in_world(index, t, &placement.rotation);
        traveler.attach(descriptor, anchor, position);
        Ok(position)
    }

    fn tangent_of(&self, meta: &SegmentMeta) -> Option<Vector3> {
        self.evaluate_meta(meta, |segment, index, t, placement| {
            segment.tangent_in_world(index, t, &placement.rotation)
        })
    }

    fn evaluate<T>(
        &self,
        traveler: &Traveler,
        delta: f64,
        mapping: Option<&dyn SegmentMapping>,
        eval: impl Fn(&SegmentKind, usize, f64, &Placement) -> T,
    ) -> Option<T> {
        let meta = traveler.meta.as_ref()?;
        match mapping {
            Some(mapping) if delta.abs() > 0.0 => {
                let mut probe = meta.clone();
                let raw = delta * f64::from(probe.sign);
                if !self.engine.update_meta(&mut probe, raw, mapping) {
                    return None;
                }
                self.evaluate_meta(&probe, eval)
            }
            _ => self.evaluate_meta(meta, eval),
        }
    }

    fn evaluate_meta<T>(
        &self,
        meta: &SegmentMeta,
        eval: impl Fn(&SegmentKind, usize, f64, &Placement) -> T,
    ) -> Option<T> {
        let segment = self.engine.segment(&meta.descriptor).ok()?;
        let (index, t) = segment.locate(meta.position);
        Some(eval(segment.as_ref(), index, t, &self.engine.segment_placement(meta.anchor)))
    }
}

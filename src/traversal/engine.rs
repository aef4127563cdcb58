use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{SegmentCache, SegmentDescriptor};
use crate::error::TraversalError;
use crate::geometry::{Segment, SegmentKind};
use crate::math::Placement;
use crate::world::{AnchorId, AnchorPlacement};

use super::{segment_match, segment_match_at, JointMatch, SegmentEnd, SegmentMapping, SegmentMeta, TraversalConfig};

/// Advances [`SegmentMeta`]s along chained segments.
///
/// Borrows the segment cache and the anchor world for the duration of an
/// update; holds no state of its own beyond its configuration.
#[derive(Debug)]
pub struct TraversalEngine<'a, W: ?Sized> {
    cache: &'a SegmentCache,
    world: &'a W,
    config: TraversalConfig,
}

impl<'a, W: AnchorPlacement + ?Sized> TraversalEngine<'a, W> {
    /// Creates an engine with the default configuration.
    #[must_use]
    pub fn new(cache: &'a SegmentCache, world: &'a W) -> Self {
        Self {
            cache,
            world,
            config: TraversalConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: TraversalConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the segment cache.
    #[must_use]
    pub fn cache(&self) -> &'a SegmentCache {
        self.cache
    }

    /// Returns the anchor world.
    #[must_use]
    pub fn world(&self) -> &'a W {
        self.world
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &TraversalConfig {
        &self.config
    }

    /// Fetches (building on first use) the segment for `descriptor`.
    ///
    /// # Errors
    ///
    /// Returns [`TraversalError::Segment`] if the segment cannot be built.
    pub fn segment(&self, descriptor: &SegmentDescriptor) -> Result<Arc<SegmentKind>, TraversalError> {
        self.cache
            .get_segment(descriptor)
            .map_err(|err| TraversalError::Segment {
                name: descriptor.name.clone(),
                source: Box::new(err),
            })
    }

    /// World placement of the segment the meta is on.
    #[must_use]
    pub fn segment_placement(&self, anchor: AnchorId) -> Placement {
        self.world.placement(anchor)
    }

    /// Classifies how two anchored segments meet, using the configured tolerance.
    #[must_use]
    pub fn segment_match(
        &self,
        current: &SegmentKind,
        current_anchor: AnchorId,
        next: &SegmentKind,
        next_anchor: AnchorId,
    ) -> Option<JointMatch> {
        segment_match(
            current,
            &self.world.placement(current_anchor),
            next,
            &self.world.placement(next_anchor),
            self.config.match_epsilon_sq(),
        )
    }

    /// Moves `meta` by `delta` along the chain.
    ///
    /// Returns `true` once the traveler settles inside a segment with the
    /// whole delta consumed. Returns `false` if the chain ends, a joint does
    /// not line up, or the delta is not finite; the meta then stays at the
    /// last boundary it resolved.
    pub fn update_meta(
        &self,
        meta: &mut SegmentMeta,
        delta: f64,
        mapping: &(impl SegmentMapping + ?Sized),
    ) -> bool {
        match self.try_update_meta(meta, delta, mapping) {
            Ok(()) => true,
            Err(err) if err.is_path_end() => {
                debug!(%err, "path exhausted");
                false
            }
            Err(err) => {
                warn!(%err, "traversal failed");
                false
            }
        }
    }

    /// Like [`update_meta`](Self::update_meta), but reports why a step failed.
    ///
    /// # Errors
    ///
    /// - [`TraversalError::NonFiniteDelta`] before anything moves.
    /// - [`TraversalError::PathExhausted`] when no segment continues the chain.
    /// - [`TraversalError::JointMismatch`] when the mapped neighbour does not touch.
    /// - [`TraversalError::CrossingLimitExceeded`] after too many boundaries.
    /// - [`TraversalError::Segment`] when a segment cannot be built.
    pub fn try_update_meta(
        &self,
        meta: &mut SegmentMeta,
        delta: f64,
        mapping: &(impl SegmentMapping + ?Sized),
    ) -> Result<(), TraversalError> {
        if !delta.is_finite() {
            return Err(TraversalError::NonFiniteDelta(delta));
        }

        let mut segment = self.segment(&meta.descriptor)?;
        let mut remaining = delta;
        let mut crossings = 0;

        loop {
            if remaining.abs() < f64::MIN_POSITIVE {
                return Ok(());
            }

            // A meta placed past either end steps from the nearest end.
            let position = meta.position.clamp(0.0, segment.max_distance());
            let target = position + remaining;
            if target > 0.0 && target < segment.max_distance() {
                meta.position = target;
                return Ok(());
            }

            if crossings == self.config.max_crossings() {
                return Err(TraversalError::CrossingLimitExceeded(crossings));
            }

            let end = SegmentEnd::toward(remaining);
            let Some(next) = mapping.next_segment(meta, end) else {
                return Err(TraversalError::PathExhausted {
                    segment: meta.descriptor.name.clone(),
                    end,
                });
            };

            let consumed = match end {
                SegmentEnd::Start => position,
                SegmentEnd::End => segment.max_distance() - position,
            };
            let left_over = remaining - consumed * remaining.signum();

            let next_segment = self.segment(&next.descriptor)?;
            let joint = segment_match_at(
                end,
                segment.as_ref(),
                &self.world.placement(meta.anchor),
                next_segment.as_ref(),
                &self.world.placement(next.anchor),
                self.config.match_epsilon_sq(),
            )
            .ok_or_else(|| TraversalError::JointMismatch {
                from: meta.descriptor.name.clone(),
                to: next.descriptor.name.clone(),
            })?;

            remaining = left_over;
            meta.position = match joint.next_end() {
                SegmentEnd::Start => 0.0,
                SegmentEnd::End => next_segment.max_distance(),
            };
            if joint.reverses() {
                remaining = -remaining;
                meta.reverse();
            }
            debug!(
                from = %meta.descriptor.name,
                to = %next.descriptor.name,
                ?joint,
                remaining,
                "crossed segment boundary"
            );

            meta.descriptor = next.descriptor;
            meta.anchor = next.anchor;
            segment = next_segment;
            crossings += 1;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::fixtures::{quarter_turn, straight, Track};
    use crate::math::{Rotation, Vector3};
    use crate::traversal::NeighborMapping;

    #[test]
    fn moves_within_a_segment() {
        let mut track = Track::new();
        let a = track.place(straight("a", 5.0), Vector3::zeros(), Rotation::identity());
        let mut meta = track.meta(&a, 1.0);
        assert!(track.engine().update_meta(&mut meta, 2.5, &track.mapping));
        assert_relative_eq!(meta.position, 3.5);
        assert_eq!(meta.sign, 1);
    }

    #[test]
    fn crosses_end_to_start() {
        let mut track = Track::new();
        let a = track.place(straight("a", 5.0), Vector3::zeros(), Rotation::identity());
        let b = track.place(straight("b", 5.0), Vector3::new(5.0, 0.0, 0.0), Rotation::identity());
        track.connect(&a, SegmentEnd::End, &b, SegmentEnd::Start);

        let mut meta = track.meta(&a, 4.5);
        assert!(track.engine().update_meta(&mut meta, 1.0, &track.mapping));
        assert_eq!(meta.anchor, b.anchor);
        assert_eq!(meta.segment_name(), "b");
        assert_relative_eq!(meta.position, 0.5, epsilon = 1e-12);
        assert_eq!(meta.sign, 1);
    }

    #[test]
    fn reversal_free_round_trip() {
        let mut track = Track::new();
        let a = track.place(straight("a", 5.0), Vector3::zeros(), Rotation::identity());
        let b = track.place(straight("b", 5.0), Vector3::new(5.0, 0.0, 0.0), Rotation::identity());
        track.connect(&a, SegmentEnd::End, &b, SegmentEnd::Start);

        let original = track.meta(&a, 4.5);
        let mut meta = original.clone();
        let engine = track.engine();
        assert!(engine.update_meta(&mut meta, 1.0, &track.mapping));
        assert!(engine.update_meta(&mut meta, -1.0, &track.mapping));
        assert!(meta.same_segment(&original));
        assert_relative_eq!(meta.position, original.position, epsilon = 1e-12);
        assert_eq!(meta.sign, original.sign);
    }

    #[test]
    fn crosses_start_to_end() {
        let mut track = Track::new();
        let a = track.place(straight("a", 5.0), Vector3::new(-5.0, 0.0, 0.0), Rotation::identity());
        let b = track.place(straight("b", 5.0), Vector3::zeros(), Rotation::identity());
        track.connect(&b, SegmentEnd::Start, &a, SegmentEnd::End);

        let mut meta = track.meta(&b, 0.5);
        assert!(track.engine().update_meta(&mut meta, -1.0, &track.mapping));
        assert_eq!(meta.anchor, a.anchor);
        assert_relative_eq!(meta.position, 4.5, epsilon = 1e-12);
        assert_eq!(meta.sign, 1);
    }

    #[test]
    fn end_to_end_reverses() {
        let mut track = Track::new();
        let a = track.place(straight("a", 5.0), Vector3::zeros(), Rotation::identity());
        // Local start at world x=10, pointing back toward x=5.
        let b = track.place(straight("b", 5.0), Vector3::new(10.0, 0.0, 0.0), quarter_turn(2.0));
        track.connect(&a, SegmentEnd::End, &b, SegmentEnd::End);

        let mut meta = track.meta(&a, 4.5);
        assert!(track.engine().update_meta(&mut meta, 1.0, &track.mapping));
        assert_eq!(meta.anchor, b.anchor);
        assert_relative_eq!(meta.position, 4.5, epsilon = 1e-12);
        assert_eq!(meta.sign, -1);
    }

    #[test]
    fn start_to_start_reverses() {
        let mut track = Track::new();
        // Local start at the origin, running toward x=-5.
        let a = track.place(straight("a", 5.0), Vector3::zeros(), quarter_turn(2.0));
        let b = track.place(straight("b", 5.0), Vector3::zeros(), Rotation::identity());
        track.connect(&b, SegmentEnd::Start, &a, SegmentEnd::Start);

        let mut meta = track.meta(&b, 0.5);
        assert!(track.engine().update_meta(&mut meta, -1.0, &track.mapping));
        assert_eq!(meta.anchor, a.anchor);
        assert_relative_eq!(meta.position, 0.5, epsilon = 1e-12);
        assert_eq!(meta.sign, -1);
    }

    #[test]
    fn keeps_going_after_start_to_start() {
        let mut track = Track::new();
        let a = track.place(straight("a", 5.0), Vector3::zeros(), quarter_turn(2.0));
        let b = track.place(straight("b", 5.0), Vector3::zeros(), Rotation::identity());
        track.connect(&b, SegmentEnd::Start, &a, SegmentEnd::Start);
        let engine = track.engine();
        let world_x = |meta: &SegmentMeta| {
            let segment = engine.segment(&meta.descriptor).unwrap();
            let (index, t) = segment.locate(meta.position);
            segment.point_in_world(index, t, &engine.segment_placement(meta.anchor)).x
        };

        // Travelling toward -X, one unit per tick; the raw delta follows the sign.
        let mut meta = track.meta(&b, 1.5);
        let mut last_x = world_x(&meta);
        for _ in 0..4 {
            let delta = -f64::from(meta.sign);
            assert!(engine.update_meta(&mut meta, delta, &track.mapping));
            let x = world_x(&meta);
            assert_relative_eq!(x, last_x - 1.0, epsilon = 1e-9);
            last_x = x;
        }
        assert_eq!(meta.anchor, a.anchor);
        assert_eq!(meta.sign, -1);
        assert_relative_eq!(meta.position, 2.5, epsilon = 1e-9);
    }

    #[test]
    fn position_past_the_end_steps_from_the_end() {
        let mut track = Track::new();
        let a = track.place(straight("a", 5.0), Vector3::zeros(), Rotation::identity());
        let engine = track.engine();

        let mut meta = track.meta(&a, 7.0);
        assert!(engine.update_meta(&mut meta, -1.0, &track.mapping));
        assert_relative_eq!(meta.position, 4.0, epsilon = 1e-12);

        let mut meta = track.meta(&a, -3.0);
        assert!(engine.update_meta(&mut meta, 0.5, &track.mapping));
        assert_relative_eq!(meta.position, 0.5, epsilon = 1e-12);

        let mut meta = track.meta(&a, 7.0);
        let err = engine.try_update_meta(&mut meta, 1.0, &track.mapping).unwrap_err();
        assert!(matches!(err, TraversalError::PathExhausted { end: SegmentEnd::End, .. }));
    }

    #[test]
    fn crosses_several_segments_in_one_call() {
        let mut track = Track::new();
        let placed: Vec<_> = (0..5)
            .map(|i| {
                track.place(
                    straight(&format!("s{i}"), 5.0),
                    Vector3::new(5.0 * f64::from(i), 0.0, 0.0),
                    Rotation::identity(),
                )
            })
            .collect();
        for pair in placed.windows(2) {
            track.connect(&pair[0], SegmentEnd::End, &pair[1], SegmentEnd::Start);
        }

        let mut meta = track.meta(&placed[0], 1.0);
        assert!(track.engine().update_meta(&mut meta, 17.0, &track.mapping));
        assert_eq!(meta.anchor, placed[3].anchor);
        assert_relative_eq!(meta.position, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn missing_neighbour_leaves_meta_unchanged() {
        let mut track = Track::new();
        let a = track.place(straight("a", 5.0), Vector3::zeros(), Rotation::identity());
        let mut meta = track.meta(&a, 0.0);
        let before = meta.clone();

        let err = track
            .engine()
            .try_update_meta(&mut meta, -1.0, &track.mapping)
            .unwrap_err();
        assert!(err.is_path_end());
        assert_eq!(meta, before);
        assert!(!track.engine().update_meta(&mut meta, -1.0, &track.mapping));
        assert_eq!(meta, before);
    }

    #[test]
    fn exhaustion_partway_keeps_last_boundary() {
        let mut track = Track::new();
        let a = track.place(straight("a", 5.0), Vector3::zeros(), Rotation::identity());
        let b = track.place(straight("b", 5.0), Vector3::new(5.0, 0.0, 0.0), Rotation::identity());
        track.connect(&a, SegmentEnd::End, &b, SegmentEnd::Start);

        let mut meta = track.meta(&a, 4.5);
        assert!(!track.engine().update_meta(&mut meta, 10.0, &track.mapping));
        assert_eq!(meta.anchor, b.anchor);
        assert!(meta.position.abs() < f64::EPSILON);
    }

    #[test]
    fn misaligned_neighbour_is_a_joint_mismatch() {
        let mut track = Track::new();
        let a = track.place(straight("a", 5.0), Vector3::zeros(), Rotation::identity());
        let b = track.place(straight("b", 5.0), Vector3::new(6.0, 0.0, 0.0), Rotation::identity());
        track.connect(&a, SegmentEnd::End, &b, SegmentEnd::Start);

        let mut meta = track.meta(&a, 4.5);
        let before = meta.clone();
        let err = track
            .engine()
            .try_update_meta(&mut meta, 1.0, &track.mapping)
            .unwrap_err();
        assert!(matches!(err, TraversalError::JointMismatch { .. }));
        assert!(!err.is_path_end());
        assert_eq!(meta, before);
    }

    #[test]
    fn non_finite_delta_is_rejected() {
        let mut track = Track::new();
        let a = track.place(straight("a", 5.0), Vector3::zeros(), Rotation::identity());
        let mut meta = track.meta(&a, 2.0);
        let engine = track.engine();
        for delta in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                engine.try_update_meta(&mut meta, delta, &track.mapping),
                Err(TraversalError::NonFiniteDelta(_))
            ));
        }
        assert_relative_eq!(meta.position, 2.0);
    }

    #[test]
    fn negligible_delta_is_a_no_op() {
        let mut track = Track::new();
        let a = track.place(straight("a", 5.0), Vector3::zeros(), Rotation::identity());
        // At the very end with no neighbour: any real move would fail.
        let mut meta = track.meta(&a, 5.0);
        assert!(track.engine().update_meta(&mut meta, f64::MIN_POSITIVE / 2.0, &track.mapping));
        assert_relative_eq!(meta.position, 5.0);
    }

    #[test]
    fn closed_loop_is_bounded_by_crossing_limit() {
        let mut track = Track::new();
        let corners = [(0.0, 0.0), (5.0, 0.0), (5.0, 5.0), (0.0, 5.0)];
        let sides: Vec<_> = corners
            .iter()
            .zip(0..)
            .map(|(&(x, y), i)| {
                track.place(
                    straight(&format!("side{i}"), 5.0),
                    Vector3::new(x, y, 0.0),
                    quarter_turn(f64::from(i)),
                )
            })
            .collect();
        for i in 0..4 {
            track.connect(&sides[i], SegmentEnd::End, &sides[(i + 1) % 4], SegmentEnd::Start);
        }

        let mut meta = track.meta(&sides[0], 1.0);
        // Once round the square and a bit: 4 crossings.
        assert!(track.engine().update_meta(&mut meta, 21.0, &track.mapping));
        assert_eq!(meta.anchor, sides[0].anchor);
        assert_relative_eq!(meta.position, 2.0, epsilon = 1e-9);

        let capped = track.engine().with_config(TraversalConfig::new(0.0081, 3).unwrap());
        let mut meta = track.meta(&sides[0], 1.0);
        assert!(matches!(
            capped.try_update_meta(&mut meta, 21.0, &track.mapping),
            Err(TraversalError::CrossingLimitExceeded(3))
        ));
    }

    #[test]
    fn shapeless_descriptor_fails_traversal() {
        let mut track = Track::new();
        let a = track.place(straight("a", 5.0), Vector3::zeros(), Rotation::identity());
        let ghost = Arc::new(SegmentDescriptor {
            name: "ghost".into(),
            curved: None,
            linear: None,
        });
        let anchor = track.world.add(crate::world::Anchor::located(Vector3::zeros(), Rotation::identity()));
        let mut mapping = NeighborMapping::new();
        mapping.link(a.anchor, SegmentEnd::End, crate::traversal::MappingResult::new(ghost, anchor));

        let mut meta = track.meta(&a, 4.5);
        assert!(matches!(
            track.engine().try_update_meta(&mut meta, 1.0, &mapping),
            Err(TraversalError::Segment { .. })
        ));
    }

    #[test]
    fn engine_segment_match_uses_anchor_placement() {
        let mut track = Track::new();
        let a = track.place(straight("a", 5.0), Vector3::zeros(), Rotation::identity());
        let b = track.place(straight("b", 5.0), Vector3::new(5.0, 0.0, 0.0), Rotation::identity());
        let engine = track.engine();
        let sa = engine.segment(&a.descriptor).unwrap();
        let sb = engine.segment(&b.descriptor).unwrap();
        assert_eq!(engine.segment_match(&sa, a.anchor, &sb, b.anchor), Some(JointMatch::EndStart));
        assert_eq!(engine.segment_match(&sb, b.anchor, &sa, a.anchor), Some(JointMatch::StartEnd));
    }
}

mod descriptor;

pub use descriptor::{CurvedPath, LinearPath, PathDescriptor, SegmentDescriptor};

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::error::Result;
use crate::geometry::SegmentKind;

/// Lazily built, shared segments keyed by descriptor name.
///
/// Each name is constructed at most once: a miss takes the write lock and
/// re-checks before building, so concurrent first requests for the same
/// descriptor observe the same `Arc`. Cached segments are immutable, so a
/// poisoned lock is recovered rather than propagated.
#[derive(Debug, Default)]
pub struct SegmentCache {
    segments: RwLock<HashMap<String, Arc<SegmentKind>>>,
}

impl SegmentCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the segment for `descriptor`, building and caching it on first use.
    ///
    /// Failed constructions are not cached; the next request retries.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor has no shape or describes
    /// degenerate geometry.
    pub fn get_segment(&self, descriptor: &SegmentDescriptor) -> Result<Arc<SegmentKind>> {
        if let Some(segment) = self
            .segments
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&descriptor.name)
        {
            return Ok(Arc::clone(segment));
        }

        let mut segments = self.segments.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(segment) = segments.get(&descriptor.name) {
            return Ok(Arc::clone(segment));
        }

        debug!(name = %descriptor.name, "segment cache miss");
        let segment = Arc::new(descriptor.build().inspect_err(|err| {
            warn!(name = %descriptor.name, %err, "failed to build segment");
        })?);
        segments.insert(descriptor.name.clone(), Arc::clone(&segment));
        Ok(segment)
    }

    /// Returns `true` if a segment with this name has been built.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.segments
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Number of cached segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if nothing has been built yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every cached segment. Outstanding `Arc`s stay valid.
    pub fn clear(&self) {
        self.segments.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::thread;

    use super::*;
    use crate::geometry::{LinearVertex, Segment};
    use crate::math::{Point3, Vector3};

    fn rail(name: &str, length: f64) -> SegmentDescriptor {
        SegmentDescriptor::linear(
            name,
            vec![
                LinearVertex::new(Point3::origin(), Vector3::y()),
                LinearVertex::new(Point3::new(length, 0.0, 0.0), Vector3::y()),
            ],
        )
    }

    #[test]
    fn second_lookup_hits_cache() {
        let cache = SegmentCache::new();
        let d = rail("straight", 5.0);
        let a = cache.get_segment(&d).unwrap();
        let b = cache.get_segment(&d).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
        assert!(cache.contains("straight"));
    }

    #[test]
    fn name_is_the_identity() {
        let cache = SegmentCache::new();
        let first = cache.get_segment(&rail("shared", 5.0)).unwrap();
        // Same name, different geometry: the cached build wins.
        let second = cache.get_segment(&rail("shared", 9.0)).unwrap();
        assert!((second.max_distance() - first.max_distance()).abs() < 1e-12);
    }

    #[test]
    fn failures_are_not_cached() {
        let cache = SegmentCache::new();
        let broken = SegmentDescriptor::linear("broken", vec![]);
        assert!(cache.get_segment(&broken).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn concurrent_first_use_builds_once() {
        let cache = SegmentCache::new();
        let d = rail("contended", 3.0);
        let segments: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| cache.get_segment(&d).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        for s in &segments[1..] {
            assert!(Arc::ptr_eq(&segments[0], s));
        }
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_keeps_outstanding_segments_alive() {
        let cache = SegmentCache::new();
        let held = cache.get_segment(&rail("held", 2.0)).unwrap();
        cache.clear();
        assert!(cache.is_empty());
        assert!((held.max_distance() - 2.0).abs() < 1e-12);
    }
}

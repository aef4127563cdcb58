use thiserror::Error;

use crate::traversal::SegmentEnd;

/// Top-level error type for segment construction and traversal.
#[derive(Debug, Error)]
pub enum SegpathError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Traversal(#[from] TraversalError),
}

/// Errors raised while building or querying segment geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors raised by the segment cache.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("descriptor `{0}` carries neither a curved nor a linear path")]
    MissingShape(String),
}

/// Reasons a traversal step could not settle inside a segment.
///
/// `PathExhausted` is the ordinary end of a chain. `JointMismatch` means the
/// mapping returned a neighbour whose endpoints do not line up, which points
/// at bad authoring data rather than a runtime condition.
#[derive(Debug, Error)]
pub enum TraversalError {
    #[error("invalid traversal configuration: {0}")]
    InvalidConfig(String),

    #[error("traversal delta must be finite, got {0}")]
    NonFiniteDelta(f64),

    #[error("no segment is chained to the {end:?} end of `{segment}`")]
    PathExhausted { segment: String, end: SegmentEnd },

    #[error("segments `{from}` and `{to}` are chained but no endpoints coincide")]
    JointMismatch { from: String, to: String },

    #[error("traversal crossed more than {0} segment boundaries in one step")]
    CrossingLimitExceeded(usize),

    #[error("segment `{name}` is unavailable: {source}")]
    Segment {
        name: String,
        #[source]
        source: Box<SegpathError>,
    },
}

impl TraversalError {
    /// Returns `true` if this is the expected end of a path rather than a data defect.
    #[must_use]
    pub fn is_path_end(&self) -> bool {
        matches!(self, Self::PathExhausted { .. })
    }
}

/// Convenience type alias for results using [`SegpathError`].
pub type Result<T> = std::result::Result<T, SegpathError>;

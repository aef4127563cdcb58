pub mod curve;
pub mod segment;

pub use curve::{CubicBezier, LinearVertex};
pub use segment::{CurvedSegment, LinearSegment, Segment, SegmentKind, ARC_SAMPLES};

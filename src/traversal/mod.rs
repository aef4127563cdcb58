mod config;
mod engine;
mod joint;
mod mapping;
mod meta;

pub use config::{TraversalConfig, DEFAULT_MAX_CROSSINGS};
pub use engine::TraversalEngine;
pub use joint::{segment_match, segment_match_at, JointMatch, MATCH_EPSILON_SQ};
pub use mapping::{MappingResult, NeighborMapping, SegmentMapping};
pub use meta::{SegmentEnd, SegmentMeta};

pub mod cache;
pub mod error;
pub mod follower;
pub mod geometry;
pub mod math;
pub mod traversal;
pub mod world;

#[cfg(test)]
mod fixtures;

pub use error::{Result, SegpathError};

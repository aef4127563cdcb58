//! Drives a traveler along a small three-piece track and logs where it goes.
//!
//! ```text
//! cargo run --example follow
//! RUST_LOG=segpath=debug cargo run --example follow   # joint crossings too
//! ```

use std::sync::Arc;

use segpath::cache::{PathDescriptor, SegmentCache, SegmentDescriptor};
use segpath::follower::{PathFollower, SegmentEvent, Traveler};
use segpath::geometry::{CubicBezier, LinearVertex};
use segpath::math::{Point3, Rotation, Vector3};
use segpath::traversal::{MappingResult, NeighborMapping, SegmentEnd, TraversalEngine};
use segpath::world::{Anchor, AnchorStore};
use segpath::SegpathError;
use tracing::info;

const STEP: f64 = 0.75;

fn track_pieces() -> PathDescriptor {
    let rail = SegmentDescriptor::linear(
        "rail",
        vec![
            LinearVertex::new(Point3::origin(), Vector3::y()),
            LinearVertex::new(Point3::new(4.0, 0.0, 0.0), Vector3::y()),
        ],
    );
    // Quarter circle of radius 2, turning left.
    let bend = SegmentDescriptor::curved(
        "bend",
        vec![CubicBezier::new(
            Point3::origin(),
            Point3::new(1.1046, 0.0, 0.0),
            Point3::new(2.0, 0.8954, 0.0),
            Point3::new(2.0, 2.0, 0.0),
        )],
        Vector3::y(),
    );
    PathDescriptor::new(vec![Arc::new(rail), Arc::new(bend)])
}

fn main() -> Result<(), SegpathError> {
    // Default: WARN for everything, INFO for this demo and the library.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("follow=info".parse().unwrap_or_default())
        .add_directive("segpath=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pieces = track_pieces();
    let cache = SegmentCache::new();
    pieces.preload(&cache)?;

    let (Some(rail), Some(bend)) = (pieces.find("rail"), pieces.find("bend")) else {
        return Ok(());
    };

    let mut world = AnchorStore::new();
    let first = MappingResult::new(
        Arc::clone(rail),
        world.add(Anchor::located(Vector3::zeros(), Rotation::identity())),
    );
    let corner = MappingResult::new(
        Arc::clone(bend),
        world.add(Anchor::located(Vector3::new(4.0, 0.0, 0.0), Rotation::identity())),
    );
    let second = MappingResult::new(
        Arc::clone(rail),
        world.add(Anchor::located(
            Vector3::new(6.0, 2.0, 0.0),
            Rotation::from_axis_angle(&Vector3::z_axis(), std::f64::consts::FRAC_PI_2),
        )),
    );

    let mut mapping = NeighborMapping::new();
    mapping.connect((&first, SegmentEnd::End), (&corner, SegmentEnd::Start));
    mapping.connect((&corner, SegmentEnd::End), (&second, SegmentEnd::Start));

    let follower = PathFollower::new(TraversalEngine::new(&cache, &world));
    let mut traveler = Traveler::new();
    let start = follower.attach_nearest(
        &mut traveler,
        Arc::clone(&first.descriptor),
        first.anchor,
        &Point3::new(0.4, 1.0, 0.0),
    )?;
    info!(start, "attached");

    let mut events = Vec::new();
    while follower.move_by(&mut traveler, STEP, &mapping, &mut events) {
        if let Some(point) = follower.point_at(&traveler, 0.0, None) {
            info!(x = point.x, y = point.y, heading = ?traveler.heading, "moved");
        }
        for event in events.drain(..) {
            match event {
                SegmentEvent::Exited(anchor) => info!(?anchor, "left segment"),
                SegmentEvent::Visited(anchor) => info!(?anchor, "entered segment"),
            }
        }
    }
    info!(meta = ?traveler.meta, "end of track");
    Ok(())
}

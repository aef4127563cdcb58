mod bezier;
mod vertex;

pub use bezier::CubicBezier;
pub use vertex::LinearVertex;

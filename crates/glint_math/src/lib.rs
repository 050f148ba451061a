// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod interval;
mod ray;
pub mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{incident_cosine, is_unit, lerp, reflect, refract, unit_vector, UNIT_EPSILON};

/// RGB color with linear components, typically in [0, 1].
pub type Color = Vec3;

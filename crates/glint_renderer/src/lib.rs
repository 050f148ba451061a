//! Glint Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for scenes made of spheres.
//!
//! Each render splits the image into one contiguous tile per worker thread;
//! tiles carry their own seeded generator, so output is reproducible for a
//! given worker count and seed.

mod camera;
mod hittable;
mod material;
mod renderer;
mod sampling;
mod scene;
mod sphere;
mod tile;

pub use camera::{Camera, CameraBuilder, CameraError};
pub use hittable::{HitRecord, Hittable};
pub use material::{reflectance, Material, Scatter};
pub use renderer::{
    linear_to_gamma, quantize, radiance, render, render_pixel, Frame, RenderConfig, RenderError,
    Sky, QUANTIZE_TOLERANCE,
};
pub use sampling::{random_in_unit_disk, random_in_unit_sphere};
pub use scene::Scene;
pub use sphere::Sphere;
pub use tile::{chunk_size, partition, render_tile, Tile};

/// Re-export the math types used in the public API
pub use glint_math::{Color, Interval, Ray, Vec3};

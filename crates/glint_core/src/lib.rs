//! Glint Core - scene descriptions, presets and image output.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `SphereDesc`,
//!   `MaterialDesc`, `CameraDesc`, loadable from JSON
//! - **Presets**: named built-in scenes
//! - **Raster output**: plaintext PPM and PNG writers
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{output, presets};
//!
//! let scene = presets::build("trio", &mut rng)?;
//! // ... render into a Raster ...
//! output::save(&raster, "out.ppm")?;
//! ```

pub mod output;
pub mod presets;
pub mod raster;
pub mod scene;

// Re-export commonly used types
pub use output::{OutputError, OutputResult};
pub use raster::{Pixel, Raster};
pub use scene::{CameraDesc, MaterialDesc, SceneDescription, SceneError, SceneResult, SphereDesc};

//! Scene description types for Glint.
//!
//! A [`SceneDescription`] is the renderer-agnostic form of a scene: a camera
//! placement plus a list of spheres with their materials. Presets produce it,
//! JSON files deserialize into it, and the renderer builds its intersection
//! structures from it.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use glint_math::{Color, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while building or loading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown scene preset '{0}' (expected one of: {1})")]
    UnknownPreset(String, String),

    #[error("Sphere {index}: {message}")]
    InvalidSphere { index: usize, message: String },

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Surface material of a sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    /// Diffuse surface.
    Lambertian { albedo: Color },
    /// Mirror-like surface; `fuzziness` 0 is a perfect mirror, 1 very rough.
    Metal { albedo: Color, fuzziness: f32 },
    /// Clear refractive medium (1.0 = air, 1.5 = glass, 2.4 = diamond).
    Dielectric { refraction_index: f32 },
}

impl MaterialDesc {
    fn validate(&self) -> Result<(), String> {
        match *self {
            MaterialDesc::Lambertian { albedo } => validate_albedo(albedo),
            MaterialDesc::Metal { albedo, fuzziness } => {
                validate_albedo(albedo)?;
                if !(0.0..=1.0).contains(&fuzziness) {
                    return Err(format!("fuzziness {fuzziness} outside [0, 1]"));
                }
                Ok(())
            }
            MaterialDesc::Dielectric { refraction_index } => {
                if !(refraction_index.is_finite() && refraction_index > 0.0) {
                    return Err(format!("refraction index {refraction_index} must be > 0"));
                }
                Ok(())
            }
        }
    }
}

fn validate_albedo(albedo: Color) -> Result<(), String> {
    // Albedo above one would let a bounce add energy.
    if albedo.cmplt(Vec3::ZERO).any() || albedo.cmpgt(Vec3::ONE).any() || !albedo.is_finite() {
        return Err(format!("albedo {albedo} outside [0, 1]"));
    }
    Ok(())
}

/// A sphere in the scene.
///
/// A negative radius flips the surface normal inward, which is how a hollow
/// glass bubble is modelled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: Vec3,
    pub radius: f32,
    pub material: MaterialDesc,
}

impl SphereDesc {
    /// Create a new sphere description.
    pub fn new(center: Vec3, radius: f32, material: MaterialDesc) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

/// Camera placement and lens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraDesc {
    pub look_from: Vec3,
    pub look_at: Vec3,
    #[serde(default = "default_vup")]
    pub vup: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Lens diameter; 0 is a pinhole camera
    #[serde(default)]
    pub aperture: f32,
    /// Distance to the plane of perfect focus; defaults to the look-at distance
    #[serde(default)]
    pub focus_distance: Option<f32>,
}

fn default_vup() -> Vec3 {
    Vec3::Y
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            aperture: 0.0,
            focus_distance: None,
        }
    }
}

impl CameraDesc {
    /// Focus distance, falling back to the distance between eye and target.
    pub fn resolved_focus_distance(&self) -> f32 {
        self.focus_distance
            .unwrap_or_else(|| (self.look_from - self.look_at).length())
    }
}

/// A complete scene: camera plus spheres.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Scene name (preset id or file stem)
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub camera: CameraDesc,
    pub spheres: Vec<SphereDesc>,
}

impl SceneDescription {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>, camera: CameraDesc) -> Self {
        Self {
            name: name.into(),
            camera,
            spheres: Vec::new(),
        }
    }

    /// Add a sphere to the scene.
    pub fn add_sphere(&mut self, center: Vec3, radius: f32, material: MaterialDesc) {
        self.spheres.push(SphereDesc::new(center, radius, material));
    }

    /// Get sphere count.
    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    /// Check every sphere and the camera for values the tracer cannot use.
    pub fn validate(&self) -> SceneResult<()> {
        for (index, sphere) in self.spheres.iter().enumerate() {
            if !sphere.center.is_finite() {
                return Err(SceneError::InvalidSphere {
                    index,
                    message: format!("center {} is not finite", sphere.center),
                });
            }
            if !sphere.radius.is_finite() || sphere.radius == 0.0 {
                return Err(SceneError::InvalidSphere {
                    index,
                    message: format!("radius {} must be finite and non-zero", sphere.radius),
                });
            }
            sphere
                .material
                .validate()
                .map_err(|message| SceneError::InvalidSphere { index, message })?;
        }

        let camera = &self.camera;
        if !(camera.look_from.is_finite() && camera.look_at.is_finite() && camera.vup.is_finite()) {
            return Err(SceneError::InvalidCamera("non-finite position".to_string()));
        }
        if !(camera.aperture.is_finite() && camera.aperture >= 0.0) {
            return Err(SceneError::InvalidCamera(format!(
                "aperture {} must be >= 0",
                camera.aperture
            )));
        }
        Ok(())
    }

    /// Parse and validate a scene from a JSON string.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        let scene: SceneDescription = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Parse and validate a scene from a JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> SceneResult<Self> {
        let scene: SceneDescription = serde_json::from_reader(reader)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Load a scene from a JSON file. The file stem becomes the name if the
    /// file does not set one.
    pub fn load<P: AsRef<Path>>(path: P) -> SceneResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut scene = Self::from_reader(BufReader::new(file))?;
        if scene.name.is_empty() {
            if let Some(stem) = path.file_stem() {
                scene.name = stem.to_string_lossy().into_owned();
            }
        }
        log::info!("Loaded scene '{}' with {} spheres", scene.name, scene.sphere_count());
        Ok(scene)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

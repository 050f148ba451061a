//! Camera for ray generation.

use crate::sampling::random_in_unit_disk;
use glint_core::CameraDesc;
use glint_math::{unit_vector, Ray, Vec3};
use rand::Rng;
use thiserror::Error;

/// Errors for camera parameters that cannot form a valid view.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("Vertical field of view {0} must be within (0, 180) degrees")]
    FieldOfView(f32),

    #[error("Aspect ratio {0} must be positive")]
    AspectRatio(f32),

    #[error("Focus distance {0} must be positive")]
    FocusDistance(f32),

    #[error("Aperture {0} must be non-negative")]
    Aperture(f32),

    #[error("Camera position and look-at point coincide")]
    NoViewDirection,

    #[error("Up vector is parallel to the view direction")]
    DegenerateUp,
}

/// Builder for [`Camera`].
#[derive(Debug, Clone)]
pub struct CameraBuilder {
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,
    vfov: f32,         // Vertical field of view in degrees
    aspect_ratio: f32, // Width over height
    aperture: f32,     // Lens diameter
    focus_dist: Option<f32>,
}

impl CameraBuilder {
    /// Pinhole camera at the origin looking down -Z with a 90 degree FOV.
    pub fn new() -> Self {
        Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            aspect_ratio: 16.0 / 9.0,
            aperture: 0.0,
            focus_dist: None,
        }
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings. A `focus_dist` of `None` focuses on the look-at point.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: Option<f32>) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self
    }

    /// Set the image aspect ratio (width / height).
    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Derive the view basis and viewport.
    pub fn build(self) -> Result<Camera, CameraError> {
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(CameraError::FieldOfView(self.vfov));
        }
        if !(self.aspect_ratio > 0.0 && self.aspect_ratio.is_finite()) {
            return Err(CameraError::AspectRatio(self.aspect_ratio));
        }
        if !(self.aperture >= 0.0 && self.aperture.is_finite()) {
            return Err(CameraError::Aperture(self.aperture));
        }

        let view = self.look_from - self.look_at;
        if view.length_squared() == 0.0 {
            return Err(CameraError::NoViewDirection);
        }
        let focus_dist = self.focus_dist.unwrap_or_else(|| view.length());
        if !(focus_dist > 0.0 && focus_dist.is_finite()) {
            return Err(CameraError::FocusDistance(focus_dist));
        }

        // Camera basis
        let w = unit_vector(view);
        let side = self.vup.cross(w);
        if side.length_squared() < 1e-12 {
            return Err(CameraError::DegenerateUp);
        }
        let u = unit_vector(side);
        let v = w.cross(u);

        // Viewport scaled onto the focus plane
        let half_height = (self.vfov.to_radians() / 2.0).tan();
        let viewport_height = 2.0 * half_height * focus_dist;
        let viewport_width = viewport_height * self.aspect_ratio;

        let horizontal = viewport_width * u;
        let vertical = viewport_height * v;
        let lower_left_corner =
            self.look_from - horizontal / 2.0 - vertical / 2.0 - focus_dist * w;

        Ok(Camera {
            origin: self.look_from,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: self.aperture / 2.0,
        })
    }
}

impl Default for CameraBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Camera for generating rays into the scene.
///
/// All fields are derived once by [`CameraBuilder::build`]; the camera is
/// read-only afterwards and shared by every render worker.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Start building a camera.
    pub fn builder() -> CameraBuilder {
        CameraBuilder::new()
    }

    /// Build a camera from a scene description for an image with the given
    /// aspect ratio.
    pub fn from_desc(desc: &CameraDesc, aspect_ratio: f32) -> Result<Self, CameraError> {
        CameraBuilder::new()
            .with_position(desc.look_from, desc.look_at, desc.vup)
            .with_lens(desc.vfov, desc.aperture, desc.focus_distance)
            .with_aspect_ratio(aspect_ratio)
            .build()
    }

    /// Generate a ray through image-plane coordinates `(s, t)`.
    ///
    /// `(0, 0)` is the lower-left corner of the viewport and `(1, 1)` the
    /// upper-right. With a non-zero aperture the origin is jittered over the
    /// lens disk for depth of field. The returned direction is unit length.
    pub fn cast_ray<R: Rng + ?Sized>(&self, s: f32, t: f32, rng: &mut R) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;
        let direction = unit_vector(target - self.origin - offset);
        Ray::new(self.origin + offset, direction)
    }

    /// Eye position.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Orthonormal view basis `(u, v, w)`; `w` points away from the scene.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    /// Half the aperture.
    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }
}

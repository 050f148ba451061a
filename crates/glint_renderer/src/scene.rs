//! The set of objects a render intersects against.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Sphere,
};
use glint_core::{SceneDescription, SceneResult};
use glint_math::{Interval, Ray};

/// An unordered collection of spheres searched by linear scan.
///
/// Built once before rendering and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    spheres: Vec<Sphere>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a description and build the scene from it.
    pub fn from_description(desc: &SceneDescription) -> SceneResult<Self> {
        desc.validate()?;
        let spheres = desc
            .spheres
            .iter()
            .map(|s| Sphere::new(s.center, s.radius, Material::from(s.material)))
            .collect();
        Ok(Self { spheres })
    }

    /// Add an object to the scene.
    pub fn add(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    /// Closest hit with `t_min < t < t_max`.
    pub fn intersect(&self, ray: &Ray, t_min: f32, t_max: f32) -> Option<HitRecord<'_>> {
        self.hit(ray, Interval::new(t_min, t_max))
    }
}

impl FromIterator<Sphere> for Scene {
    fn from_iter<I: IntoIterator<Item = Sphere>>(iter: I) -> Self {
        Self {
            spheres: iter.into_iter().collect(),
        }
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;
        let mut closest_so_far = ray_t.max;

        for sphere in &self.spheres {
            if let Some(rec) = sphere.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

//! Surface materials and scattering.

use crate::{hittable::HitRecord, sampling::random_in_unit_sphere};
use glint_core::MaterialDesc;
use glint_math::{incident_cosine, reflect, refract, unit_vector, Color, Ray};
use rand::Rng;

/// Outcome of a ray scattering off a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scatter {
    /// Per-channel fraction of light carried along the scattered ray
    pub attenuation: Color,
    /// Outgoing ray with a unit direction
    pub ray: Ray,
}

/// How light interacts with a surface.
///
/// A closed set; adding a variant means extending every `match` on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Diffuse surface.
    Lambertian { albedo: Color },
    /// Specular surface. `fuzz` is the roughness, 0 = perfect mirror.
    Metal { albedo: Color, fuzz: f32 },
    /// Transparent medium that refracts and reflects.
    Dielectric { refraction_index: f32 },
}

impl Material {
    /// Create a new Lambertian material with the given albedo color.
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Create a new Dielectric material.
    ///
    /// - `refraction_index`: 1.0 = air, 1.5 = glass, 2.4 = diamond
    pub fn dielectric(refraction_index: f32) -> Self {
        debug_assert!(refraction_index > 0.0);
        Material::Dielectric { refraction_index }
    }

    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed. None of the current variants
    /// absorb, but callers must handle it.
    pub fn scatter<R: Rng + ?Sized>(
        &self,
        ray_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut R,
    ) -> Option<Scatter> {
        match *self {
            Material::Lambertian { albedo } => {
                // Random direction biased around the normal
                let mut direction = rec.normal + random_in_unit_sphere(rng);

                // Catch degenerate scatter direction
                if direction.length_squared() < 1e-8 {
                    direction = rec.normal;
                }

                Some(Scatter {
                    attenuation: albedo,
                    ray: Ray::new(rec.point, unit_vector(direction)),
                })
            }
            Material::Metal { albedo, fuzz } => {
                let reflected = reflect(unit_vector(ray_in.direction()), rec.normal);
                let mut direction = reflected + fuzz * random_in_unit_sphere(rng);
                if direction.length_squared() < 1e-8 {
                    direction = reflected;
                }

                Some(Scatter {
                    attenuation: albedo,
                    ray: Ray::new(rec.point, unit_vector(direction)),
                })
            }
            Material::Dielectric { refraction_index } => {
                let unit_direction = unit_vector(ray_in.direction());

                // Leaving the medium when travelling along the outward normal
                let (normal, eta) = if unit_direction.dot(rec.normal) > 0.0 {
                    (-rec.normal, refraction_index)
                } else {
                    (rec.normal, 1.0 / refraction_index)
                };

                let direction = match refract(unit_direction, normal, eta) {
                    // Total internal reflection
                    None => reflect(unit_direction, normal),
                    Some(refracted) => {
                        let cosine = incident_cosine(unit_direction, normal);
                        if rng.gen::<f32>() < reflectance(cosine, refraction_index) {
                            reflect(unit_direction, normal)
                        } else {
                            refracted
                        }
                    }
                };

                Some(Scatter {
                    attenuation: Color::ONE,
                    ray: Ray::new(rec.point, unit_vector(direction)),
                })
            }
        }
    }
}

impl From<MaterialDesc> for Material {
    fn from(desc: MaterialDesc) -> Self {
        match desc {
            MaterialDesc::Lambertian { albedo } => Material::lambertian(albedo),
            MaterialDesc::Metal { albedo, fuzziness } => Material::metal(albedo, fuzziness),
            MaterialDesc::Dielectric { refraction_index } => Material::dielectric(refraction_index),
        }
    }
}

/// Schlick's approximation for reflectance
pub fn reflectance(cosine: f32, refraction_index: f32) -> f32 {
    let r0 = ((1.0 - refraction_index) / (1.0 + refraction_index)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

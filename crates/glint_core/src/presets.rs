//! Built-in scenes, selected by id.

use glint_math::{Color, Vec3};
use rand::Rng;

use crate::scene::{CameraDesc, MaterialDesc, SceneDescription, SceneError, SceneResult};

/// Ids accepted by [`build`].
pub const PRESET_IDS: &[&str] = &["single", "trio", "hollow", "cover"];

/// Build the preset scene named `id`.
///
/// Presets that scatter objects randomly draw from `rng`, so the same seed
/// always produces the same layout.
pub fn build<R: Rng + ?Sized>(id: &str, rng: &mut R) -> SceneResult<SceneDescription> {
    let scene = match id {
        "single" => single(),
        "trio" => trio(),
        "hollow" => hollow(),
        "cover" => cover(rng),
        _ => {
            return Err(SceneError::UnknownPreset(
                id.to_string(),
                PRESET_IDS.join(", "),
            ))
        }
    };
    log::debug!("Built preset '{}' with {} spheres", id, scene.sphere_count());
    Ok(scene)
}

fn lambertian(r: f32, g: f32, b: f32) -> MaterialDesc {
    MaterialDesc::Lambertian {
        albedo: Color::new(r, g, b),
    }
}

const GLASS: MaterialDesc = MaterialDesc::Dielectric {
    refraction_index: 1.5,
};

/// One grey diffuse sphere in front of a pinhole camera.
fn single() -> SceneDescription {
    let mut scene = SceneDescription::new("single", CameraDesc::default());
    scene.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, lambertian(0.5, 0.5, 0.5));
    scene
}

fn trio_camera() -> CameraDesc {
    CameraDesc {
        look_from: Vec3::new(-2.0, 2.0, 1.0),
        look_at: Vec3::new(0.0, 0.0, -1.0),
        vup: Vec3::Y,
        vfov: 30.0,
        aperture: 0.0,
        focus_distance: None,
    }
}

/// Ground plus a diffuse, a metal and a glass sphere.
fn trio() -> SceneDescription {
    let mut scene = SceneDescription::new("trio", trio_camera());
    scene.add_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, lambertian(0.8, 0.8, 0.0));
    scene.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, lambertian(0.1, 0.2, 0.5));
    scene.add_sphere(Vec3::new(-1.0, 0.0, -1.0), 0.5, GLASS);
    scene.add_sphere(
        Vec3::new(1.0, 0.0, -1.0),
        0.5,
        MaterialDesc::Metal {
            albedo: Color::new(0.8, 0.6, 0.2),
            fuzziness: 0.3,
        },
    );
    scene
}

/// The trio with a hollow glass bubble on the left, seen through a lens.
fn hollow() -> SceneDescription {
    let look_from = Vec3::new(3.0, 3.0, 2.0);
    let look_at = Vec3::new(0.0, 0.0, -1.0);
    let camera = CameraDesc {
        look_from,
        look_at,
        vup: Vec3::Y,
        vfov: 20.0,
        aperture: 0.5,
        focus_distance: Some((look_from - look_at).length()),
    };

    let mut scene = trio();
    scene.name = "hollow".to_string();
    scene.camera = camera;
    scene.add_sphere(Vec3::new(-1.0, 0.0, -1.0), -0.45, GLASS);
    scene
}

/// Large ground, three feature spheres and a grid of small random ones.
fn cover<R: Rng + ?Sized>(rng: &mut R) -> SceneDescription {
    let camera = CameraDesc {
        look_from: Vec3::new(13.0, 2.0, 3.0),
        look_at: Vec3::ZERO,
        vup: Vec3::Y,
        vfov: 20.0,
        aperture: 0.1,
        focus_distance: Some(10.0),
    };
    let mut scene = SceneDescription::new("cover", camera);

    scene.add_sphere(Vec3::new(0.0, -1000.0, 0.0), 1000.0, lambertian(0.5, 0.5, 0.5));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat: f32 = rng.gen();
            let center = Vec3::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );

            // Keep clear of the big metal sphere
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                let albedo = Color::new(
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                );
                MaterialDesc::Lambertian { albedo }
            } else if choose_mat < 0.95 {
                let albedo = Color::new(
                    0.5 * (1.0 + rng.gen::<f32>()),
                    0.5 * (1.0 + rng.gen::<f32>()),
                    0.5 * (1.0 + rng.gen::<f32>()),
                );
                MaterialDesc::Metal {
                    albedo,
                    fuzziness: 0.5 * rng.gen::<f32>(),
                }
            } else {
                GLASS
            };
            scene.add_sphere(center, 0.2, material);
        }
    }

    scene.add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, GLASS);
    scene.add_sphere(Vec3::new(-4.0, 1.0, 0.0), 1.0, lambertian(0.4, 0.2, 0.1));
    scene.add_sphere(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        MaterialDesc::Metal {
            albedo: Color::new(0.7, 0.6, 0.5),
            fuzziness: 0.0,
        },
    );
    scene
}

//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Fixed bounce budget per path
//! - Jittered sub-pixel sampling for anti-aliasing
//! - Optional gamma correction
//! - Parallel rendering over static tiles

use std::collections::TryReserveError;

use crate::tile::{partition, render_tile};
use crate::{Camera, Hittable};
use glint_core::{Pixel, Raster};
use glint_math::{lerp, Color, Interval, Ray, Vec3};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Normalized headroom allowed above 1.0 before quantization, for float
/// round-off when averaging.
pub const QUANTIZE_TOLERANCE: f32 = 1e-3;

/// Errors that stop a render before it starts.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Image must have a non-zero size, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("Worker count must be at least 1")]
    NoWorkers,

    #[error("Failed to allocate output buffer for {pixels} pixels: {source}")]
    Allocation {
        pixels: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Vertical background gradient seen by rays that escape the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sky {
    /// Color for rays pointing straight down
    pub down: Color,
    /// Color for rays pointing straight up
    pub up: Color,
}

impl Default for Sky {
    fn default() -> Self {
        Self {
            down: Color::ONE,
            up: Color::new(0.5, 0.7, 1.0),
        }
    }
}

impl Sky {
    /// A sky of one flat color.
    pub fn uniform(color: Color) -> Self {
        Self {
            down: color,
            up: color,
        }
    }

    /// Background color for a unit direction.
    ///
    /// # Panics
    ///
    /// Panics if `direction` is not unit length.
    pub fn color(&self, direction: Vec3) -> Color {
        lerp(self.down, self.up, direction)
    }
}

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Jittered sample positions per pixel
    pub subpixels: u8,
    /// Camera rays traced through each sample position
    pub rays_per_subsample: u8,
    /// Maximum surface interactions per path
    pub rebound_limit: u8,
    /// Nearest accepted hit distance; keeps bounces off their own surface
    pub t_min: f32,
    /// Far clip distance
    pub t_max: f32,
    /// Background gradient
    pub sky: Sky,
    /// Apply gamma 2 before quantizing
    pub gamma_correct: bool,
    /// Tile `i` seeds its generator with `seed_base + i`
    pub seed_base: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            subpixels: 4,
            rays_per_subsample: 4,
            rebound_limit: 10,
            t_min: 0.001,
            t_max: f32::MAX,
            sky: Sky::default(),
            gamma_correct: false,
            seed_base: 0,
        }
    }
}

impl RenderConfig {
    /// Total radiance samples averaged per pixel.
    pub fn samples_per_pixel(&self) -> u32 {
        u32::from(self.subpixels) * u32::from(self.rays_per_subsample)
    }

    /// Reject configurations that cannot produce a meaningful image.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.samples_per_pixel() == 0 {
            return Err(RenderError::InvalidConfig(
                "subpixels and rays per subsample must be at least 1".to_string(),
            ));
        }
        if !(self.t_min >= 0.0 && self.t_min < self.t_max) {
            return Err(RenderError::InvalidConfig(format!(
                "hit interval ({}, {}) is empty",
                self.t_min, self.t_max
            )));
        }
        for (name, color) in [("down", self.sky.down), ("up", self.sky.up)] {
            if color.cmplt(Vec3::ZERO).any() || color.cmpgt(Vec3::ONE).any() || !color.is_finite() {
                return Err(RenderError::InvalidConfig(format!(
                    "sky {name} color {color} outside [0, 1]"
                )));
            }
        }
        Ok(())
    }

    fn interval(&self) -> Interval {
        Interval::new(self.t_min, self.t_max)
    }
}

/// Output image dimensions and quantization range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Channel value representing full intensity
    pub max_value: u16,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            width: 400,
            height: 225,
            max_value: 255,
        }
    }
}

impl Frame {
    pub fn new(width: u32, height: u32, max_value: u16) -> Self {
        Self {
            width,
            height,
            max_value,
        }
    }

    /// Total pixel count.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::EmptyImage {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_value == 0 {
            return Err(RenderError::InvalidConfig("max pixel value must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Estimate the light arriving along `ray`.
///
/// Follows the path through at most `remaining_bounces` scatter events. A
/// path that escapes returns the sky color weighted by every attenuation
/// along the way; a path that runs out of bounces on a surface, or is
/// absorbed, returns black.
pub fn radiance<R: Rng + ?Sized>(
    ray: &Ray,
    world: &dyn Hittable,
    config: &RenderConfig,
    remaining_bounces: u8,
    rng: &mut R,
) -> Color {
    let interval = config.interval();
    let mut ray = *ray;
    let mut throughput = Color::ONE;
    let mut remaining = remaining_bounces;

    loop {
        let Some(rec) = world.hit(&ray, interval) else {
            return throughput * config.sky.color(ray.direction());
        };

        if remaining == 0 {
            return Color::ZERO;
        }

        match rec.material.scatter(&ray, &rec, rng) {
            Some(scatter) => {
                throughput *= scatter.attenuation;
                ray = scatter.ray;
                remaining -= 1;
            }
            None => return Color::ZERO,
        }
    }
}

/// Render a single pixel with multi-sampling.
///
/// `index` is the row-major pixel index; row 0 is the top of the image.
/// Returns the averaged linear color.
pub fn render_pixel<R: Rng + ?Sized>(
    camera: &Camera,
    world: &dyn Hittable,
    frame: &Frame,
    config: &RenderConfig,
    index: usize,
    rng: &mut R,
) -> Color {
    let width = frame.width as usize;
    let column = (index % width) as f32;
    // Image rows count down from the top, viewport t counts up from the bottom
    let row_from_bottom = (frame.height as usize - 1 - index / width) as f32;

    let mut pixel_color = Color::ZERO;
    for _ in 0..config.subpixels {
        let s = (column + rng.gen::<f32>()) / frame.width as f32;
        let t = (row_from_bottom + rng.gen::<f32>()) / frame.height as f32;
        for _ in 0..config.rays_per_subsample {
            let ray = camera.cast_ray(s, t, rng);
            pixel_color += radiance(&ray, world, config, config.rebound_limit, rng);
        }
    }

    // Average the samples
    pixel_color / config.samples_per_pixel() as f32
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Scale a color in `[0, 1]` to integer channels in `[0, max_value]`.
///
/// # Panics
///
/// Panics if a channel is negative, NaN or above 1 beyond
/// [`QUANTIZE_TOLERANCE`]. That means a bounce added energy, which is a bug.
pub fn quantize(color: Color, gamma_correct: bool, max_value: u16) -> Pixel {
    let color = if gamma_correct {
        Color::new(
            linear_to_gamma(color.x),
            linear_to_gamma(color.y),
            linear_to_gamma(color.z),
        )
    } else {
        color
    };

    assert!(
        color.cmpge(Vec3::ZERO).all() && color.cmple(Vec3::splat(1.0 + QUANTIZE_TOLERANCE)).all(),
        "pixel color {color} exceeds [0, 1] (max value {max_value})"
    );

    let scale = f32::from(max_value);
    let channel = |c: f32| (c.min(1.0) * scale).round() as u16;
    [channel(color.x), channel(color.y), channel(color.z)]
}

/// Render the entire scene with `workers` threads.
///
/// The pixel range is split into one contiguous tile per worker. Each tile
/// owns a disjoint slice of the output buffer and its own generator seeded
/// from the tile index, so the result does not depend on thread scheduling.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    frame: &Frame,
    config: &RenderConfig,
    workers: usize,
) -> Result<Raster, RenderError> {
    frame.validate()?;
    config.validate()?;
    if workers == 0 {
        return Err(RenderError::NoWorkers);
    }

    let pixel_count = frame.pixel_count();
    let mut pixels: Vec<Pixel> = Vec::new();
    pixels
        .try_reserve_exact(pixel_count)
        .map_err(|source| RenderError::Allocation {
            pixels: pixel_count,
            source,
        })?;
    pixels.resize(pixel_count, [0; 3]);

    let tiles = partition(pixel_count, workers);

    // Hand each tile its own slice of the buffer
    let mut work = Vec::with_capacity(tiles.len());
    let mut rest: &mut [Pixel] = &mut pixels;
    for tile in tiles {
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(tile.len());
        work.push((tile, head));
        rest = tail;
    }
    debug_assert!(rest.is_empty());

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("glint-worker-{i}"))
        .build()?;

    log::info!(
        "Rendering {}x{} @ {} spp, {} bounces, {} workers",
        frame.width,
        frame.height,
        config.samples_per_pixel(),
        config.rebound_limit,
        workers
    );

    pool.install(|| {
        work.into_par_iter().for_each(|(tile, slice)| {
            render_tile(&tile, slice, camera, world, frame, config);
        });
    });

    Ok(Raster::from_pixels(frame.width, frame.height, frame.max_value, pixels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Scene, Sphere};
    use glint_math::unit_vector;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn single_sphere(material: Material) -> Scene {
        [Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, material)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_sky_gradient() {
        let sky = Sky::default();

        // Ray pointing down is the `down` color, up is the `up` color
        assert_eq!(sky.color(-Vec3::Y), Color::ONE);
        assert_eq!(sky.color(Vec3::Y), Color::new(0.5, 0.7, 1.0));

        let horizontal = sky.color(Vec3::X);
        assert!((horizontal - Color::new(0.75, 0.85, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_radiance_miss_is_sky() {
        let scene = single_sphere(Material::lambertian(Color::splat(0.5)));
        let config = RenderConfig::default();
        let mut rng = StdRng::seed_from_u64(1);

        let dir = unit_vector(Vec3::new(0.3, 0.8, 0.1));
        let ray = Ray::new(Vec3::ZERO, dir);
        for bounces in [0, 1, 10] {
            let color = radiance(&ray, &scene, &config, bounces, &mut rng);
            assert_eq!(color, config.sky.color(dir));
        }
    }

    #[test]
    fn test_radiance_hit_without_bounces_is_black() {
        let scene = single_sphere(Material::lambertian(Color::splat(0.5)));
        let config = RenderConfig::default();
        let mut rng = StdRng::seed_from_u64(1);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(radiance(&ray, &scene, &config, 0, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_radiance_is_deterministic() {
        let scene = single_sphere(Material::metal(Color::new(0.8, 0.6, 0.2), 0.4));
        let config = RenderConfig::default();
        let ray = Ray::new(Vec3::ZERO, unit_vector(Vec3::new(0.1, 0.05, -1.0)));

        let a = radiance(&ray, &scene, &config, 10, &mut StdRng::seed_from_u64(77));
        let b = radiance(&ray, &scene, &config, 10, &mut StdRng::seed_from_u64(77));
        assert_eq!(a, b);
    }

    #[test]
    fn test_radiance_does_not_amplify() {
        // With albedo and sky in [0, 1] no channel can exceed the brightest sky
        let mut scene = Scene::new();
        scene.add(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, Material::lambertian(Color::new(0.9, 0.9, 0.2))));
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, Material::metal(Color::new(1.0, 0.6, 0.2), 0.1)));
        scene.add(Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5, Material::lambertian(Color::ONE)));
        let config = RenderConfig::default();
        let brightest = config.sky.down.max(config.sky.up);
        let mut rng = StdRng::seed_from_u64(12);

        for i in 0..2000 {
            let dir = unit_vector(Vec3::new((i % 40) as f32 / 20.0 - 1.0, (i / 40) as f32 / 50.0 - 0.5, -1.0));
            let color = radiance(&Ray::new(Vec3::ZERO, dir), &scene, &config, 10, &mut rng);
            assert!(color.cmple(brightest + Vec3::splat(1e-6)).all(), "{color} brighter than sky");
            assert!(color.cmpge(Vec3::ZERO).all());
        }
    }

    #[test]
    fn test_glass_sphere_passes_light() {
        // Glass is lossless, so looking through it still reaches the sky
        let scene = single_sphere(Material::dielectric(1.5));
        let config = RenderConfig {
            sky: Sky::uniform(Color::splat(0.6)),
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(4);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let color = radiance(&ray, &scene, &config, 10, &mut rng);
        assert!((color - Color::splat(0.6)).length() < 1e-5);
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-0.5), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_quantize() {
        assert_eq!(quantize(Color::new(0.0, 0.5, 1.0), false, 255), [0, 128, 255]);
        assert_eq!(quantize(Color::new(0.25, 0.0, 1.0), true, 100), [50, 0, 100]);
        // Round-off just above one is tolerated
        assert_eq!(quantize(Color::splat(1.0 + 1e-6), false, 255), [255, 255, 255]);
    }

    #[test]
    #[should_panic(expected = "exceeds [0, 1]")]
    fn test_quantize_rejects_blow_up() {
        quantize(Color::new(0.2, 1.5, 0.2), false, 255);
    }

    #[test]
    #[should_panic(expected = "exceeds [0, 1]")]
    fn test_quantize_rejects_nan() {
        quantize(Color::new(f32::NAN, 0.0, 0.0), false, 255);
    }

    #[test]
    fn test_render_pixel_orientation() {
        // Black below the horizon, white above: the top row is brighter
        let scene = Scene::new();
        let camera = Camera::builder().with_aspect_ratio(1.0).build().unwrap();
        let frame = Frame::new(8, 8, 255);
        let config = RenderConfig {
            sky: Sky {
                down: Color::ZERO,
                up: Color::ONE,
            },
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(42);

        let top = render_pixel(&camera, &scene, &frame, &config, 3, &mut rng);
        let bottom = render_pixel(&camera, &scene, &frame, &config, 7 * 8 + 3, &mut rng);
        assert!(top.x > 0.5 && bottom.x < 0.5, "top {top}, bottom {bottom}");
    }

    #[test]
    fn test_render_pixel_hits_sphere() {
        let scene = single_sphere(Material::lambertian(Color::splat(0.5)));
        let camera = Camera::builder().with_aspect_ratio(1.0).build().unwrap();
        let frame = Frame::new(10, 10, 255);
        let config = RenderConfig {
            subpixels: 2,
            rays_per_subsample: 2,
            rebound_limit: 5,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(42);

        // Center pixel sees the sphere, which is darker than the sky
        let color = render_pixel(&camera, &scene, &frame, &config, 5 * 10 + 5, &mut rng);
        assert!(color.length() > 0.0);
        assert!(color.x < 0.75);
    }

    #[test]
    fn test_config_validation() {
        assert!(RenderConfig::default().validate().is_ok());

        let no_samples = RenderConfig {
            subpixels: 0,
            ..Default::default()
        };
        assert!(matches!(no_samples.validate(), Err(RenderError::InvalidConfig(_))));

        let inverted = RenderConfig {
            t_min: 5.0,
            t_max: 1.0,
            ..Default::default()
        };
        assert!(inverted.validate().is_err());

        let bright_sky = RenderConfig {
            sky: Sky::uniform(Color::splat(2.0)),
            ..Default::default()
        };
        assert!(bright_sky.validate().is_err());

        assert!(matches!(
            Frame::new(0, 10, 255).validate(),
            Err(RenderError::EmptyImage { width: 0, height: 10 })
        ));
        assert!(Frame::new(10, 10, 0).validate().is_err());
    }

    #[test]
    fn test_config_json_defaults() {
        let config: RenderConfig =
            serde_json::from_str(r#"{ "subpixels": 2, "rebound_limit": 3 }"#).unwrap();
        assert_eq!(config.subpixels, 2);
        assert_eq!(config.rebound_limit, 3);
        assert_eq!(config.rays_per_subsample, RenderConfig::default().rays_per_subsample);
        assert_eq!(config.sky, Sky::default());
    }

    #[test]
    fn test_render_zero_bounces_shows_background() {
        let _ = env_logger::builder().is_test(true).try_init();

        let scene = single_sphere(Material::lambertian(Color::splat(0.5)));
        let camera = Camera::builder().with_aspect_ratio(1.0).build().unwrap();
        let frame = Frame::new(16, 16, 255);
        let config = RenderConfig {
            subpixels: 3,
            rays_per_subsample: 2,
            rebound_limit: 0,
            sky: Sky::uniform(Color::new(0.2, 0.4, 0.6)),
            ..Default::default()
        };

        let raster = render(&camera, &scene, &frame, &config, 4).unwrap();
        let background = [51, 102, 153];

        // Corners only see the sky, the center only sees the sphere
        for (x, y) in [(0, 0), (15, 0), (0, 15), (15, 15)] {
            assert_eq!(raster.get(x, y), background);
        }
        assert_eq!(raster.get(7, 7), [0, 0, 0]);
        assert_eq!(raster.get(8, 8), [0, 0, 0]);

        // Edge pixels mix the two, never anything brighter
        for pixel in raster.pixels() {
            assert!(pixel.iter().zip(background).all(|(&c, b)| c <= b));
        }
    }

    #[test]
    fn test_render_matches_tiles() {
        let mut scene = single_sphere(Material::metal(Color::new(0.8, 0.6, 0.2), 0.3));
        scene.add(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, Material::lambertian(Color::splat(0.5))));
        let camera = Camera::builder().with_aspect_ratio(2.0).build().unwrap();
        let frame = Frame::new(12, 6, 255);
        let config = RenderConfig {
            subpixels: 2,
            rays_per_subsample: 2,
            rebound_limit: 4,
            seed_base: 100,
            ..Default::default()
        };

        let first = render(&camera, &scene, &frame, &config, 3).unwrap();
        let second = render(&camera, &scene, &frame, &config, 3).unwrap();
        assert_eq!(first, second);

        // Same output as rendering each tile on its own
        let mut expected = Vec::new();
        for tile in partition(frame.pixel_count(), 3) {
            let mut pixels = vec![[0u16; 3]; tile.len()];
            render_tile(&tile, &mut pixels, &camera, &scene, &frame, &config);
            expected.extend(pixels);
        }
        assert_eq!(first.pixels(), expected.as_slice());
    }

    #[test]
    fn test_render_more_workers_than_pixels() {
        let scene = Scene::new();
        let camera = Camera::builder().with_aspect_ratio(1.0).build().unwrap();
        let frame = Frame::new(2, 2, 1023);
        let config = RenderConfig {
            subpixels: 1,
            rays_per_subsample: 1,
            ..Default::default()
        };

        let raster = render(&camera, &scene, &frame, &config, 8).unwrap();
        assert_eq!(raster.pixels().len(), 4);
        assert_eq!(raster.max_value(), 1023);
        assert!(raster.pixels().iter().flatten().all(|&c| c <= 1023 && c > 0));
    }

    #[test]
    fn test_render_rejects_bad_input() {
        let scene = Scene::new();
        let camera = Camera::builder().build().unwrap();
        let config = RenderConfig::default();

        assert!(matches!(
            render(&camera, &scene, &Frame::new(4, 4, 255), &config, 0),
            Err(RenderError::NoWorkers)
        ));
        assert!(matches!(
            render(&camera, &scene, &Frame::new(4, 0, 255), &config, 2),
            Err(RenderError::EmptyImage { .. })
        ));
    }
}

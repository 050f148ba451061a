//! Glint - render a scene of spheres to a PPM or PNG image.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use glint_core::{output, presets, SceneDescription};
use glint_renderer::{render, Camera, Scene};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

mod cli;
mod logger;
mod settings;

use cli::Args;
use logger::init_logger;
use settings::RenderSettings;

fn load_scene(args: &Args) -> Result<SceneDescription> {
    match &args.scene_file {
        Some(path) => SceneDescription::load(path)
            .with_context(|| format!("Failed to load scene file {}", path.display())),
        None => {
            let mut rng = StdRng::seed_from_u64(args.scene_seed);
            Ok(presets::build(&args.scene, &mut rng)?)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let mut settings = match &args.config {
        Some(path) => RenderSettings::load(path)?,
        None => RenderSettings::default(),
    };
    settings.apply_args(&args);
    settings.frame.validate()?;
    settings.render.validate()?;

    let description = load_scene(&args)?;
    if let Some(path) = &args.dump_scene {
        std::fs::write(path, description.to_json()?)
            .with_context(|| format!("Failed to write scene to {}", path.display()))?;
        info!("Wrote scene description to {}", path.display());
    }

    let scene = Scene::from_description(&description)?;
    let camera = Camera::from_desc(&description.camera, settings.frame.aspect_ratio())
        .context("Invalid camera")?;
    info!("Scene '{}': {} spheres", description.name, scene.len());

    let start = Instant::now();
    let raster = render(
        &camera,
        &scene,
        &settings.frame,
        &settings.render,
        settings.workers(),
    )?;
    let elapsed = start.elapsed();

    let samples = settings.frame.pixel_count() as f64 * settings.render.samples_per_pixel() as f64;
    info!(
        "Rendered in {:?} ({:.2} Msamples/s)",
        elapsed,
        samples / elapsed.as_secs_f64().max(1e-9) / 1e6
    );

    output::save(&raster, &args.output)
        .with_context(|| format!("Failed to save image to {}", args.output.display()))?;
    Ok(())
}

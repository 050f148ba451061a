use std::path::PathBuf;

use clap::Parser;
use glint_core::presets::PRESET_IDS;

use crate::logger::LogLevel;

/// Command line arguments. Unset rendering options fall back to the
/// `--config` file, then to built-in defaults.
#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "Render a scene of spheres with a Monte Carlo path tracer")]
pub struct Args {
    /// Built-in scene to render
    #[arg(default_value = "trio", value_parser = clap::builder::PossibleValuesParser::new(PRESET_IDS.iter().copied()))]
    pub scene: String,

    /// Load the scene from a JSON file instead of a preset
    #[arg(long, conflicts_with = "scene")]
    pub scene_file: Option<PathBuf>,

    /// Seed for presets that place objects randomly
    #[arg(long, default_value_t = 0)]
    pub scene_seed: u64,

    /// Write the scene description as JSON before rendering
    #[arg(long)]
    pub dump_scene: Option<PathBuf>,

    /// JSON file with frame and render settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(short = 'W', long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(short = 'H', long)]
    pub height: Option<u32>,

    /// Largest channel value in the output
    #[arg(long)]
    pub max_value: Option<u16>,

    /// Jittered sample positions per pixel
    #[arg(short, long)]
    pub subpixels: Option<u8>,

    /// Rays traced through each sample position
    #[arg(short, long)]
    pub rays: Option<u8>,

    /// Maximum bounces per path
    #[arg(short, long)]
    pub bounces: Option<u8>,

    /// Nearest accepted hit distance
    #[arg(long)]
    pub t_min: Option<f32>,

    /// Far clip distance
    #[arg(long)]
    pub t_max: Option<f32>,

    /// Apply gamma 2 before quantizing
    #[arg(long)]
    pub gamma: bool,

    /// Base seed for the per-worker generators
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads (defaults to twice the available cores)
    #[arg(short = 'j', long)]
    pub workers: Option<usize>,

    /// Output file path (.ppm or .png)
    #[arg(short, long, default_value = "output.ppm")]
    pub output: PathBuf,

    /// Set the logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

//! Render settings loaded from JSON and overridden from the command line.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use glint_renderer::{Frame, RenderConfig};
use serde::{Deserialize, Serialize};

use crate::cli::Args;

/// Everything needed to turn a scene into an image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub frame: Frame,
    pub render: RenderConfig,
    /// Worker threads; `None` uses twice the available cores
    pub workers: Option<usize>,
}

impl RenderSettings {
    /// Load settings from a JSON file. Missing fields keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open settings file {}", path.display()))?;
        let settings = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Override fields with any options given on the command line.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(width) = args.width {
            self.frame.width = width;
        }
        if let Some(height) = args.height {
            self.frame.height = height;
        }
        if let Some(max_value) = args.max_value {
            self.frame.max_value = max_value;
        }
        if let Some(subpixels) = args.subpixels {
            self.render.subpixels = subpixels;
        }
        if let Some(rays) = args.rays {
            self.render.rays_per_subsample = rays;
        }
        if let Some(bounces) = args.bounces {
            self.render.rebound_limit = bounces;
        }
        if let Some(t_min) = args.t_min {
            self.render.t_min = t_min;
        }
        if let Some(t_max) = args.t_max {
            self.render.t_max = t_max;
        }
        if args.gamma {
            self.render.gamma_correct = true;
        }
        if let Some(seed) = args.seed {
            self.render.seed_base = seed;
        }
        if let Some(workers) = args.workers {
            self.workers = Some(workers);
        }
    }

    /// Worker count to render with.
    pub fn workers(&self) -> usize {
        self.workers.unwrap_or_else(default_workers)
    }
}

/// Twice the available cores.
pub fn default_workers() -> usize {
    std::thread::available_parallelism().map_or(4, |n| n.get()) * 2
}

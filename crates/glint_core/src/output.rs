//! Image output: plaintext PPM and PNG.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ImageBuffer, Rgb};
use thiserror::Error;

use crate::raster::Raster;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Unsupported output format '{0}' (expected .ppm or .png)")]
    UnsupportedFormat(String),
}

/// Result type for output operations.
pub type OutputResult<T> = Result<T, OutputError>;

/// Write `raster` as a plaintext PPM (`P3`).
///
/// Header `P3`, `width height`, max value, then one `r g b` line per pixel in
/// row-major order from the top-left.
pub fn write_ppm<W: Write>(raster: &Raster, writer: &mut W) -> OutputResult<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", raster.width(), raster.height())?;
    writeln!(writer, "{}", raster.max_value())?;

    for [r, g, b] in raster.pixels() {
        writeln!(writer, "{} {} {}", r, g, b)?;
    }
    writer.flush()?;
    Ok(())
}

/// Save `raster` to a PPM file.
pub fn save_ppm<P: AsRef<Path>>(raster: &Raster, path: P) -> OutputResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_ppm(raster, &mut writer)
}

/// Save `raster` to a PNG file.
///
/// Rasters with a max value up to 255 are written as 8-bit, deeper ones as
/// 16-bit. Channels are rescaled so `max_value` maps to full intensity.
pub fn save_png<P: AsRef<Path>>(raster: &Raster, path: P) -> OutputResult<()> {
    let max = u32::from(raster.max_value().max(1));

    if raster.max_value() <= u8::MAX as u16 {
        let bytes: Vec<u8> = raster
            .pixels()
            .iter()
            .flatten()
            .map(|&c| ((u32::from(c) * 255 + max / 2) / max) as u8)
            .collect();
        let img = ImageBuffer::<Rgb<u8>, _>::from_raw(raster.width(), raster.height(), bytes)
            .expect("raster length matches its dimensions");
        img.save(path)?;
    } else {
        let mut words: Vec<u16> = bytemuck::cast_slice(raster.pixels()).to_vec();
        if raster.max_value() != u16::MAX {
            for w in &mut words {
                *w = ((u32::from(*w) * 65535 + max / 2) / max) as u16;
            }
        }
        let img = ImageBuffer::<Rgb<u16>, _>::from_raw(raster.width(), raster.height(), words)
            .expect("raster length matches its dimensions");
        img.save(path)?;
    }
    Ok(())
}

/// Save `raster`, choosing the format from the file extension.
pub fn save<P: AsRef<Path>>(raster: &Raster, path: P) -> OutputResult<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "ppm" => save_ppm(raster, path)?,
        "png" => save_png(raster, path)?,
        _ => return Err(OutputError::UnsupportedFormat(path.display().to_string())),
    }
    log::info!("Saved {}x{} image to {}", raster.width(), raster.height(), path.display());
    Ok(())
}

//! Static tile partitioning of the pixel index space.
//!
//! The image's `N` pixels, in row-major order, are split into one contiguous
//! range per worker. Tiles never overlap, so each can be written through its
//! own slice of the output buffer without locking.

use std::ops::Range;

use crate::renderer::{quantize, render_pixel};
use crate::{Camera, Frame, Hittable, RenderConfig};
use glint_core::Pixel;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A contiguous range of row-major pixel indices owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// Worker index, also the generator seed offset
    pub index: usize,
    /// First pixel index (inclusive)
    pub start: usize,
    /// One past the last pixel index
    pub end: usize,
}

impl Tile {
    /// Create a new tile.
    pub fn new(index: usize, start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { index, start, end }
    }

    /// Get the total number of pixels in this tile.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Pixels per tile: `ceil(pixel_count / workers)`.
pub fn chunk_size(pixel_count: usize, workers: usize) -> usize {
    pixel_count.div_ceil(workers)
}

/// Split `[0, pixel_count)` into exactly `workers` tiles.
///
/// Tile `i` covers `[min(i * chunk, N), min((i + 1) * chunk, N))`. Trailing
/// tiles are empty when there are more workers than chunks.
///
/// # Panics
///
/// Panics if `workers` is zero.
pub fn partition(pixel_count: usize, workers: usize) -> Vec<Tile> {
    assert!(workers > 0, "cannot partition work across zero workers");
    let chunk = chunk_size(pixel_count, workers);

    (0..workers)
        .map(|i| {
            let start = (i * chunk).min(pixel_count);
            let end = ((i + 1) * chunk).min(pixel_count);
            Tile::new(i, start, end)
        })
        .collect()
}

/// Render every pixel of `tile` into `pixels`.
///
/// `pixels[k]` receives pixel `tile.start + k`. The tile seeds its own
/// generator from `config.seed_base + tile.index`.
pub fn render_tile(
    tile: &Tile,
    pixels: &mut [Pixel],
    camera: &Camera,
    world: &dyn Hittable,
    frame: &Frame,
    config: &RenderConfig,
) {
    assert_eq!(pixels.len(), tile.len(), "tile {} buffer size mismatch", tile.index);
    let mut rng = StdRng::seed_from_u64(config.seed_base.wrapping_add(tile.index as u64));

    for (index, pixel) in tile.range().zip(pixels.iter_mut()) {
        let color = render_pixel(camera, world, frame, config, index, &mut rng);
        *pixel = quantize(color, config.gamma_correct, frame.max_value);
    }

    log::debug!(
        "Tile {} finished: pixels {}..{}",
        tile.index,
        tile.start,
        tile.end
    );
}

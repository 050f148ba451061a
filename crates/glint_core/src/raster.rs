//! Final quantized image produced by a render.

/// One RGB pixel, each channel in `[0, max_value]`.
pub type Pixel = [u16; 3];

/// A `width x height` grid of quantized pixels in row-major order, starting
/// at the top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    max_value: u16,
    pixels: Vec<Pixel>,
}

impl Raster {
    /// Wrap an already-filled pixel buffer.
    ///
    /// # Panics
    ///
    /// Panics if the buffer length is not `width * height` or a channel
    /// exceeds `max_value`.
    pub fn from_pixels(width: u32, height: u32, max_value: u16, pixels: Vec<Pixel>) -> Self {
        assert_eq!(
            pixels.len(),
            width as usize * height as usize,
            "pixel buffer does not match {width}x{height}"
        );
        debug_assert!(pixels.iter().flatten().all(|&c| c <= max_value));
        Self {
            width,
            height,
            max_value,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Largest channel value.
    pub fn max_value(&self) -> u16 {
        self.max_value
    }

    /// All pixels, row-major from the top-left.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Get the pixel at column `x`, row `y` (row 0 is the top).
    pub fn get(&self, x: u32, y: u32) -> Pixel {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Iterate over rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        self.pixels.chunks(self.width as usize)
    }
}

//! Pixel sinks: where rendered colors go.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use lumen_core::Color;

use crate::RenderError;

/// Destination for rendered pixels.
///
/// Workers call `write_pixel` concurrently, each pixel from exactly one
/// thread, so implementations must accept writes to disjoint pixels without
/// a shared lock.
pub trait PixelSink: Send + Sync {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    fn write_pixel(&self, col: usize, row: usize, color: Color);

    /// Finish the image once every pixel is written.
    fn flush(&self) -> Result<(), RenderError> {
        Ok(())
    }
}

/// In-memory linear color buffer.
///
/// Each channel is an `f64` stored as bits in an `AtomicU64`.
pub struct ImageBuffer {
    width: usize,
    height: usize,
    pixels: Vec<[AtomicU64; 3]>,
}

impl ImageBuffer {
    /// Create a new buffer filled with black.
    pub fn new(width: usize, height: usize) -> Self {
        let black = 0.0f64.to_bits();
        let pixels = (0..width * height)
            .map(|_| {
                [
                    AtomicU64::new(black),
                    AtomicU64::new(black),
                    AtomicU64::new(black),
                ]
            })
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    fn index(&self, col: usize, row: usize) -> Option<usize> {
        (col < self.width && row < self.height).then(|| row * self.width + col)
    }

    /// Color at `(col, row)`; `None` outside the image.
    pub fn get(&self, col: usize, row: usize) -> Option<Color> {
        let [r, g, b] = &self.pixels[self.index(col, row)?];
        Some(Color::new(
            f64::from_bits(r.load(Ordering::Relaxed)),
            f64::from_bits(g.load(Ordering::Relaxed)),
            f64::from_bits(b.load(Ordering::Relaxed)),
        ))
    }

    /// Row-major 8-bit RGB bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.width * self.height * 3);
        for row in 0..self.height {
            for col in 0..self.width {
                let color = self.get(col, row).unwrap_or(Color::ZERO);
                bytes.extend_from_slice(&color_to_rgb(color));
            }
        }
        bytes
    }
}

impl PixelSink for ImageBuffer {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn write_pixel(&self, col: usize, row: usize, color: Color) {
        let Some(index) = self.index(col, row) else {
            log::warn!(
                "Pixel ({}, {}) is outside the {}x{} image",
                col,
                row,
                self.width,
                self.height
            );
            return;
        };
        let [r, g, b] = &self.pixels[index];
        r.store(color.x.to_bits(), Ordering::Relaxed);
        g.store(color.y.to_bits(), Ordering::Relaxed);
        b.store(color.z.to_bits(), Ordering::Relaxed);
    }
}

/// Convert a linear color to 8-bit RGB, clamping each channel to [0, 1].
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let channel = |c: f64| (255.0 * c.clamp(0.0, 1.0)) as u8;
    [channel(color.x), channel(color.y), channel(color.z)]
}

/// An [`ImageBuffer`] that is saved to a file on [`flush`](PixelSink::flush).
///
/// The file format follows the path extension.
pub struct ImageWriter {
    path: PathBuf,
    buffer: ImageBuffer,
}

impl ImageWriter {
    pub fn new(path: impl Into<PathBuf>, width: usize, height: usize) -> Self {
        Self {
            path: path.into(),
            buffer: ImageBuffer::new(width, height),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn buffer(&self) -> &ImageBuffer {
        &self.buffer
    }
}

impl PixelSink for ImageWriter {
    fn width(&self) -> usize {
        self.buffer.width
    }

    fn height(&self) -> usize {
        self.buffer.height
    }

    fn write_pixel(&self, col: usize, row: usize, color: Color) {
        self.buffer.write_pixel(col, row, color);
    }

    fn flush(&self) -> Result<(), RenderError> {
        let size_error = || RenderError::ImageSize {
            width: self.buffer.width,
            height: self.buffer.height,
        };
        let width = u32::try_from(self.buffer.width).map_err(|_| size_error())?;
        let height = u32::try_from(self.buffer.height).map_err(|_| size_error())?;

        let image = image::RgbImage::from_raw(width, height, self.buffer.to_rgb8())
            .ok_or_else(size_error)?;
        image.save(&self.path)?;

        log::info!("Saved {}x{} image to {}", width, height, self.path.display());
        Ok(())
    }
}

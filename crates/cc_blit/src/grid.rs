use crate::palette::Rgba;
use crate::{BlitError, Result};

/// Borrowed view over row-major RGBA8 pixel data (4 bytes per pixel).
#[derive(Clone, Copy, Debug)]
pub struct PixelGrid<'a> {
    rgba: &'a [u8],
    width: usize,
    height: usize,
}

impl<'a> PixelGrid<'a> {
    /// Wraps `rgba`, checking that it holds exactly `width * height` pixels.
    pub fn new(rgba: &'a [u8], width: usize, height: usize) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(BlitError::InvalidDimensions { width, height })?;
        if rgba.len() != expected {
            return Err(BlitError::BufferSizeMismatch {
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self {
            rgba,
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Color at `(x, y)`. Panics if the coordinate is out of bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        let offset = (y * self.width + x) * 4;
        Rgba::from_slice(&self.rgba[offset..offset + 4])
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgba> + 'a {
        self.rgba.chunks_exact(4).map(Rgba::from_slice)
    }

    /// Raw RGBA8 bytes of row `y`.
    pub fn row(&self, y: usize) -> &'a [u8] {
        let stride = self.width * 4;
        &self.rgba[y * stride..(y + 1) * stride]
    }
}

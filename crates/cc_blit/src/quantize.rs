//! Reduces arbitrary RGBA images to a terminal-sized palette using quantette.
//!
//! Alpha is ignored: every output pixel is opaque.

use crate::palette::{Palette, Rgba, MAX_COLORS};
use crate::{BlitError, Result};
use quantette::{
    deps::palette::Srgb, dither::FloydSteinberg, ImageRef, PaletteSize, Pipeline, QuantizeMethod,
};

/// Options for palette reduction.
#[derive(Clone, Debug)]
pub struct QuantizeOptions {
    /// Maximum number of colors in the palette (2-16).
    pub max_colors: u8,
}

impl Default for QuantizeOptions {
    fn default() -> Self {
        Self {
            max_colors: MAX_COLORS as u8,
        }
    }
}

/// Quantize RGBA image data down to at most `opts.max_colors` colors.
///
/// Returns an RGBA buffer of the same size in which every pixel is one of the
/// palette colors, together with the palette in the quantizer's order.
pub fn quantize(
    rgba: &[u8],
    width: usize,
    height: usize,
    opts: &QuantizeOptions,
) -> Result<(Vec<u8>, Palette)> {
    if width == 0 || height == 0 {
        return Err(BlitError::InvalidDimensions { width, height });
    }
    let expected = width * height * 4;
    if rgba.len() != expected {
        return Err(BlitError::BufferSizeMismatch {
            expected,
            actual: rgba.len(),
        });
    }

    let rgb_pixels: Vec<Srgb<u8>> = rgba
        .chunks_exact(4)
        .map(|c| Srgb::new(c[0], c[1], c[2]))
        .collect();

    let max_colors = opts.max_colors.clamp(2, MAX_COLORS as u8);
    let palette_size = PaletteSize::try_from(max_colors)
        .map_err(|_| BlitError::Quantization(format!("unsupported palette size {max_colors}")))?;

    let image = ImageRef::new(width as u32, height as u32, &rgb_pixels)
        .map_err(|e| BlitError::Quantization(e.to_string()))?;

    let indexed_image = Pipeline::new()
        .palette_size(palette_size)
        .quantize_method(QuantizeMethod::Wu)
        .ditherer(FloydSteinberg::new())
        .input_image(image)
        .output_srgb8_indexed_image();

    let colors: Vec<Rgba> = indexed_image
        .palette()
        .iter()
        .map(|c| Rgba::rgb(c.red, c.green, c.blue))
        .collect();

    let mut out = Vec::with_capacity(expected);
    for &index in indexed_image.indices() {
        let color = colors.get(index as usize).ok_or_else(|| {
            BlitError::Quantization(format!("palette index {index} out of range"))
        })?;
        out.extend_from_slice(&[color.r, color.g, color.b, color.a]);
    }

    let palette = Palette::from_colors(colors)?;
    tracing::debug!(
        width,
        height,
        colors = palette.len(),
        "quantized image"
    );
    Ok((out, palette))
}

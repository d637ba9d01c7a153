//! Cell encoder: turns a quantized image into per-row glyph and color buffers.
//!
//! The image is walked in 2x3 blocks, block rows top to bottom and blocks
//! left to right. Each block becomes one [`EncodedCell`], and the cells of a
//! block row are stored in three index-aligned buffers (patterns, foreground
//! indices, background indices) that map directly onto a blit call.

use crate::cell::{encode_cell, EncodedCell, CELL_HEIGHT, CELL_PIXELS, CELL_WIDTH, GLYPH_BASE};
use crate::grid::PixelGrid;
use crate::palette::{index_image, ColorIndex, ColorLookup, Palette};
use crate::{BlitError, Result};

/// The three parallel buffers of one output row.
///
/// Position `i` in every buffer describes the same cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowBuffers {
    pub patterns: Vec<u8>,
    pub foreground: Vec<ColorIndex>,
    pub background: Vec<ColorIndex>,
}

impl RowBuffers {
    pub fn with_capacity(cells: usize) -> Self {
        Self {
            patterns: Vec::with_capacity(cells),
            foreground: Vec::with_capacity(cells),
            background: Vec::with_capacity(cells),
        }
    }

    pub fn push(&mut self, cell: EncodedCell) {
        self.patterns.push(cell.pattern);
        self.foreground.push(cell.foreground);
        self.background.push(cell.background);
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn cell(&self, i: usize) -> Option<EncodedCell> {
        Some(EncodedCell {
            pattern: *self.patterns.get(i)?,
            foreground: *self.foreground.get(i)?,
            background: *self.background.get(i)?,
        })
    }

    /// Character codes (`GLYPH_BASE + pattern`) for the whole row.
    pub fn glyphs(&self) -> impl Iterator<Item = u8> + '_ {
        self.patterns.iter().map(|p| GLYPH_BASE + p)
    }

    /// Foreground indices as a string of `0-9a-f`.
    pub fn foreground_string(&self) -> String {
        self.foreground.iter().map(|i| i.as_char()).collect()
    }

    /// Background indices as a string of `0-9a-f`.
    pub fn background_string(&self) -> String {
        self.background.iter().map(|i| i.as_char()).collect()
    }
}

/// A fully encoded image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    pub palette: Palette,
    /// One entry per block row, top to bottom.
    pub rows: Vec<RowBuffers>,
    /// Width in cells (`pixel width / 2`).
    pub width: usize,
    /// Height in cells (`pixel height / 3`).
    pub height: usize,
}

/// Encode a quantized RGBA image, deriving the palette from the image.
///
/// # Arguments
/// * `rgba` - Raw RGBA pixel data (4 bytes per pixel: R, G, B, A)
/// * `width` - Image width in pixels, a multiple of 2
/// * `height` - Image height in pixels, a multiple of 3
///
/// Palette entries are assigned in the order colors first appear in the
/// image (row-major). Fails with [`BlitError::PaletteTooLarge`] if the image
/// uses more than 16 colors.
///
/// # Example
/// ```ignore
/// use cc_blit::encode;
///
/// let encoded = encode(&rgba, 64, 96)?;
/// assert_eq!((encoded.width, encoded.height), (32, 32));
/// ```
#[must_use = "this returns the encoded image"]
pub fn encode(rgba: &[u8], width: usize, height: usize) -> Result<EncodedImage> {
    let grid = checked_grid(rgba, width, height)?;
    let (palette, lookup) = index_image(&grid)?;
    finish(&grid, palette, &lookup)
}

/// Encode a quantized RGBA image against a palette supplied by the quantizer.
///
/// The palette order is used as is. Every pixel must have one of the palette
/// colors, otherwise [`BlitError::MalformedPixel`] is returned.
#[must_use = "this returns the encoded image"]
pub fn encode_with_palette(
    rgba: &[u8],
    width: usize,
    height: usize,
    palette: Palette,
) -> Result<EncodedImage> {
    let grid = checked_grid(rgba, width, height)?;
    let lookup = palette.lookup();
    finish(&grid, palette, &lookup)
}

/// Encode every cell of `grid` into row buffers.
///
/// `grid` dimensions must be multiples of 2 and 3.
pub fn encode_grid(grid: &PixelGrid<'_>, lookup: &ColorLookup) -> Result<Vec<RowBuffers>> {
    check_dimensions(grid.width(), grid.height())?;

    let cols = grid.width() / CELL_WIDTH;
    let mut rows = Vec::with_capacity(grid.height() / CELL_HEIGHT);

    for y in (0..grid.height()).step_by(CELL_HEIGHT) {
        let mut row = RowBuffers::with_capacity(cols);
        for x in (0..grid.width()).step_by(CELL_WIDTH) {
            let mut pixels = [ColorIndex::ZERO; CELL_PIXELS];
            for dy in 0..CELL_HEIGHT {
                for dx in 0..CELL_WIDTH {
                    let (px, py) = (x + dx, y + dy);
                    let color = grid.pixel(px, py);
                    pixels[dy * CELL_WIDTH + dx] = lookup
                        .get(color)
                        .ok_or(BlitError::MalformedPixel { x: px, y: py, color })?;
                }
            }
            row.push(encode_cell(&pixels));
        }
        rows.push(row);
    }

    Ok(rows)
}

fn checked_grid(rgba: &[u8], width: usize, height: usize) -> Result<PixelGrid<'_>> {
    let grid = PixelGrid::new(rgba, width, height)?;
    check_dimensions(width, height)?;
    Ok(grid)
}

fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width % CELL_WIDTH != 0 || height % CELL_HEIGHT != 0 {
        return Err(BlitError::InvalidDimensions { width, height });
    }
    Ok(())
}

fn finish(grid: &PixelGrid<'_>, palette: Palette, lookup: &ColorLookup) -> Result<EncodedImage> {
    let rows = encode_grid(grid, lookup)?;
    let width = grid.width() / CELL_WIDTH;
    let height = grid.height() / CELL_HEIGHT;
    tracing::debug!(width, height, colors = palette.len(), "encoded image");
    Ok(EncodedImage {
        palette,
        rows,
        width,
        height,
    })
}

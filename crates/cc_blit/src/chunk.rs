//! Crops images to whole cells.

use crate::cell::{CELL_HEIGHT, CELL_WIDTH};
use crate::grid::PixelGrid;
use crate::Result;

/// Largest size not exceeding `(width, height)` that is a whole number of
/// cells.
#[inline]
pub fn chunked_size(width: usize, height: usize) -> (usize, usize) {
    (
        width - width % CELL_WIDTH,
        height - height % CELL_HEIGHT,
    )
}

/// Crop an RGBA image so its width is a multiple of 2 and its height a
/// multiple of 3, dropping the rightmost columns and bottom rows.
///
/// Returns the cropped pixels with their new width and height. Images that
/// already fit are copied unchanged.
pub fn chunk_rgba(rgba: &[u8], width: usize, height: usize) -> Result<(Vec<u8>, usize, usize)> {
    let grid = PixelGrid::new(rgba, width, height)?;
    let (new_width, new_height) = chunked_size(width, height);

    let mut out = Vec::with_capacity(new_width * new_height * 4);
    for y in 0..new_height {
        out.extend_from_slice(&grid.row(y)[..new_width * 4]);
    }

    Ok((out, new_width, new_height))
}

//! The per-cell glyph algorithm.
//!
//! A cell is a 2x3 block of pixels. Its six pixels are numbered row-major:
//!
//! ```text
//! 0 1
//! 2 3
//! 4 5
//! ```
//!
//! Pixel 5 always provides the background color. Every pixel that differs
//! from it sets its pattern bit and becomes the foreground, so with more than
//! two colors in a cell the last differing pixel decides the foreground.

use crate::palette::ColorIndex;

/// Pixels per cell horizontally.
pub const CELL_WIDTH: usize = 2;
/// Pixels per cell vertically.
pub const CELL_HEIGHT: usize = 3;
/// Pixels per cell.
pub const CELL_PIXELS: usize = CELL_WIDTH * CELL_HEIGHT;

/// Character code of the glyph for pattern 0; pattern `p` is drawn by
/// character `GLYPH_BASE + p`.
pub const GLYPH_BASE: u8 = 128;

/// One encoded cell: a 6-bit pattern and its color pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodedCell {
    /// Bit `i` is set when pixel `i` is drawn in the foreground color.
    pub pattern: u8,
    pub foreground: ColorIndex,
    pub background: ColorIndex,
}

impl EncodedCell {
    /// Character code that draws this cell's pattern.
    #[inline]
    pub fn glyph(&self) -> u8 {
        GLYPH_BASE + self.pattern
    }

    /// True when every pixel of the cell has the background color.
    #[inline]
    pub fn is_uniform(&self) -> bool {
        self.pattern == 0
    }
}

/// Encodes the six pixel indices of one cell.
///
/// A uniform cell has no foreground pixel; its foreground is reported as
/// [`ColorIndex::ZERO`] so it still renders as `'0'`.
pub fn encode_cell(pixels: &[ColorIndex; CELL_PIXELS]) -> EncodedCell {
    let background = pixels[CELL_PIXELS - 1];
    let mut foreground = None;
    let mut pattern = 0u8;

    for (bit, &index) in pixels.iter().enumerate() {
        if index != background {
            pattern |= 1 << bit;
            foreground = Some(index);
        }
    }

    EncodedCell {
        pattern,
        foreground: foreground.unwrap_or(ColorIndex::ZERO),
        background,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(slot: usize) -> ColorIndex {
        ColorIndex::new(slot).unwrap()
    }

    #[test]
    fn test_all_two_color_patterns() {
        let a = idx(3);
        let b = idx(9);
        for bits in 0u8..64 {
            let mut pixels = [b; CELL_PIXELS];
            for (i, px) in pixels.iter_mut().enumerate() {
                if bits & (1 << i) != 0 {
                    *px = a;
                }
            }
            let cell = encode_cell(&pixels);
            let background = pixels[5];
            let other = if background == a { b } else { a };

            for (i, &px) in pixels.iter().enumerate() {
                assert_eq!(
                    cell.pattern & (1 << i) != 0,
                    px != background,
                    "bit {i} of distribution {bits:06b}"
                );
            }
            assert_eq!(cell.background, background);
            if cell.pattern != 0 {
                assert_eq!(cell.foreground, other);
            } else {
                assert_eq!(cell.foreground, ColorIndex::ZERO);
            }
            assert!(cell.pattern < 64);
            assert_eq!(cell.pattern & 0b100000, 0, "pixel 5 never differs from itself");
        }
    }

    #[test]
    fn test_uniform_cell() {
        let cell = encode_cell(&[idx(7); CELL_PIXELS]);
        assert_eq!(cell.pattern, 0);
        assert_eq!(cell.foreground.as_char(), '0');
        assert_eq!(cell.background, idx(7));
        assert!(cell.is_uniform());
        assert_eq!(cell.glyph(), 128);
    }

    #[test]
    fn test_single_differing_corner() {
        let (a, b) = (idx(1), idx(2));
        let cell = encode_cell(&[a, a, a, a, a, b]);
        assert_eq!(cell.pattern, 0b011111);
        assert_eq!(cell.pattern, 31);
        assert_eq!(cell.foreground, a);
        assert_eq!(cell.background, b);
        assert_eq!(cell.glyph(), 159);
    }

    #[test]
    fn test_checkerboard_columns() {
        let (a, b) = (idx(4), idx(5));
        let cell = encode_cell(&[a, b, a, b, a, b]);
        assert_eq!(cell.pattern, 21);
        assert_eq!(cell.foreground, a);
        assert_eq!(cell.background, b);
    }

    #[test]
    fn test_last_differing_pixel_is_foreground() {
        let cell = encode_cell(&[idx(1), idx(2), idx(3), idx(0), idx(0), idx(0)]);
        assert_eq!(cell.pattern, 0b000111);
        assert_eq!(cell.foreground, idx(3));
        assert_eq!(cell.background, idx(0));

        let cell = encode_cell(&[idx(4), idx(0), idx(0), idx(0), idx(6), idx(0)]);
        assert_eq!(cell.pattern, 0b010001);
        assert_eq!(cell.foreground, idx(6));
    }

    #[test]
    fn test_background_is_bottom_right_not_majority() {
        let (a, b) = (idx(10), idx(11));
        let cell = encode_cell(&[a, a, a, a, a, b]);
        assert_eq!(cell.background, b);
        let cell = encode_cell(&[b, b, b, b, b, a]);
        assert_eq!(cell.background, a);
        assert_eq!(cell.foreground, b);
    }
}

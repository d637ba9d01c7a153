//! Palette indexing: distinct colors, their single-character indices and the
//! reverse lookup used by the encoder.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::grid::PixelGrid;
use crate::{BlitError, Result};

/// Maximum number of palette entries the terminal can display.
pub const MAX_COLORS: usize = 16;

const INDEX_SYMBOLS: &[u8; MAX_COLORS] = b"0123456789abcdef";

/// An RGBA8 color. Two colors are equal only if every channel matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Reads a color from the first four bytes of an RGBA8 pixel.
    #[inline]
    pub fn from_slice(px: &[u8]) -> Self {
        Self::new(px[0], px[1], px[2], px[3])
    }

    /// `0xRRGGBB`, alpha ignored.
    #[inline]
    pub fn to_rgb24(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Upper-case `RRGGBB` hex triplet, alpha ignored.
    pub fn to_hex(self) -> String {
        format!("{:06X}", self.to_rgb24())
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

/// Index of a palette entry, rendered as one of `0123456789abcdef`.
///
/// The default index is slot 0, which renders as `'0'`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorIndex(u8);

impl ColorIndex {
    pub const ZERO: ColorIndex = ColorIndex(0);

    /// Index for palette slot `slot`, or `None` if the slot does not fit.
    pub fn new(slot: usize) -> Option<Self> {
        (slot < MAX_COLORS).then_some(ColorIndex(slot as u8))
    }

    /// Parses one of `0-9a-f` (upper-case hex digits are accepted too).
    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(16).map(|d| ColorIndex(d as u8))
    }

    #[inline]
    pub fn slot(self) -> usize {
        self.0 as usize
    }

    /// The index character as a byte.
    #[inline]
    pub fn as_byte(self) -> u8 {
        INDEX_SYMBOLS[self.0 as usize]
    }

    #[inline]
    pub fn as_char(self) -> char {
        self.as_byte() as char
    }

    /// The terminal's color constant for this slot, `2^slot`.
    #[inline]
    pub fn color_code(self) -> u16 {
        1 << self.0
    }
}

impl fmt::Display for ColorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Ordered list of at most [`MAX_COLORS`] distinct colors.
///
/// Entry order decides index assignment: the first color is `'0'`, the
/// second `'1'` and so on. The order handed in is kept as is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgba>,
}

impl Palette {
    /// Builds a palette in the given order. Repeated colors keep their
    /// first position.
    pub fn from_colors<I: IntoIterator<Item = Rgba>>(colors: I) -> Result<Self> {
        let mut seen = HashSet::new();
        let colors: Vec<Rgba> = colors.into_iter().filter(|c| seen.insert(*c)).collect();
        if colors.len() > MAX_COLORS {
            return Err(BlitError::PaletteTooLarge {
                count: colors.len(),
            });
        }
        Ok(Self { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    pub fn get(&self, index: ColorIndex) -> Option<Rgba> {
        self.colors.get(index.slot()).copied()
    }

    /// Entries paired with their index, in palette order.
    pub fn entries(&self) -> impl Iterator<Item = (ColorIndex, Rgba)> + '_ {
        self.colors
            .iter()
            .enumerate()
            .map(|(slot, &color)| (ColorIndex(slot as u8), color))
    }

    /// Builds the color to index map.
    pub fn lookup(&self) -> ColorLookup {
        ColorLookup {
            map: self.entries().map(|(index, color)| (color, index)).collect(),
        }
    }
}

/// Read-only map from an exact color to its palette index.
#[derive(Clone, Debug)]
pub struct ColorLookup {
    map: HashMap<Rgba, ColorIndex>,
}

impl ColorLookup {
    #[inline]
    pub fn get(&self, color: Rgba) -> Option<ColorIndex> {
        self.map.get(&color).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Collects the distinct colors of `grid` in row-major order of first
/// appearance and builds their lookup.
///
/// Fails with [`BlitError::PaletteTooLarge`] if more than [`MAX_COLORS`]
/// distinct colors are present. `count` then holds the full number of
/// distinct colors in the image.
pub fn index_image(grid: &PixelGrid<'_>) -> Result<(Palette, ColorLookup)> {
    let mut seen = HashSet::new();
    let mut colors = Vec::with_capacity(MAX_COLORS);

    for color in grid.pixels() {
        if seen.insert(color) {
            colors.push(color);
        }
    }

    if colors.len() > MAX_COLORS {
        return Err(BlitError::PaletteTooLarge {
            count: colors.len(),
        });
    }

    let palette = Palette { colors };
    let lookup = palette.lookup();
    tracing::debug!(colors = palette.len(), "indexed image palette");
    Ok((palette, lookup))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::rgb(255, 0, 0);
    const GREEN: Rgba = Rgba::rgb(0, 255, 0);
    const BLUE: Rgba = Rgba::rgb(0, 0, 255);

    fn rgba_of(colors: &[Rgba]) -> Vec<u8> {
        colors.iter().flat_map(|c| [c.r, c.g, c.b, c.a]).collect()
    }

    #[test]
    fn test_index_chars() {
        let chars: String = (0..MAX_COLORS)
            .map(|i| ColorIndex::new(i).unwrap().as_char())
            .collect();
        assert_eq!(chars, "0123456789abcdef");
        assert!(ColorIndex::new(16).is_none());
        assert_eq!(ColorIndex::default().as_char(), '0');
        assert_eq!(ColorIndex::from_char('b'), ColorIndex::new(11));
        assert_eq!(ColorIndex::from_char('g'), None);
    }

    #[test]
    fn test_color_code() {
        assert_eq!(ColorIndex::new(0).unwrap().color_code(), 1);
        assert_eq!(ColorIndex::new(15).unwrap().color_code(), 32768);
    }

    #[test]
    fn test_hex_is_zero_padded() {
        assert_eq!(Rgba::rgb(0x0A, 0x0B, 0x0C).to_hex(), "0A0B0C");
        assert_eq!(Rgba::new(255, 128, 0, 7).to_hex(), "FF8000");
        assert_eq!(Rgba::rgb(1, 2, 3).to_rgb24(), 0x010203);
    }

    #[test]
    fn test_alpha_is_part_of_identity() {
        assert_ne!(Rgba::new(1, 2, 3, 255), Rgba::new(1, 2, 3, 0));
    }

    #[test]
    fn test_palette_order_assigns_indices() {
        let palette = Palette::from_colors([RED, GREEN, BLUE]).unwrap();
        let lookup = palette.lookup();
        assert_eq!(lookup.get(RED).map(ColorIndex::as_char), Some('0'));
        assert_eq!(lookup.get(GREEN).map(ColorIndex::as_char), Some('1'));
        assert_eq!(lookup.get(BLUE).map(ColorIndex::as_char), Some('2'));

        let again = palette.lookup();
        for color in [RED, GREEN, BLUE] {
            assert_eq!(lookup.get(color), again.get(color));
        }
    }

    #[test]
    fn test_palette_keeps_supplied_order() {
        let palette = Palette::from_colors([BLUE, RED, BLUE, GREEN]).unwrap();
        assert_eq!(palette.colors(), &[BLUE, RED, GREEN]);
        assert_eq!(palette.get(ColorIndex::new(1).unwrap()), Some(RED));
    }

    #[test]
    fn test_palette_too_large() {
        let colors = (0..17u8).map(|i| Rgba::rgb(i, 0, 0));
        let err = Palette::from_colors(colors).unwrap_err();
        assert!(matches!(err, BlitError::PaletteTooLarge { count: 17 }));

        let colors = (0..16u8).map(|i| Rgba::rgb(i, 0, 0));
        assert_eq!(Palette::from_colors(colors).unwrap().len(), 16);
    }

    #[test]
    fn test_index_image_first_appearance() {
        let rgba = rgba_of(&[GREEN, RED, GREEN, BLUE, RED, RED]);
        let grid = PixelGrid::new(&rgba, 2, 3).unwrap();
        let (palette, lookup) = index_image(&grid).unwrap();
        assert_eq!(palette.colors(), &[GREEN, RED, BLUE]);
        assert_eq!(lookup.len(), 3);
        assert_eq!(lookup.get(BLUE), ColorIndex::new(2));
    }

    #[test]
    fn test_index_image_reports_full_count() {
        let colors: Vec<Rgba> = (0..20u8).map(|i| Rgba::rgb(i, i, i)).collect();
        let rgba = rgba_of(&colors);
        let grid = PixelGrid::new(&rgba, 20, 1).unwrap();
        let err = index_image(&grid).unwrap_err();
        assert!(matches!(err, BlitError::PaletteTooLarge { count: 20 }));
    }
}

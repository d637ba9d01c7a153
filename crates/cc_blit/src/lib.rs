//! # cc_blit
//!
//! Encode images for character-cell terminals that draw 2x3 sub-pixel glyphs
//! with a 16-color indexed palette (ComputerCraft's `term.blit`).
//!
//! ## Features
//!
//! - **Encoder**: Maps every 2x3 pixel block to a glyph pattern plus a
//!   foreground/background color pair
//! - **Quantizer**: Reduces arbitrary images to at most 16 colors using quantette
//! - **Formatter**: Turns the encoded buffers into a ready-to-run Lua script
//!
//! ## Quick Start
//!
//! ### Encoding a quantized image
//!
//! ```ignore
//! use cc_blit::{encode, generate_lua};
//!
//! // 2x3 RGBA image, 4 bytes per pixel, at most 16 distinct colors
//! let encoded = encode(&rgba, 2, 3)?;
//! assert_eq!((encoded.width, encoded.height), (1, 1));
//! print!("{}", generate_lua(&encoded));
//! ```
//!
//! ### Encoding an arbitrary image
//!
//! ```ignore
//! use cc_blit::{chunk_rgba, encode_with_palette, quantize, QuantizeOptions};
//!
//! let (rgba, width, height) = chunk_rgba(&rgba, width, height)?;
//! let (quantized, palette) = quantize(&rgba, width, height, &QuantizeOptions::default())?;
//! let encoded = encode_with_palette(&quantized, width, height, palette)?;
//! ```

use thiserror::Error;

pub mod cell;
pub mod chunk;
pub mod encoder;
pub mod grid;
pub mod lua;
pub mod palette;
pub mod quantize;

pub use cell::{encode_cell, EncodedCell, CELL_HEIGHT, CELL_PIXELS, CELL_WIDTH, GLYPH_BASE};
pub use chunk::{chunk_rgba, chunked_size};
pub use encoder::{encode, encode_grid, encode_with_palette, EncodedImage, RowBuffers};
pub use grid::PixelGrid;
pub use lua::{generate_lua, lua_glyph_literal};
pub use palette::{index_image, ColorIndex, ColorLookup, Palette, Rgba, MAX_COLORS};
pub use quantize::{quantize, QuantizeOptions};

/// Errors that can occur while chunking, quantizing or encoding an image.
#[derive(Debug, Error)]
pub enum BlitError {
    /// Width is not a multiple of 2 or height is not a multiple of 3
    #[error("invalid dimensions: {width}x{height} (width must be a multiple of 2, height a multiple of 3)")]
    InvalidDimensions { width: usize, height: usize },

    /// Buffer size doesn't match expected size for dimensions
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// The image uses more colors than the terminal palette can hold
    #[error("palette must have <= {max} colors, found {count}", max = MAX_COLORS)]
    PaletteTooLarge { count: usize },

    /// A pixel's color is missing from the palette it is encoded against
    #[error("pixel at ({x}, {y}) has color {color} which is not in the palette")]
    MalformedPixel { x: usize, y: usize, color: Rgba },

    /// Color quantization failed
    #[error("quantization error: {0}")]
    Quantization(String),
}

/// Result type for encoding operations.
pub type Result<T> = core::result::Result<T, BlitError>;

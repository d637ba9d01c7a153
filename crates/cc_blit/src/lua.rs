//! Lua script generation for ComputerCraft terminals and monitors.
//!
//! The generated script is meant to be loaded with `os.loadAPI` and exposes
//! two functions:
//!
//! - `draw(t)` installs the palette on `t` and blits every row starting at
//!   the current cursor position.
//! - `getSize()` returns the image size in characters.

use std::fmt::Write;

use crate::encoder::{EncodedImage, RowBuffers};

/// Render an encoded image as a Lua script.
///
/// # Example
/// ```ignore
/// use cc_blit::{encode, generate_lua};
///
/// let script = generate_lua(&encode(&rgba, width, height)?);
/// std::fs::write("image", script)?;
/// ```
pub fn generate_lua(image: &EncodedImage) -> String {
    let mut out = String::new();

    out.push_str("-- Generated by cc_blit\n");
    out.push_str("--\n");
    out.push_str("-- Usage:\n");
    out.push_str("-- os.loadAPI(\"image\")\n");
    out.push_str("-- image.draw(term) or image.draw(monitor)\n");
    out.push('\n');

    out.push_str("function draw(t)\n");
    out.push_str("\tlocal x, y = t.getCursorPos()\n");
    out.push('\n');

    for (index, color) in image.palette.entries() {
        // Writing to a String cannot fail
        let _ = writeln!(
            out,
            "\tt.setPaletteColor({}, 0x{})",
            index.color_code(),
            color.to_hex()
        );
    }
    if !image.palette.is_empty() {
        out.push('\n');
    }

    for (y, row) in image.rows.iter().enumerate() {
        let _ = writeln!(out, "\tt.setCursorPos(x, y + {y})");
        let _ = writeln!(
            out,
            "\tt.blit({}, \"{}\", \"{}\")",
            lua_glyph_literal(row),
            row.foreground_string(),
            row.background_string()
        );
    }

    out.push_str("end\n");
    out.push('\n');
    out.push_str("function getSize()\n");
    let _ = writeln!(out, "\treturn {}, {}", image.width, image.height);
    out.push_str("end\n");

    out
}

/// Quoted Lua string holding the glyph characters of `row`, each written as
/// a decimal escape (`"\159\128"`).
pub fn lua_glyph_literal(row: &RowBuffers) -> String {
    let mut out = String::with_capacity(row.len() * 4 + 2);
    out.push('"');
    for glyph in row.glyphs() {
        let _ = write!(out, "\\{glyph}");
    }
    out.push('"');
    out
}

//! ccblit - Convert images into ComputerCraft blit scripts
//!
//! A command-line tool that crops, quantizes and encodes an image into a Lua
//! script drawing it with 2x3 sub-pixel glyphs.

use cc_blit::{
    chunk_rgba, encode, encode_with_palette, generate_lua, quantize, EncodedImage,
    QuantizeOptions, MAX_COLORS,
};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ccblit")]
#[command(version)]
#[command(about = "Convert images into ComputerCraft blit scripts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode an image to a Lua script
    Encode {
        #[command(flatten)]
        source: SourceArgs,

        /// Output Lua file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the output size and palette an image would be encoded with
    Palette {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Input image file (PNG, JPEG, GIF, WebP)
    input: PathBuf,

    /// Maximum number of colors (2-16)
    #[arg(short, long, default_value = "16")]
    colors: u8,

    /// Use the image colors as they are; fails if it has more than 16 colors
    #[arg(long)]
    no_quantize: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ccblit=info,cc_blit=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(io::stderr),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { source, output } => {
            let encoded = load_and_encode(&source)?;
            let script = generate_lua(&encoded);

            match output {
                Some(path) => {
                    fs::write(&path, &script)
                        .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))?;
                    tracing::info!(
                        bytes = script.len(),
                        path = %path.display(),
                        "wrote script"
                    );
                }
                None => {
                    io::stdout().write_all(script.as_bytes())?;
                }
            }
        }

        Commands::Palette { source } => {
            let encoded = load_and_encode(&source)?;
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "size: {}x{}", encoded.width, encoded.height)?;
            for (index, color) in encoded.palette.entries() {
                writeln!(stdout, "{}  {}", index, color.to_hex())?;
            }
        }
    }

    Ok(())
}

fn load_and_encode(source: &SourceArgs) -> Result<EncodedImage, Box<dyn std::error::Error>> {
    let (rgba, width, height) = load_rgba(&source.input)?;
    let (rgba, width, height) = chunk_rgba(&rgba, width, height)?;
    if width == 0 || height == 0 {
        return Err(format!(
            "'{}' is smaller than one 2x3 cell",
            source.input.display()
        )
        .into());
    }

    let encoded = if source.no_quantize {
        encode(&rgba, width, height)?
    } else {
        let opts = QuantizeOptions {
            max_colors: source.colors.clamp(2, MAX_COLORS as u8),
        };
        tracing::info!(
            input = %source.input.display(),
            width,
            height,
            colors = opts.max_colors,
            "quantizing"
        );
        let (quantized, palette) = quantize(&rgba, width, height, &opts)?;
        encode_with_palette(&quantized, width, height, palette)?
    };

    tracing::info!(
        width = encoded.width,
        height = encoded.height,
        colors = encoded.palette.len(),
        "encoded image"
    );
    Ok(encoded)
}

fn load_rgba(path: &Path) -> Result<(Vec<u8>, usize, usize), Box<dyn std::error::Error>> {
    let img =
        image::open(path).map_err(|e| format!("Failed to open '{}': {}", path.display(), e))?;
    let rgba_img = img.to_rgba8();
    let (width, height) = rgba_img.dimensions();
    Ok((rgba_img.into_raw(), width as usize, height as usize))
}

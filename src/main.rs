//! # pixelbake CLI
//!
//! Command-line interface for baking images into C blit routines.
//!
//! ## Usage
//!
//! ```bash
//! # Direct copy blit, BGR888, files written to the current directory
//! pixelbake convert assets/logo.png
//!
//! # Add a 3x scaled blit and the alpha-blend blit
//! pixelbake convert assets/logo.png --name p3a_logo --outdir gen --scale 3 --alpha
//!
//! # Convert everything listed in a manifest
//! pixelbake batch logos.json
//!
//! # Check what the blend blit draws at half opacity on a 720x720 screen
//! pixelbake preview assets/logo.png --png out.png --scale 3 --alpha 128 --bg 202020
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use pixelbake::{
    ChannelOrder, GeneratorConfig, Manifest, PixelbakeError, Scale,
    blit::BlendParams,
    pipeline::{self, Generated},
    pixel::source,
    preview::{self, PreviewMode, PreviewOptions},
};

/// pixelbake - Bake images into freestanding C blit routines
#[derive(Parser, Debug)]
#[command(name = "pixelbake")]
#[command(author, version = pixelbake::BUILD_VERSION, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert one image into <name>.h and <name>.c
    Convert {
        /// Source image
        input: PathBuf,

        /// Base name for files and identifiers (defaults to the file stem)
        #[arg(long)]
        name: Option<String>,

        /// Output directory
        #[arg(long, default_value = ".")]
        outdir: PathBuf,

        /// Also generate a fixed-scale blit (2-16)
        #[arg(long)]
        scale: Option<Scale>,

        /// Also generate the alpha-blending blit
        #[arg(long)]
        alpha: bool,

        /// Skip the direct row-copy blit
        #[arg(long)]
        no_copy: bool,

        /// Channel order of the table and the target frame buffer
        #[arg(long, default_value = "bgr")]
        order: ChannelOrder,

        /// Table bytes per line
        #[arg(long, default_value_t = pixelbake::encode::DEFAULT_BYTES_PER_LINE)]
        bytes_per_line: usize,
    },

    /// Convert every image listed in a JSON manifest
    Batch {
        /// Manifest file
        manifest: PathBuf,
    },

    /// Render a reference blit to a PNG
    Preview {
        /// Source image
        input: PathBuf,

        /// Output PNG file
        #[arg(long, value_name = "FILE")]
        png: PathBuf,

        /// Canvas width in pixels
        #[arg(long, default_value_t = preview::DEFAULT_CANVAS)]
        width: u32,

        /// Canvas height in pixels
        #[arg(long, default_value_t = preview::DEFAULT_CANVAS)]
        height: u32,

        /// Image X position (centered if omitted)
        #[arg(long, allow_hyphen_values = true)]
        x: Option<i32>,

        /// Image Y position (centered if omitted)
        #[arg(long, allow_hyphen_values = true)]
        y: Option<i32>,

        /// Integer upscale factor
        #[arg(long, default_value_t = 1)]
        scale: u32,

        /// Blend over --bg with this opacity (0-255)
        #[arg(long)]
        alpha: Option<u8>,

        /// Blend background color
        #[arg(long, value_parser = parse_hex_color, default_value = "000000")]
        bg: [u8; 3],

        /// Canvas fill color
        #[arg(long, value_parser = parse_hex_color, default_value = "000000")]
        clear: [u8; 3],

        /// Channel order of the simulated frame buffer
        #[arg(long, default_value = "bgr")]
        order: ChannelOrder,
    },
}

/// Parse `RRGGBB` or `#RRGGBB` into `[r, g, b]`.
fn parse_hex_color(s: &str) -> Result<[u8; 3], String> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(format!("expected RRGGBB, got '{}'", s));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| format!("invalid hex color '{}'", s))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), PixelbakeError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            name,
            outdir,
            scale,
            alpha,
            no_copy,
            order,
            bytes_per_line,
        } => {
            let config = GeneratorConfig {
                name,
                outdir: Some(outdir),
                scale,
                alpha,
                copy: !no_copy,
                channel_order: Some(order),
                bytes_per_line,
                ..GeneratorConfig::new(input)
            };
            let generated = pipeline::generate(&config)?;
            print_summary(&generated, order);
            Ok(())
        }

        Commands::Batch { manifest } => {
            let manifest = Manifest::load(&manifest)?;
            let results = pipeline::generate_batch(&manifest.images)?;

            let mut failed = 0;
            for (config, result) in manifest.images.iter().zip(results) {
                match result {
                    Ok(generated) => {
                        print_summary(&generated, config.channel_order());
                        println!();
                    }
                    Err(e) => {
                        eprintln!("Error: {}: {}", config.input.display(), e);
                        failed += 1;
                    }
                }
            }

            let total = manifest.images.len();
            println!("Converted {} of {} images", total - failed, total);
            if failed > 0 {
                return Err(PixelbakeError::Manifest(format!(
                    "{} of {} entries failed",
                    failed, total
                )));
            }
            Ok(())
        }

        Commands::Preview {
            input,
            png,
            width,
            height,
            x,
            y,
            scale,
            alpha,
            bg,
            clear,
            order,
        } => {
            let image = source::open(&input, order)?;

            let mode = match alpha {
                Some(a) => PreviewMode::Blend(BlendParams::new(a, order.arrange(bg)).with_scale(scale)),
                None if scale > 1 => PreviewMode::Scaled(scale),
                None => PreviewMode::Copy,
            };

            let mut opts = PreviewOptions {
                width,
                height,
                origin: None,
                mode,
                clear,
            };
            if x.is_some() || y.is_some() {
                let (cx, cy) = opts.resolve_origin(&image);
                opts.origin = Some((x.unwrap_or(cx), y.unwrap_or(cy)));
            }
            let (ox, oy) = opts.resolve_origin(&image);

            let canvas = preview::render_preview(&image, &opts);
            canvas
                .save(&png)
                .map_err(|e| PixelbakeError::Io(std::io::Error::other(e.to_string())))?;

            println!("Input:  {}", input.display());
            println!("Size:   {}x{} pixels", image.width(), image.height());
            println!("Mode:   {:?} at ({}, {})", opts.mode, ox, oy);
            println!("Canvas: {}x{} {}", width, height, order.format_tag().to_uppercase());
            println!("Output: {}", png.display());
            Ok(())
        }
    }
}

fn print_summary(generated: &Generated, order: ChannelOrder) {
    let bytes = generated.table_bytes;
    println!("Input:  {}", generated.input.display());
    println!("Size:   {}x{} pixels", generated.width, generated.height);
    println!("Layout: {}", order.format_tag().to_uppercase());
    println!("Funcs:  {}", generated.functions.join(", "));
    println!("Output: {}", generated.header_path.display());
    println!("        {}", generated.source_path.display());
    println!("Bytes:  {} ({:.1} KB)", bytes, bytes as f64 / 1024.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("ff8000"), Ok([255, 128, 0]));
        assert_eq!(parse_hex_color("#0A0b0C"), Ok([10, 11, 12]));
        assert!(parse_hex_color("fff").is_err());
        assert!(parse_hex_color("gg0000").is_err());
        assert!(parse_hex_color("ééé").is_err());
    }

    #[test]
    fn test_cli_parses_convert() {
        let cli = Cli::try_parse_from([
            "pixelbake", "convert", "logo.png", "--scale", "3", "--alpha", "--order", "rgb",
        ])
        .unwrap();
        match cli.command {
            Commands::Convert { scale, alpha, order, no_copy, .. } => {
                assert_eq!(scale.map(Scale::get), Some(3));
                assert!(alpha);
                assert!(!no_copy);
                assert_eq!(order, ChannelOrder::Rgb);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_rejects_out_of_range_scale() {
        assert!(Cli::try_parse_from(["pixelbake", "convert", "logo.png", "--scale", "1"]).is_err());
        assert!(Cli::try_parse_from(["pixelbake", "convert", "logo.png", "--scale", "17"]).is_err());
    }

    #[test]
    fn test_cli_preview_negative_origin() {
        let cli = Cli::try_parse_from([
            "pixelbake", "preview", "logo.png", "--png", "out.png", "--x", "-10",
        ])
        .unwrap();
        match cli.command {
            Commands::Preview { x, y, .. } => {
                assert_eq!(x, Some(-10));
                assert_eq!(y, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}

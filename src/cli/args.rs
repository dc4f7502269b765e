use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::atlas::Background;

#[derive(Parser, Debug)]
#[command(name = "tilesheet")]
#[command(version, about = "Grid tile sheet packer", long_about = None)]
pub struct CliArgs {
    /// Defaults to `pack` with every option at its default
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Pack a directory of same-sized tiles into one tile sheet
    Pack(PackArgs),
    /// Write image sizes into a physics shape manifest
    Shapes(ShapesArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct PackArgs {
    /// Directory containing the tiles [default: tiles]
    #[arg(short, long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Tile sheet image to write [default: tilesheet.png]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Load settings from a JSON config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Padding around each tile in pixels [default: 0]
    #[arg(short, long)]
    pub padding: Option<u32>,

    /// Maximum atlas width in pixels [default: 2048]
    #[arg(long)]
    pub max_width: Option<u32>,

    /// Canvas fill: transparent, white, black, #RRGGBB or #RRGGBBAA [default: transparent]
    #[arg(long, value_name = "COLOR")]
    pub background: Option<Background>,

    /// Tile file extension, case-sensitive [default: png]
    #[arg(long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Also write the tile placement mapping as JSON
    #[arg(long, value_name = "FILE")]
    pub metadata: Option<PathBuf>,

    /// Compress PNG output (0-6 or 'max'). Default level is 2 if flag is present without value.
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ShapesArgs {
    /// Physics project manifest to read
    #[arg(short, long, value_name = "FILE", default_value = crate::shapes::DEFAULT_SHAPES_INPUT)]
    pub input: PathBuf,

    /// Annotated manifest to write
    #[arg(short, long, value_name = "FILE", default_value = crate::shapes::DEFAULT_SHAPES_OUTPUT)]
    pub output: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// PNG compression level (0-6 or max)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionLevel {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression
    Max,
}

impl std::str::FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("max") {
            Ok(CompressionLevel::Max)
        } else {
            s.parse::<u8>()
                .map_err(|_e| format!("invalid compression level: {}", s))
                .and_then(|n| {
                    if n <= 6 {
                        Ok(CompressionLevel::Level(n))
                    } else {
                        Err(format!("compression level must be 0-6 or 'max', got {}", n))
                    }
                })
        }
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        CompressionLevel::Level(2)
    }
}

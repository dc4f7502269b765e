use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use tilesheet::atlas::Background;
use tilesheet::cli::{CliArgs, Command, CompressionLevel, PackArgs, ShapesArgs};
use tilesheet::config::{CompressConfig, LoadedConfig, TilesheetConfig};
use tilesheet::observer::LogObserver;
use tilesheet::pack::{PackOptions, pack};
use tilesheet::shapes::annotate_shapes;
use tilesheet::tile::collect_tile_paths;

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // Use eprintln instead of error! because logger may not be initialized
        // (e.g., config loading fails before logger init)
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse();

    match cli.command.unwrap_or_else(|| Command::Pack(PackArgs::default())) {
        Command::Pack(args) => run_pack(&args),
        Command::Shapes(args) => run_shapes(&args),
    }
}

fn init_logging(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn run_pack(args: &PackArgs) -> Result<()> {
    // Load config if specified and merge with CLI args
    let merged = merge_config_with_args(args)?;

    init_logging(merged.verbose);
    info!("Tilesheet packer v{}", env!("CARGO_PKG_VERSION"));

    let paths = collect_tile_paths(&merged.input_dir, &merged.extension)?;
    info!(
        "Found {} tiles in {}",
        paths.len(),
        merged.input_dir.display()
    );

    let options = PackOptions {
        max_width: merged.max_width,
        padding: merged.padding,
        background: merged.background,
        compress: merged.compress,
        metadata: merged.metadata,
        name_base: Some(merged.input_dir.clone()),
    };

    let report = pack(&paths, &merged.output, &options, &LogObserver)?;

    if let Some(json_path) = &options.metadata {
        info!("Generated {}", json_path.display());
    }
    info!(
        "Packed {} tiles into {}",
        report.tile_count(),
        report.output.display()
    );

    Ok(())
}

fn run_shapes(args: &ShapesArgs) -> Result<()> {
    init_logging(args.verbose);

    let count = annotate_shapes(&args.input, &args.output)?;
    info!("Annotated {} bodies", count);

    Ok(())
}

/// Merged configuration from CLI args and optional config file.
struct MergedConfig {
    input_dir: PathBuf,
    output: PathBuf,
    extension: String,
    padding: u32,
    max_width: u32,
    background: Background,
    metadata: Option<PathBuf>,
    compress: Option<CompressionLevel>,
    verbose: bool,
}

/// Merge config file values with CLI arguments.
/// CLI arguments always take precedence over config values.
fn merge_config_with_args(args: &PackArgs) -> Result<MergedConfig> {
    // Load config if specified
    let loaded_config = if let Some(config_path) = &args.config {
        Some(
            LoadedConfig::load(config_path)
                .with_context(|| format!("failed to load config: {}", config_path.display()))?,
        )
    } else {
        None
    };
    let defaults = TilesheetConfig::default();

    // Paths: CLI > config (relative to the config file) > default
    let input_dir = args.input_dir.clone().unwrap_or_else(|| {
        loaded_config
            .as_ref()
            .map(|lc| lc.resolve_input_dir())
            .unwrap_or_else(|| PathBuf::from(&defaults.input_dir))
    });

    let output = args.output.clone().unwrap_or_else(|| {
        loaded_config
            .as_ref()
            .map(|lc| lc.resolve_output_file())
            .unwrap_or_else(|| PathBuf::from(&defaults.output_file))
    });

    let metadata = args
        .metadata
        .clone()
        .or_else(|| loaded_config.as_ref().and_then(|lc| lc.resolve_metadata()));

    let config = loaded_config
        .as_ref()
        .map(|lc| &lc.config)
        .unwrap_or(&defaults);

    let extension = args
        .extension
        .clone()
        .unwrap_or_else(|| config.extension.clone());
    let padding = args.padding.unwrap_or(config.padding);
    let max_width = args.max_width.unwrap_or(config.max_width);

    // Background: CLI > config > default
    let background = match args.background {
        Some(bg) => bg,
        None => config
            .background
            .parse::<Background>()
            .context("invalid background in config file")?,
    };

    // Compress: CLI option overrides config
    let compress = if args.compress.is_some() {
        args.compress
    } else {
        match &config.compress {
            Some(CompressConfig::Level(n)) if *n > 6 => {
                anyhow::bail!("compression level must be 0-6 or 'max' in config file, got {n}")
            }
            Some(CompressConfig::Level(n)) => Some(CompressionLevel::Level(*n)),
            Some(CompressConfig::Max(s)) => Some(
                s.parse::<CompressionLevel>()
                    .map_err(|e| anyhow::anyhow!("{e} in config file"))?,
            ),
            None => None,
        }
    };

    Ok(MergedConfig {
        input_dir,
        output,
        extension,
        padding,
        max_width,
        background,
        metadata,
        compress,
        // Verbose is CLI-only
        verbose: args.verbose,
    })
}

//! `stitchstack` CLI - stack images vertically into WebP files.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stitchstack::pipeline::{DEFAULT_MAX_HEIGHT, DEFAULT_QUALITY};
use stitchstack::{Config, InputSet, SplitPolicy, Stitcher};

/// Stack images vertically into WebP files, splitting stacks that are too tall.
///
/// Pass either a single directory, whose .jpg, .jpeg, .png and .webp files are
/// stacked in name order, or two or more image files in the order to stack
/// them. Output is written next to the first image.
#[derive(Parser, Debug)]
#[command(name = "stitchstack")]
#[command(version, about, long_about)]
struct Args {
    /// A directory, or two or more image files.
    #[arg(value_name = "INPUT", required_unless_present = "list")]
    inputs: Vec<PathBuf>,

    /// Read newline-separated image paths from FILE ("-" for stdin).
    #[arg(short, long, value_name = "FILE", conflicts_with = "inputs")]
    list: Option<PathBuf>,

    /// Maximum height of one output image. WebP allows at most 16383.
    #[arg(long, default_value_t = DEFAULT_MAX_HEIGHT, value_name = "PIXELS")]
    max_height: u32,

    /// Output WebP quality (1-100).
    #[arg(short, long, default_value_t = DEFAULT_QUALITY, value_name = "INT")]
    quality: u8,

    /// How to divide a stack that exceeds the maximum height.
    #[arg(short, long, value_enum, default_value_t = SplitPolicy::Balanced)]
    policy: SplitPolicy,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("stitchstack={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run(&args) {
        tracing::error!("{err:#}");
        let code = err
            .downcast_ref::<stitchstack::Error>()
            .map_or(1, stitchstack::Error::exit_code);
        return ExitCode::from(code);
    }

    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<()> {
    let config = Config {
        max_height: args.max_height,
        quality: args.quality,
        policy: args.policy,
    };
    let stitcher = Stitcher::new(config).context("Invalid configuration")?;

    let inputs = match &args.list {
        Some(list) => InputSet::from_list_file(list),
        None => InputSet::from_args(&args.inputs),
    }
    .context("Failed to collect input images")?;

    let outputs = stitcher
        .stitch(&inputs)
        .context("Failed to stitch images")?;

    if let [single] = outputs.as_slice() {
        println!("Stitched image saved to {}.", single.display());
    } else {
        for (i, path) in outputs.iter().enumerate() {
            println!("Image part {} saved to {}.", i + 1, path.display());
        }
    }

    Ok(())
}

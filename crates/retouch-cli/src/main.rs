//! retouch - command-line front end for the retouch image editor
//!
//! Loads an image, applies grayscale, gamma and color-depth transforms, and
//! reports per-channel histograms and entropy.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use retouch_ops::gamma::DEFAULT_GAMMA;
use retouch_ops::{GrayscaleMethod, QuantizePolicy};

mod commands;

use commands::edit::Step;

#[derive(Parser)]
#[command(name = "retouch")]
#[command(author, version, about = "Raster image editor: grayscale, gamma, color depth, statistics")]
#[command(long_about = "
Applies pixel-level transforms to PNG and JPEG images and reports
per-channel histograms and Shannon entropy.

Examples:
  retouch info photo.png                         # Histograms and entropy
  retouch info a.png b.jpg --json                # Machine-readable report
  retouch grayscale photo.png -o gray.png -m average
  retouch gamma photo.png -o bright.png -g 2.2
  retouch depth photo.png -o poster.png -p dynamic --red 2 --green 2 --blue 2
  retouch edit photo.png -o out.png --op gray:lightness --op gamma:1.8 --stats
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "FILE")]
    log: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show dimensions, histograms and entropy
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Convert to grayscale
    #[command(visible_alias = "gray")]
    Grayscale(GrayscaleArgs),

    /// Gamma-correct red, green and blue
    Gamma(GammaArgs),

    /// Reduce per-channel color depth
    Depth(DepthArgs),

    /// Apply a sequence of steps in one session
    Edit(EditArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct GrayscaleArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Method: lightness, average, luminosity
    #[arg(short, long, default_value_t = GrayscaleMethod::Luminosity)]
    method: GrayscaleMethod,
}

#[derive(Args)]
struct GammaArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Gamma in (0, 4]
    #[arg(short, long, default_value_t = DEFAULT_GAMMA, value_parser = commands::parse_gamma)]
    gamma: f64,
}

#[derive(Args)]
struct DepthArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Level representative: lowest, highest, middle, dynamic
    #[arg(short, long, default_value_t = QuantizePolicy::Middle)]
    policy: QuantizePolicy,

    /// Red bits (1-8)
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u8).range(1..=8))]
    red: u8,

    /// Green bits (1-8)
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u8).range(1..=8))]
    green: u8,

    /// Blue bits (1-8)
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u8).range(1..=8))]
    blue: u8,

    /// Alpha bits (1-8); no effect on images without an alpha channel
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u8).range(1..=8))]
    alpha: u8,
}

#[derive(Args)]
struct EditArgs {
    /// Input image
    input: PathBuf,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Step to apply, repeatable: gray[:METHOD], gamma:G,
    /// depth:POLICY:R,G,B,A (or depth:POLICY:N), revert
    #[arg(long = "op", value_name = "STEP", required = true)]
    ops: Vec<Step>,

    /// Print the statistics report of the result
    #[arg(long)]
    stats: bool,
}

fn init_logging(verbose: u8, log: Option<&PathBuf>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("retouch={level}").into());

    let (file_layer, guard) = match log {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}

fn run(cli: Cli) -> Result<()> {
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Grayscale(args) => commands::grayscale::run(args, cli.verbose),
        Commands::Gamma(args) => commands::gamma::run(args, cli.verbose),
        Commands::Depth(args) => commands::depth::run(args, cli.verbose),
        Commands::Edit(args) => commands::edit::run(args, cli.verbose),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match init_logging(cli.verbose, cli.log.as_ref()) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("retouch: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = run(cli) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

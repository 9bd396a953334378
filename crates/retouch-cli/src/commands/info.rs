//! Image info command.
//!
//! Prints dimensions and the per-channel histogram and entropy report.

use crate::InfoArgs;
use anyhow::{Context, Result};
use retouch_core::PixelLayout;
use retouch_io::Format;
use retouch_ops::ImageStatistics;
use serde::Serialize;
use std::path::Path;
use tracing::trace;

/// One element of the `--json` array.
#[derive(Serialize)]
struct InfoReport<'a> {
    path: String,
    format: &'static str,
    width: u32,
    height: u32,
    source_channels: u32,
    layout: &'static str,
    revision: u64,
    statistics: &'a ImageStatistics,
}

/// Runs the info command.
pub fn run(args: InfoArgs, _verbose: u8) -> Result<()> {
    let mut reports = Vec::new();

    for (i, path) in args.input.iter().enumerate() {
        trace!(input = %path.display(), "info::run");
        let format = Format::detect(path).unwrap_or(Format::Unknown);
        let mut editor = super::open_editor(path)?;

        let source_channels = editor.original().map(|o| o.channels).unwrap_or(0);
        let layout = match editor.working().map(|w| w.layout()) {
            Some(PixelLayout::Rgba) => "rgba",
            _ => "rgb",
        };
        let revision = editor.revision().get();
        let stats = editor
            .statistics()
            .with_context(|| format!("Failed to compute statistics: {}", path.display()))?;

        if args.json {
            let report = InfoReport {
                path: path.display().to_string(),
                format: format.name(),
                width: stats.width,
                height: stats.height,
                source_channels,
                layout,
                revision,
                statistics: stats,
            };
            reports.push(serde_json::to_value(&report)?);
        } else {
            if i > 0 {
                println!();
            }
            print_text(path, format, source_channels, layout, stats);
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    Ok(())
}

fn print_text(
    path: &Path,
    format: Format,
    source_channels: u32,
    layout: &str,
    stats: &ImageStatistics,
) {
    println!("{}", path.display());
    println!("  Format:     {}", format.name());
    println!("  Resolution: {}x{}", stats.width, stats.height);
    println!("  Channels:   {} (stored {})", source_channels, layout);
    println!("  Pixels:     {}", stats.pixel_count());
    println!();
    print!("{}", stats);
}

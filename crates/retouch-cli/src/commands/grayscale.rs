//! Grayscale command

use crate::GrayscaleArgs;
use anyhow::Result;
use tracing::{info, trace};

pub fn run(args: GrayscaleArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), method = %args.method, "grayscale::run");

    let mut editor = super::open_editor(&args.input)?;
    info!(method = %args.method, "Converting to grayscale");
    editor.convert_to_grayscale(args.method)?;
    super::save_editor(&editor, &args.output)?;

    if verbose > 0 {
        println!(
            "Converted {} to grayscale ({}) -> {}",
            args.input.display(),
            args.method,
            args.output.display()
        );
    }
    Ok(())
}

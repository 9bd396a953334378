//! Gamma correction command

use crate::GammaArgs;
use anyhow::Result;
use tracing::{info, trace};

pub fn run(args: GammaArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), gamma = args.gamma, "gamma::run");

    let mut editor = super::open_editor(&args.input)?;
    info!(gamma = args.gamma, "Applying gamma correction");
    editor.gamma_correct(args.gamma)?;
    super::save_editor(&editor, &args.output)?;

    if verbose > 0 {
        println!(
            "Applied gamma {} to {} -> {}",
            args.gamma,
            args.input.display(),
            args.output.display()
        );
    }
    Ok(())
}

//! Color-depth reduction command

use crate::DepthArgs;
use anyhow::Result;
use retouch_ops::ChannelDepths;
use tracing::{info, trace};

pub fn run(args: DepthArgs, verbose: u8) -> Result<()> {
    let depths = ChannelDepths::new(args.red, args.green, args.blue, args.alpha);
    trace!(input = %args.input.display(), %depths, policy = %args.policy, "depth::run");

    let mut editor = super::open_editor(&args.input)?;
    info!(%depths, policy = %args.policy, "Reducing color depth");
    editor.reduce_color_depth(depths, args.policy)?;
    super::save_editor(&editor, &args.output)?;

    if verbose > 0 {
        println!(
            "Reduced {} to {} bits ({}) -> {}",
            args.input.display(),
            depths,
            args.policy,
            args.output.display()
        );
    }
    Ok(())
}

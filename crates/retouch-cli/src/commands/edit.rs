//! Multi-step edit command
//!
//! Runs several transforms on one editor session, so `revert` and the
//! statistics report see the whole sequence.

use crate::EditArgs;
use anyhow::{Context, Result};
use retouch_ops::depth::{MAX_DEPTH, MIN_DEPTH};
use retouch_ops::{ChannelDepths, GrayscaleMethod, PixelOp, QuantizePolicy};
use std::fmt;
use std::str::FromStr;
use tracing::{info, trace};

/// One `--op` argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Apply a pixel operation.
    Apply(PixelOp),
    /// Restore the loaded pixels.
    Revert,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Apply(op) => write!(f, "{}", op),
            Step::Revert => f.write_str("revert"),
        }
    }
}

fn parse_depth(s: &str) -> Result<u8, String> {
    let depth: u8 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a bit depth", s))?;
    if !(MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
        return Err(format!("depth must be in {}..={}, got {}", MIN_DEPTH, MAX_DEPTH, depth));
    }
    Ok(depth)
}

fn parse_depths(s: &str) -> Result<ChannelDepths, String> {
    let parts = s.split(',').map(parse_depth).collect::<Result<Vec<_>, _>>()?;
    match parts[..] {
        [d] => Ok(ChannelDepths::uniform(d)),
        [r, g, b, a] => Ok(ChannelDepths::new(r, g, b, a)),
        _ => Err(format!("expected 1 or 4 depths, got '{}'", s)),
    }
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let name = parts.next().unwrap_or_default().to_ascii_lowercase();
        let first = parts.next();
        let second = parts.next();

        let step = match (name.as_str(), first, second) {
            ("revert", None, None) => Step::Revert,
            ("gray" | "grayscale", None, None) => {
                Step::Apply(PixelOp::Grayscale(GrayscaleMethod::default()))
            }
            ("gray" | "grayscale", Some(method), None) => {
                let method = method.parse::<GrayscaleMethod>().map_err(|e| e.to_string())?;
                Step::Apply(PixelOp::Grayscale(method))
            }
            ("gamma", Some(g), None) => Step::Apply(PixelOp::Gamma(super::parse_gamma(g)?)),
            ("depth", Some(policy), Some(depths)) => {
                let policy = policy.parse::<QuantizePolicy>().map_err(|e| e.to_string())?;
                let depths = parse_depths(depths)?;
                Step::Apply(PixelOp::ReduceDepth { depths, policy })
            }
            _ => {
                return Err(format!(
                    "invalid step '{}' (expected gray[:METHOD], gamma:G, depth:POLICY:DEPTHS or revert)",
                    s
                ));
            }
        };
        Ok(step)
    }
}

/// Runs the edit command.
pub fn run(args: EditArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), steps = args.ops.len(), "edit::run");

    let mut editor = super::open_editor(&args.input)?;

    for (i, step) in args.ops.iter().enumerate() {
        info!(step = i + 1, %step, "Applying step");
        let result = match step {
            Step::Apply(op) => editor.apply(*op),
            Step::Revert => editor.revert_to_original(),
        };
        result.with_context(|| format!("Step {} ({}) failed", i + 1, step))?;

        if verbose > 0 {
            println!("[{}] {} -> revision {}", i + 1, step, editor.revision().get());
        }
    }

    super::save_editor(&editor, &args.output)?;

    if args.stats {
        let stats = editor.statistics().context("Failed to compute statistics")?;
        print!("{}", stats);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps() {
        assert_eq!("revert".parse::<Step>(), Ok(Step::Revert));
        assert_eq!(
            "gray".parse::<Step>(),
            Ok(Step::Apply(PixelOp::Grayscale(GrayscaleMethod::Luminosity)))
        );
        assert_eq!(
            "grayscale:average".parse::<Step>(),
            Ok(Step::Apply(PixelOp::Grayscale(GrayscaleMethod::Average)))
        );
        assert_eq!("gamma:1.8".parse::<Step>(), Ok(Step::Apply(PixelOp::Gamma(1.8))));
        assert_eq!(
            "depth:dynamic:1,2,3,8".parse::<Step>(),
            Ok(Step::Apply(PixelOp::ReduceDepth {
                depths: ChannelDepths::new(1, 2, 3, 8),
                policy: QuantizePolicy::Dynamic,
            }))
        );
        assert_eq!(
            "depth:lowest:4".parse::<Step>(),
            Ok(Step::Apply(PixelOp::ReduceDepth {
                depths: ChannelDepths::uniform(4),
                policy: QuantizePolicy::Lowest,
            }))
        );
    }

    #[test]
    fn test_reject_bad_steps() {
        for bad in [
            "",
            "blur",
            "revert:now",
            "gray:sepia",
            "gamma",
            "gamma:0",
            "gamma:5",
            "depth:middle",
            "depth:median:8",
            "depth:middle:0",
            "depth:middle:1,2",
            "depth:middle:1,2,3,9",
        ] {
            assert!(bad.parse::<Step>().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Step::Revert.to_string(), "revert");
        assert_eq!(Step::Apply(PixelOp::Gamma(2.0)).to_string(), "gamma(2)");
    }
}

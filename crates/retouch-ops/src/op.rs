//! Closed set of per-pixel operations.

use retouch_core::Rgba;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::depth::{self, ChannelDepths, QuantizePolicy};
use crate::gamma;
use crate::grayscale::GrayscaleMethod;
use crate::lut::PixelLut;
use crate::OpsResult;

/// A pure pixel-to-pixel transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelOp {
    /// Collapse r, g, b to one gray value.
    Grayscale(GrayscaleMethod),
    /// Gamma correction on r, g, b.
    Gamma(f64),
    /// Quantize every channel to its own bit depth.
    ReduceDepth {
        /// Bits per channel.
        depths: ChannelDepths,
        /// Representative value per level.
        policy: QuantizePolicy,
    },
}

impl PixelOp {
    /// Short name for logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Grayscale(_) => "grayscale",
            Self::Gamma(_) => "gamma",
            Self::ReduceDepth { .. } => "reduce_depth",
        }
    }

    /// Checks the parameters without touching any pixel.
    pub fn validate(&self) -> OpsResult<()> {
        match *self {
            Self::Grayscale(_) => Ok(()),
            Self::Gamma(g) => gamma::validate_gamma(g),
            Self::ReduceDepth { depths, .. } => depths.validate(),
        }
    }

    /// Applies the formula to one pixel.
    ///
    /// Parameters are assumed valid; call [`PixelOp::validate`] first.
    pub fn apply(&self, px: Rgba) -> Rgba {
        match *self {
            Self::Grayscale(method) => method.apply(px),
            Self::Gamma(g) => Rgba::new(
                gamma::gamma_correct_value(px.r, g),
                gamma::gamma_correct_value(px.g, g),
                gamma::gamma_correct_value(px.b, g),
                px.a,
            ),
            Self::ReduceDepth { depths, policy } => Rgba::new(
                depth::quantize(px.r, depths.red, policy),
                depth::quantize(px.g, depths.green, policy),
                depth::quantize(px.b, depths.blue, policy),
                depth::quantize(px.a, depths.alpha, policy),
            ),
        }
    }

    /// Validates and prepares the op for a full-buffer pass.
    pub fn compile(&self) -> OpsResult<PixelKernel> {
        match *self {
            Self::Grayscale(method) => Ok(PixelKernel::Grayscale(method)),
            Self::Gamma(g) => Ok(PixelKernel::Lut(gamma::gamma_lut(g)?)),
            Self::ReduceDepth { depths, policy } => {
                Ok(PixelKernel::Lut(depth::depth_lut(depths, policy)?))
            }
        }
    }
}

impl fmt::Display for PixelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grayscale(method) => write!(f, "grayscale({})", method),
            Self::Gamma(g) => write!(f, "gamma({})", g),
            Self::ReduceDepth { depths, policy } => {
                write!(f, "reduce_depth({}, {})", depths, policy)
            }
        }
    }
}

/// Compiled form of a [`PixelOp`].
///
/// Per-channel ops become lookup tables; grayscale mixes channels and is
/// evaluated directly.
#[derive(Debug, Clone)]
pub enum PixelKernel {
    /// Channel-mixing grayscale.
    Grayscale(GrayscaleMethod),
    /// Independent per-channel tables.
    Lut(PixelLut),
}

impl PixelKernel {
    /// Transforms one pixel.
    #[inline]
    pub fn apply(&self, px: Rgba) -> Rgba {
        match self {
            Self::Grayscale(method) => method.apply(px),
            Self::Lut(lut) => lut.apply(px),
        }
    }
}

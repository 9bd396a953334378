//! Grayscale conversions.
//!
//! Each method collapses r, g and b to a single lightness value `L` and
//! returns `(L, L, L, a)`. Fractions are truncated toward zero.

use retouch_core::Rgba;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::OpsError;

/// Red weight of the luminosity method.
pub const LUMINOSITY_RED: f64 = 0.21;
/// Green weight of the luminosity method.
pub const LUMINOSITY_GREEN: f64 = 0.72;
/// Blue weight of the luminosity method.
pub const LUMINOSITY_BLUE: f64 = 0.07;

/// How r, g and b are combined into one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrayscaleMethod {
    /// Midpoint of the largest and smallest component.
    Lightness,
    /// Arithmetic mean of the three components.
    Average,
    /// Weighted sum `0.21 r + 0.72 g + 0.07 b`.
    #[default]
    Luminosity,
}

impl GrayscaleMethod {
    /// All methods in menu order.
    pub const ALL: [GrayscaleMethod; 3] = [Self::Lightness, Self::Average, Self::Luminosity];

    /// Lowercase name as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lightness => "lightness",
            Self::Average => "average",
            Self::Luminosity => "luminosity",
        }
    }

    /// Computes the gray value for one pixel.
    #[inline]
    pub fn lightness_of(self, px: Rgba) -> u8 {
        match self {
            Self::Lightness => lightness(px),
            Self::Average => average(px),
            Self::Luminosity => luminosity(px),
        }
    }

    /// Converts one pixel, keeping alpha.
    #[inline]
    pub fn apply(self, px: Rgba) -> Rgba {
        Rgba::gray(self.lightness_of(px), px.a)
    }
}

impl fmt::Display for GrayscaleMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GrayscaleMethod {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lightness" => Ok(Self::Lightness),
            "average" | "avg" => Ok(Self::Average),
            "luminosity" | "luma" => Ok(Self::Luminosity),
            other => Err(OpsError::invalid_parameter(
                "method",
                format!("unknown grayscale method '{}'", other),
            )),
        }
    }
}

/// `(max(r,g,b) + min(r,g,b)) / 2`, truncated.
#[inline]
pub fn lightness(px: Rgba) -> u8 {
    let max = px.r.max(px.g).max(px.b) as u16;
    let min = px.r.min(px.g).min(px.b) as u16;
    ((max + min) / 2) as u8
}

/// `(r + g + b) / 3`, truncated.
#[inline]
pub fn average(px: Rgba) -> u8 {
    ((px.r as u16 + px.g as u16 + px.b as u16) / 3) as u8
}

/// `0.21 r + 0.72 g + 0.07 b`, truncated.
#[inline]
pub fn luminosity(px: Rgba) -> u8 {
    let l = LUMINOSITY_RED * px.r as f64
        + LUMINOSITY_GREEN * px.g as f64
        + LUMINOSITY_BLUE * px.b as f64;
    l as u8
}

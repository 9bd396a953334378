//! Color-depth reduction.
//!
//! A channel reduced to `d` bits has `2^d` levels, each covering
//! `increment = 256 / 2^d` input values. A value falls into level
//! `index = floor(v / increment)` spanning `[lowest, highest]`:
//!
//! ```text
//! lowest  = index * increment
//! highest = (index + 1) * increment - 1
//! ```
//!
//! The [`QuantizePolicy`] picks which value of that span represents the
//! level. All results are truncated toward zero.

use retouch_core::Channel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::lut::{ChannelLut, PixelLut};
use crate::{OpsError, OpsResult};

/// Smallest accepted bit depth.
pub const MIN_DEPTH: u8 = 1;
/// Largest accepted bit depth (no reduction).
pub const MAX_DEPTH: u8 = 8;

/// Representative value chosen for each quantization level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantizePolicy {
    /// Bottom of the level.
    Lowest,
    /// Top of the level.
    Highest,
    /// Halfway between bottom and top.
    #[default]
    Middle,
    /// Slides from bottom (first level) to top (last level), so the
    /// output still spans 0..=255.
    Dynamic,
}

impl QuantizePolicy {
    /// All policies.
    pub const ALL: [QuantizePolicy; 4] = [Self::Lowest, Self::Highest, Self::Middle, Self::Dynamic];

    /// Lowercase name as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lowest => "lowest",
            Self::Highest => "highest",
            Self::Middle => "middle",
            Self::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for QuantizePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QuantizePolicy {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lowest" | "low" => Ok(Self::Lowest),
            "highest" | "high" => Ok(Self::Highest),
            "middle" | "mid" => Ok(Self::Middle),
            "dynamic" => Ok(Self::Dynamic),
            other => Err(OpsError::invalid_parameter(
                "policy",
                format!("unknown quantize policy '{}'", other),
            )),
        }
    }
}

/// Target bit depth per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelDepths {
    /// Red bits.
    pub red: u8,
    /// Green bits.
    pub green: u8,
    /// Blue bits.
    pub blue: u8,
    /// Alpha bits.
    pub alpha: u8,
}

impl Default for ChannelDepths {
    fn default() -> Self {
        Self::uniform(MAX_DEPTH)
    }
}

impl ChannelDepths {
    /// Creates per-channel depths.
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Same depth on every channel.
    pub const fn uniform(depth: u8) -> Self {
        Self::new(depth, depth, depth, depth)
    }

    /// Depth for one channel.
    pub const fn get(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
            Channel::Alpha => self.alpha,
        }
    }

    /// Checks every depth lies in `MIN_DEPTH..=MAX_DEPTH`.
    pub fn validate(&self) -> OpsResult<()> {
        for channel in Channel::ALL {
            let depth = self.get(channel);
            if !(MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
                return Err(OpsError::invalid_parameter(
                    format!("{} depth", channel.label().to_ascii_lowercase()),
                    format!("{} is outside {}..={}", depth, MIN_DEPTH, MAX_DEPTH),
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Display for ChannelDepths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.red, self.green, self.blue, self.alpha)
    }
}

/// Width of one level for `depth` bits: `256 / 2^depth`.
#[inline]
pub fn increment_for_depth(depth: u8) -> f64 {
    256.0 / f64::from(1u32 << depth)
}

/// Quantizes one value. `depth` must be in `MIN_DEPTH..=MAX_DEPTH`.
pub fn quantize(value: u8, depth: u8, policy: QuantizePolicy) -> u8 {
    let increment = increment_for_depth(depth);
    let index = (f64::from(value) / increment).floor();
    let lowest = index * increment;
    let highest = (index + 1.0) * increment - 1.0;

    let out = match policy {
        QuantizePolicy::Lowest => lowest,
        QuantizePolicy::Highest => highest,
        QuantizePolicy::Middle => lowest + 0.5 * (highest - lowest),
        QuantizePolicy::Dynamic => {
            let max_index = (255.0 / increment).floor();
            lowest + (index / max_index) * (highest - lowest)
        }
    };
    out as u8
}

/// Table for a single channel.
pub fn depth_channel_lut(depth: u8, policy: QuantizePolicy) -> ChannelLut {
    if depth >= MAX_DEPTH {
        return ChannelLut::identity();
    }
    ChannelLut::from_fn(|v| quantize(v, depth, policy))
}

/// Compiles a depth reduction into per-channel tables.
pub fn depth_lut(depths: ChannelDepths, policy: QuantizePolicy) -> OpsResult<PixelLut> {
    depths.validate()?;
    Ok(PixelLut::new(
        depth_channel_lut(depths.red, policy),
        depth_channel_lut(depths.green, policy),
        depth_channel_lut(depths.blue, policy),
        depth_channel_lut(depths.alpha, policy),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use retouch_core::Rgba;

    #[test]
    fn test_increment() {
        assert_eq!(increment_for_depth(1), 128.0);
        assert_eq!(increment_for_depth(4), 16.0);
        assert_eq!(increment_for_depth(8), 1.0);
    }

    #[test]
    fn test_one_bit_upper_level() {
        assert_eq!(quantize(200, 1, QuantizePolicy::Lowest), 128);
        assert_eq!(quantize(200, 1, QuantizePolicy::Highest), 255);
        assert_eq!(quantize(200, 1, QuantizePolicy::Middle), 191);
        assert_eq!(quantize(200, 1, QuantizePolicy::Dynamic), 255);
    }

    #[test]
    fn test_one_bit_lower_level() {
        assert_eq!(quantize(100, 1, QuantizePolicy::Lowest), 0);
        assert_eq!(quantize(100, 1, QuantizePolicy::Highest), 127);
        assert_eq!(quantize(100, 1, QuantizePolicy::Middle), 63);
        assert_eq!(quantize(100, 1, QuantizePolicy::Dynamic), 0);
    }

    #[test]
    fn test_two_bit_dynamic_spreads_levels() {
        // increment 64, max index 3: levels map to 0, 85, 170, 255
        assert_eq!(quantize(10, 2, QuantizePolicy::Dynamic), 0);
        assert_eq!(quantize(70, 2, QuantizePolicy::Dynamic), 85);
        assert_eq!(quantize(130, 2, QuantizePolicy::Dynamic), 170);
        assert_eq!(quantize(250, 2, QuantizePolicy::Dynamic), 255);
    }

    #[test]
    fn test_full_depth_is_identity() {
        for policy in QuantizePolicy::ALL {
            for v in 0..=255u8 {
                assert_eq!(quantize(v, 8, policy), v, "{policy} {v}");
            }
            let lut = depth_lut(ChannelDepths::uniform(8), policy).unwrap();
            assert_eq!(lut.apply(Rgba::new(3, 99, 180, 42)), Rgba::new(3, 99, 180, 42));
        }
    }

    #[test]
    fn test_output_stays_in_level() {
        for depth in MIN_DEPTH..=MAX_DEPTH {
            let increment = increment_for_depth(depth);
            for policy in QuantizePolicy::ALL {
                for v in 0..=255u8 {
                    let index = (v as f64 / increment).floor();
                    let q = quantize(v, depth, policy) as f64;
                    assert!(q >= (index * increment).floor(), "{depth} {policy} {v}");
                    assert!(q <= (index + 1.0) * increment - 1.0, "{depth} {policy} {v}");
                }
            }
        }
    }

    #[test]
    fn test_per_channel_depths() {
        let lut = depth_lut(ChannelDepths::new(1, 8, 2, 1), QuantizePolicy::Lowest).unwrap();
        assert_eq!(lut.apply(Rgba::new(200, 200, 200, 100)), Rgba::new(128, 200, 192, 0));
    }

    #[test]
    fn test_validate() {
        assert!(ChannelDepths::uniform(1).validate().is_ok());
        assert!(ChannelDepths::default().validate().is_ok());
        assert!(ChannelDepths::new(8, 0, 8, 8).validate().is_err());
        assert!(ChannelDepths::new(8, 8, 8, 9).validate().is_err());
        assert!(depth_lut(ChannelDepths::uniform(0), QuantizePolicy::Middle).is_err());
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!("dynamic".parse::<QuantizePolicy>().unwrap(), QuantizePolicy::Dynamic);
        assert_eq!("HIGH".parse::<QuantizePolicy>().unwrap(), QuantizePolicy::Highest);
        assert!("median".parse::<QuantizePolicy>().is_err());
        assert_eq!(QuantizePolicy::default(), QuantizePolicy::Middle);
    }
}

//! Gamma correction.
//!
//! For each of r, g and b: `v' = trunc((v / 255) ^ (1 / gamma) * 255)`.
//! Alpha is never touched.

use crate::lut::{ChannelLut, PixelLut};
use crate::{OpsError, OpsResult};

/// Gamma suggested to users when none is given.
pub const DEFAULT_GAMMA: f64 = 2.2;

/// Upper bound of the gamma range offered to users.
pub const MAX_GAMMA: f64 = 4.0;

/// Rejects gamma values the formula cannot use.
pub fn validate_gamma(gamma: f64) -> OpsResult<()> {
    if !gamma.is_finite() {
        return Err(OpsError::invalid_parameter("gamma", format!("{} is not finite", gamma)));
    }
    if gamma <= 0.0 {
        return Err(OpsError::invalid_parameter("gamma", format!("{} must be > 0", gamma)));
    }
    Ok(())
}

/// Corrects a single component. `gamma` must already be validated.
#[inline]
pub fn gamma_correct_value(v: u8, gamma: f64) -> u8 {
    let normalized = v as f64 / 255.0;
    (normalized.powf(1.0 / gamma) * 255.0) as u8
}

/// Compiles gamma correction into a color lookup table.
pub fn gamma_lut(gamma: f64) -> OpsResult<PixelLut> {
    validate_gamma(gamma)?;
    Ok(PixelLut::color(ChannelLut::from_fn(|v| gamma_correct_value(v, gamma))))
}

//! Per-channel histograms and Shannon entropy.
//!
//! - [`Histogram`] - sparse value to count mapping for one channel
//! - [`ChannelStats`] - histogram plus entropy
//! - [`ImageStatistics`] - all four channels, computed in one pass
//!
//! `ImageStatistics` implements [`Display`](std::fmt::Display) as the
//! "Image Information" text report. Entropies in the report carry six
//! significant digits (`1.58496`); the serialized form keeps full precision.

use retouch_core::{Channel, PixelBuffer, PixelLayout};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::trace;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

type DenseCounts = [[u64; 256]; 4];

/// Significant digits of entropies in the text report.
const REPORT_DIGITS: usize = 6;

// ============================================================================
// Histogram
// ============================================================================

/// Occupied intensity values of one channel, in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Histogram {
    counts: BTreeMap<u8, u64>,
}

impl Histogram {
    /// Builds a sparse histogram from dense per-value counts.
    pub fn from_counts(dense: &[u64; 256]) -> Self {
        let counts = dense
            .iter()
            .enumerate()
            .filter(|&(_, &n)| n > 0)
            .map(|(v, &n)| (v as u8, n))
            .collect();
        Self { counts }
    }

    /// Count for `value`, zero if absent.
    pub fn get(&self, value: u8) -> u64 {
        self.counts.get(&value).copied().unwrap_or(0)
    }

    /// Occupied `(value, count)` pairs, ascending by value.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&v, &n)| (v, n))
    }

    /// Number of occupied values.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if no value is occupied.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Shannon entropy in bits.
    ///
    /// Empty values are skipped, so a single occupied value gives exactly 0.
    pub fn entropy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let total = total as f64;
        let mut entropy = 0.0;
        for &count in self.counts.values() {
            let p = count as f64 / total;
            entropy -= p * p.log2();
        }
        entropy
    }
}

// ============================================================================
// Channel / Image statistics
// ============================================================================

/// Statistics for one channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelStats {
    /// Which channel.
    pub channel: Channel,
    /// Value distribution.
    pub histogram: Histogram,
    /// Shannon entropy of `histogram`.
    pub entropy: f64,
}

impl ChannelStats {
    fn from_counts(channel: Channel, dense: &[u64; 256]) -> Self {
        let histogram = Histogram::from_counts(dense);
        let entropy = histogram.entropy();
        Self {
            channel,
            histogram,
            entropy,
        }
    }
}

/// Histograms and entropies for red, green, blue and alpha.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageStatistics {
    /// Image width.
    pub width: u32,
    /// Image height.
    pub height: u32,
    /// Per-channel results in red, green, blue, alpha order.
    pub channels: [ChannelStats; 4],
}

impl ImageStatistics {
    /// Computes all four channels in a single pass over `buffer`.
    ///
    /// Alpha of an [`PixelLayout::Rgb`] buffer counts as 255.
    pub fn compute(buffer: &PixelBuffer) -> Self {
        trace!(
            width = buffer.width(),
            height = buffer.height(),
            "computing channel statistics"
        );
        let dense = count_values(buffer);
        Self {
            width: buffer.width(),
            height: buffer.height(),
            channels: Channel::ALL.map(|c| ChannelStats::from_counts(c, &dense[c.index()])),
        }
    }

    /// Number of pixels counted per channel.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Statistics of one channel.
    pub fn channel(&self, channel: Channel) -> &ChannelStats {
        &self.channels[channel.index()]
    }

    /// Histogram of one channel.
    pub fn histogram(&self, channel: Channel) -> &Histogram {
        &self.channel(channel).histogram
    }

    /// Entropy of one channel.
    pub fn entropy(&self, channel: Channel) -> f64 {
        self.channel(channel).entropy
    }

    /// Channels in red, green, blue, alpha order.
    pub fn iter(&self) -> impl Iterator<Item = &ChannelStats> {
        self.channels.iter()
    }
}

impl fmt::Display for ImageStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stats in &self.channels {
            writeln!(f, "{} Channel:", stats.channel.label())?;
            writeln!(f, "  Histogram:")?;
            for (value, count) in stats.histogram.iter() {
                writeln!(f, "    {}: {}", value, count)?;
            }
            writeln!(f, "  Entropy: {}", format_significant(stats.entropy, REPORT_DIGITS))?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Formats `value` with `digits` significant digits and no trailing zeros.
///
/// Exponents below -4 or at least `digits` switch to `1.5e-05` form.
fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let digits = digits.max(1);
    let sci = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return sci;
    };
    if exp < -4 || exp >= digits as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exp.abs())
    } else {
        let decimals = (digits as i32 - 1 - exp) as usize;
        trim_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

// ============================================================================
// Counting
// ============================================================================

fn count_row(counts: &mut DenseCounts, row: &[u8], layout: PixelLayout) {
    for chunk in row.chunks_exact(layout.channels()) {
        let px = layout.read(chunk);
        counts[0][px.r as usize] += 1;
        counts[1][px.g as usize] += 1;
        counts[2][px.b as usize] += 1;
        counts[3][px.a as usize] += 1;
    }
}

#[cfg(feature = "parallel")]
fn count_values(buffer: &PixelBuffer) -> Box<DenseCounts> {
    if buffer.is_empty() {
        return Box::new([[0; 256]; 4]);
    }
    let layout = buffer.layout();
    buffer
        .data()
        .par_chunks(buffer.row_bytes())
        .fold(
            || Box::new([[0u64; 256]; 4]),
            |mut acc, row| {
                count_row(&mut acc, row, layout);
                acc
            },
        )
        .reduce(
            || Box::new([[0u64; 256]; 4]),
            |mut a, b| {
                for (ca, cb) in a.iter_mut().zip(b.iter()) {
                    for (x, y) in ca.iter_mut().zip(cb.iter()) {
                        *x += y;
                    }
                }
                a
            },
        )
}

#[cfg(not(feature = "parallel"))]
fn count_values(buffer: &PixelBuffer) -> Box<DenseCounts> {
    let mut counts = Box::new([[0u64; 256]; 4]);
    count_row(&mut counts, buffer.data(), buffer.layout());
    counts
}

//! Pixel and channel types.
//!
//! # Types
//!
//! - [`Rgba`] - four 8-bit channels, straight (not premultiplied) alpha
//! - [`Channel`] - selects one of the four channels
//!
//! ```
//! use retouch_core::{Channel, Rgba};
//!
//! let px = Rgba::new(255, 128, 0, 200);
//! assert_eq!(px.get(Channel::Green), 128);
//! assert_eq!(px.get(Channel::Alpha), 200);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// 8-bit RGBA pixel.
///
/// Alpha is carried opaquely: color transforms never premultiply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Rgba {
    /// Fully opaque alpha value.
    pub const OPAQUE: u8 = u8::MAX;

    /// Creates a pixel from its four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque pixel.
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, Self::OPAQUE)
    }

    /// Creates a gray pixel `(v, v, v, a)`.
    #[inline]
    pub const fn gray(v: u8, a: u8) -> Self {
        Self::new(v, v, v, a)
    }

    /// Returns the value of one channel.
    #[inline]
    pub const fn get(self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
            Channel::Alpha => self.a,
        }
    }

    /// Returns `true` if red, green and blue are equal.
    #[inline]
    pub const fn is_gray(self) -> bool {
        self.r == self.g && self.g == self.b
    }

    /// Returns the channels as `[r, g, b, a]`.
    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Rgba {
    #[inline]
    fn from(v: [u8; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Rgba> for [u8; 4] {
    #[inline]
    fn from(px: Rgba) -> Self {
        px.to_array()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// One of the four 8-bit intensity dimensions of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Red.
    Red,
    /// Green.
    Green,
    /// Blue.
    Blue,
    /// Alpha (opacity).
    Alpha,
}

impl Channel {
    /// All channels in storage order.
    pub const ALL: [Channel; 4] = [Channel::Red, Channel::Green, Channel::Blue, Channel::Alpha];

    /// Index of this channel inside an RGBA pixel.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
            Self::Alpha => 3,
        }
    }

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
            Self::Alpha => "Alpha",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_access() {
        let px = Rgba::new(1, 2, 3, 4);
        for (i, ch) in Channel::ALL.iter().enumerate() {
            assert_eq!(ch.index(), i);
            assert_eq!(px.get(*ch), px.to_array()[i]);
        }
    }

    #[test]
    fn test_array_conversion() {
        let px: Rgba = [10, 20, 30, 40].into();
        assert_eq!(px, Rgba::new(10, 20, 30, 40));
        let back: [u8; 4] = px.into();
        assert_eq!(back, [10, 20, 30, 40]);
    }

    #[test]
    fn test_gray() {
        assert!(Rgba::gray(77, 3).is_gray());
        assert!(!Rgba::opaque(1, 1, 2).is_gray());
        assert_eq!(Rgba::opaque(0, 0, 0).a, 255);
    }

    #[test]
    fn test_channel_labels() {
        assert_eq!(Channel::Alpha.to_string(), "Alpha");
        assert_eq!(Channel::Red.label(), "Red");
    }
}

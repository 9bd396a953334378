//! 256-entry lookup tables for per-channel transforms.
//!
//! Gamma correction and depth reduction map each 8-bit component
//! independently of the others, so they are evaluated once per possible
//! input value and then applied by indexing.

use retouch_core::{Channel, Rgba};

/// Lookup table mapping one 8-bit component to another.
#[derive(Clone, PartialEq, Eq)]
pub struct ChannelLut([u8; 256]);

impl ChannelLut {
    /// Table that returns its input.
    pub fn identity() -> Self {
        Self::from_fn(|v| v)
    }

    /// Builds a table by evaluating `f` for every value 0..=255.
    pub fn from_fn(mut f: impl FnMut(u8) -> u8) -> Self {
        let mut table = [0u8; 256];
        for (v, slot) in table.iter_mut().enumerate() {
            *slot = f(v as u8);
        }
        Self(table)
    }

    /// Maps a single value.
    #[inline]
    pub fn apply(&self, v: u8) -> u8 {
        self.0[v as usize]
    }

    /// Returns `true` if every entry maps to itself.
    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(i, &v)| i == v as usize)
    }
}

impl std::fmt::Debug for ChannelLut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_identity() {
            f.write_str("ChannelLut(identity)")
        } else {
            f.debug_tuple("ChannelLut").field(&&self.0[..]).finish()
        }
    }
}

/// One table per channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelLut {
    tables: [ChannelLut; 4],
}

impl PixelLut {
    /// Combines four channel tables (red, green, blue, alpha).
    pub fn new(red: ChannelLut, green: ChannelLut, blue: ChannelLut, alpha: ChannelLut) -> Self {
        Self {
            tables: [red, green, blue, alpha],
        }
    }

    /// Same table on r, g and b; alpha untouched.
    pub fn color(table: ChannelLut) -> Self {
        Self::new(table.clone(), table.clone(), table, ChannelLut::identity())
    }

    /// Table for one channel.
    pub fn channel(&self, channel: Channel) -> &ChannelLut {
        &self.tables[channel.index()]
    }

    /// Maps every component of `px` through its table.
    #[inline]
    pub fn apply(&self, px: Rgba) -> Rgba {
        Rgba::new(
            self.tables[0].apply(px.r),
            self.tables[1].apply(px.g),
            self.tables[2].apply(px.b),
            self.tables[3].apply(px.a),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let lut = ChannelLut::identity();
        assert!(lut.is_identity());
        for v in 0..=255u8 {
            assert_eq!(lut.apply(v), v);
        }
    }

    #[test]
    fn test_from_fn() {
        let invert = ChannelLut::from_fn(|v| 255 - v);
        assert!(!invert.is_identity());
        assert_eq!(invert.apply(0), 255);
        assert_eq!(invert.apply(200), 55);
    }

    #[test]
    fn test_color_keeps_alpha() {
        let lut = PixelLut::color(ChannelLut::from_fn(|_| 9));
        assert_eq!(lut.apply(Rgba::new(1, 2, 3, 4)), Rgba::new(9, 9, 9, 4));
        assert!(lut.channel(Channel::Alpha).is_identity());
    }
}

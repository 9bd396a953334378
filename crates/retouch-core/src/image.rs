//! Pixel buffer type.
//!
//! [`PixelBuffer`] is an owned width x height grid of 8-bit pixels stored
//! **row-major**, top-to-bottom, channels interleaved:
//!
//! ```text
//! Rgba layout: [R G B A R G B A ...]  <- Row 0
//!              [R G B A R G B A ...]  <- Row 1
//! Rgb layout:  [R G B R G B ...]      <- alpha-free storage
//! ```
//!
//! An [`PixelLayout::Rgb`] buffer stores no alpha, but every read through
//! [`PixelLayout::read`] yields alpha 255 and every write drops the alpha
//! component. Pixel functions therefore always see a full [`Rgba`].
//!
//! # Usage
//!
//! ```rust
//! use retouch_core::{PixelBuffer, PixelLayout, Rgba};
//!
//! let mut buf = PixelBuffer::filled(4, 2, PixelLayout::Rgb, Rgba::opaque(10, 20, 30));
//! buf.set_pixel(1, 1, Rgba::new(1, 2, 3, 9));
//!
//! // Rgb storage has no alpha: reads come back opaque.
//! assert_eq!(buf.pixel(1, 1), Rgba::opaque(1, 2, 3));
//! assert_eq!(buf.pixel_count(), 8);
//! ```

use crate::{Error, Result, Rgba};

/// Storage layout of a [`PixelBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// Three bytes per pixel, alpha implicitly 255.
    Rgb,
    /// Four bytes per pixel with explicit alpha.
    Rgba,
}

impl PixelLayout {
    /// Picks the layout for a source that does or does not carry alpha.
    #[inline]
    pub const fn for_alpha(has_alpha: bool) -> Self {
        if has_alpha { Self::Rgba } else { Self::Rgb }
    }

    /// Bytes per pixel.
    #[inline]
    pub const fn channels(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Returns `true` if alpha is stored.
    #[inline]
    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba)
    }

    /// Reads one pixel from a chunk of exactly [`channels`](Self::channels) bytes.
    #[inline]
    pub fn read(self, chunk: &[u8]) -> Rgba {
        match self {
            Self::Rgb => Rgba::opaque(chunk[0], chunk[1], chunk[2]),
            Self::Rgba => Rgba::new(chunk[0], chunk[1], chunk[2], chunk[3]),
        }
    }

    /// Writes one pixel into a chunk. Alpha is dropped for [`PixelLayout::Rgb`].
    #[inline]
    pub fn write(self, chunk: &mut [u8], px: Rgba) {
        chunk[0] = px.r;
        chunk[1] = px.g;
        chunk[2] = px.b;
        if let Self::Rgba = self {
            chunk[3] = px.a;
        }
    }
}

/// Owned row-major 8-bit pixel grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    layout: PixelLayout,
}

impl PixelBuffer {
    /// Creates a buffer filled with zeros (transparent black for `Rgba`,
    /// opaque black for `Rgb`).
    pub fn new(width: u32, height: u32, layout: PixelLayout) -> Self {
        let len = width as usize * height as usize * layout.channels();
        Self {
            data: vec![0; len],
            width,
            height,
            layout,
        }
    }

    /// Creates a buffer where every pixel is `px`.
    pub fn filled(width: u32, height: u32, layout: PixelLayout, px: Rgba) -> Self {
        let mut buf = Self::new(width, height, layout);
        buf.fill(px);
        buf
    }

    /// Wraps existing interleaved bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len()` is not
    /// `width * height * layout.channels()` or that product overflows.
    pub fn from_raw(width: u32, height: u32, layout: PixelLayout, data: Vec<u8>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(layout.channels()))
            .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflows"))?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
            layout,
        })
    }

    /// Builds a buffer from a row-major list of pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, layout: PixelLayout, pixels: &[Rgba]) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} pixels, got {}", expected, pixels.len()),
            ));
        }
        let mut buf = Self::new(width, height, layout);
        for (chunk, px) in buf.data.chunks_exact_mut(layout.channels()).zip(pixels) {
            layout.write(chunk, *px);
        }
        Ok(buf)
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Storage layout.
    #[inline]
    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Returns `true` if alpha is stored explicitly.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.layout.has_alpha()
    }

    /// Total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the buffer has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Bytes per row.
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.width as usize * self.layout.channels()
    }

    /// Raw interleaved bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw interleaved bytes.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.layout.channels()
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let off = self.offset(x, y);
        self.layout.read(&self.data[off..off + self.layout.channels()])
    }

    /// Returns the pixel at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixel(x, y))
        } else {
            None
        }
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, px: Rgba) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let off = self.offset(x, y);
        let n = self.layout.channels();
        self.layout.write(&mut self.data[off..off + n], px);
    }

    /// Fills every pixel with `px`.
    pub fn fill(&mut self, px: Rgba) {
        let layout = self.layout;
        for chunk in self.data.chunks_exact_mut(layout.channels()) {
            layout.write(chunk, px);
        }
    }

    /// Iterates pixels in row-major order.
    pub fn pixels(&self) -> impl ExactSizeIterator<Item = Rgba> + '_ {
        let layout = self.layout;
        self.data.chunks_exact(layout.channels()).map(move |c| layout.read(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_dimensions() {
        let buf = PixelBuffer::new(5, 3, PixelLayout::Rgba);
        assert_eq!(buf.dimensions(), (5, 3));
        assert_eq!(buf.data().len(), 5 * 3 * 4);
        assert_eq!(buf.row_bytes(), 20);
        assert!(!buf.is_empty());
    }

    #[test]
    fn test_rgb_reads_opaque_alpha() {
        let buf = PixelBuffer::new(2, 2, PixelLayout::Rgb);
        assert!(buf.pixels().all(|px| px.a == 255));
        assert_eq!(buf.data().len(), 12);
    }

    #[test]
    fn test_rgb_write_drops_alpha() {
        let mut buf = PixelBuffer::new(1, 1, PixelLayout::Rgb);
        buf.set_pixel(0, 0, Rgba::new(9, 8, 7, 0));
        assert_eq!(buf.pixel(0, 0), Rgba::new(9, 8, 7, 255));
        assert_eq!(buf.data(), &[9, 8, 7]);
    }

    #[test]
    fn test_rgba_keeps_alpha() {
        let mut buf = PixelBuffer::new(3, 1, PixelLayout::Rgba);
        buf.set_pixel(2, 0, Rgba::new(1, 2, 3, 4));
        assert_eq!(buf.pixel(2, 0), Rgba::new(1, 2, 3, 4));
        assert_eq!(buf.get_pixel(3, 0), None);
    }

    #[test]
    fn test_from_raw_length_check() {
        assert!(PixelBuffer::from_raw(2, 2, PixelLayout::Rgba, vec![0; 16]).is_ok());
        let err = PixelBuffer::from_raw(2, 2, PixelLayout::Rgba, vec![0; 15]).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { .. }));
    }

    #[test]
    fn test_from_pixels_row_major() {
        let pixels = [
            Rgba::opaque(1, 0, 0),
            Rgba::opaque(2, 0, 0),
            Rgba::opaque(3, 0, 0),
            Rgba::opaque(4, 0, 0),
        ];
        let buf = PixelBuffer::from_pixels(2, 2, PixelLayout::Rgb, &pixels).unwrap();
        assert_eq!(buf.pixel(1, 0).r, 2);
        assert_eq!(buf.pixel(0, 1).r, 3);
        let collected: Vec<Rgba> = buf.pixels().collect();
        assert_eq!(collected, pixels);
    }

    #[test]
    fn test_from_pixels_count_check() {
        let err = PixelBuffer::from_pixels(2, 2, PixelLayout::Rgb, &[Rgba::default()]);
        assert!(err.is_err());
    }

    #[test]
    fn test_fill() {
        let buf = PixelBuffer::filled(4, 4, PixelLayout::Rgba, Rgba::new(5, 6, 7, 8));
        assert!(buf.pixels().all(|px| px == Rgba::new(5, 6, 7, 8)));
    }
}

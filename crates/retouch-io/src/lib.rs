//! # retouch-io
//!
//! Image codec layer for the retouch editor.
//!
//! Decoding and encoding are delegated to external codec crates; this crate
//! only adapts them to one shape, [`ImageData`]: an 8-bit interleaved pixel
//! grid with 1 to 4 channels (gray, gray+alpha, RGB, RGBA).
//!
//! - **PNG** - lossless, alpha (`png` crate)
//! - **JPEG** - lossy, no alpha (`jpeg-decoder` / `jpeg-encoder`)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use retouch_io::{read, write};
//!
//! let image = read("input.jpg")?;
//! let buffer = image.to_buffer()?; // normalized working copy
//! write("output.png", &retouch_io::ImageData::from_buffer(&buffer))?;
//! ```
//!
//! # Feature Flags
//!
//! - `png` - PNG support (default)
//! - `jpeg` - JPEG support (default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod error;

#[cfg(feature = "png")]
pub mod png;

#[cfg(feature = "jpeg")]
pub mod jpeg;

pub use detect::Format;
pub use error::{IoError, IoResult};

use retouch_core::{PixelBuffer, PixelLayout};
use std::path::Path;
use tracing::debug;

/// Decoded 8-bit image as produced by a codec.
///
/// `data` holds `width * height * channels` interleaved bytes, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Channels per pixel: 1 gray, 2 gray+alpha, 3 RGB, 4 RGBA.
    pub channels: u32,
    /// Interleaved samples.
    pub data: Vec<u8>,
}

impl ImageData {
    /// Creates image data from raw bytes.
    ///
    /// # Errors
    ///
    /// Fails if `channels` is not 1-4 or the byte count does not match.
    pub fn from_u8(width: u32, height: u32, channels: u32, data: Vec<u8>) -> IoResult<Self> {
        if !(1..=4).contains(&channels) {
            return Err(retouch_core::Error::ChannelMismatch {
                expected: "1-4".into(),
                got: channels,
            }
            .into());
        }
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(retouch_core::Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, data.len()),
            )
            .into());
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Copies a pixel buffer into codec form (3 or 4 channels).
    pub fn from_buffer(buffer: &PixelBuffer) -> Self {
        Self {
            width: buffer.width(),
            height: buffer.height(),
            channels: buffer.layout().channels() as u32,
            data: buffer.data().to_vec(),
        }
    }

    /// Returns `true` if the source carries an alpha channel.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.channels == 2 || self.channels == 4
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Produces the format-normalized pixel buffer.
    ///
    /// Sources with alpha become [`PixelLayout::Rgba`], all others
    /// [`PixelLayout::Rgb`]. Gray samples are replicated into R, G and B.
    pub fn to_buffer(&self) -> retouch_core::Result<PixelBuffer> {
        let layout = PixelLayout::for_alpha(self.has_alpha());
        let data: Vec<u8> = match self.channels {
            1 => self.data.iter().flat_map(|&g| [g, g, g]).collect(),
            2 => self
                .data
                .chunks_exact(2)
                .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
                .collect(),
            3 | 4 => self.data.clone(),
            n => {
                return Err(retouch_core::Error::ChannelMismatch {
                    expected: "1-4".into(),
                    got: n,
                });
            }
        };
        PixelBuffer::from_raw(self.width, self.height, layout, data)
    }
}

/// Reads an image from a file, auto-detecting the format.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, the format is not
/// supported, or the file is corrupted.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    debug!(path = %path.display(), format = format.name(), "decoding image");

    let image: ImageData = match format {
        #[cfg(feature = "png")]
        Format::Png => png::read(path)?,

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read(path)?,

        #[allow(unreachable_patterns)]
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "{} ({})",
                path.display(),
                format.name()
            )));
        }
    };

    debug!(
        width = image.width,
        height = image.height,
        channels = image.channels,
        "decoded image"
    );
    Ok(image)
}

/// Writes an image, picking the format from the file extension.
///
/// # Errors
///
/// Returns an error if the extension is unknown or encoding fails.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);
    debug!(path = %path.display(), format = format.name(), "encoding image");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::write(path, image),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::write(path, image),

        #[allow(unreachable_patterns)]
        _ => Err(IoError::UnsupportedFormat(format!(
            "{} ({})",
            path.display(),
            format.name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retouch_core::Rgba;

    #[test]
    fn test_from_u8_validates() {
        assert!(ImageData::from_u8(2, 2, 3, vec![0; 12]).is_ok());
        assert!(ImageData::from_u8(2, 2, 3, vec![0; 11]).is_err());
        assert!(ImageData::from_u8(1, 1, 5, vec![0; 5]).is_err());
    }

    #[test]
    fn test_normalize_gray() {
        let image = ImageData::from_u8(2, 1, 1, vec![10, 200]).unwrap();
        let buf = image.to_buffer().unwrap();
        assert_eq!(buf.layout(), PixelLayout::Rgb);
        assert_eq!(buf.pixel(1, 0), Rgba::opaque(200, 200, 200));
    }

    #[test]
    fn test_normalize_gray_alpha() {
        let image = ImageData::from_u8(1, 1, 2, vec![10, 77]).unwrap();
        let buf = image.to_buffer().unwrap();
        assert_eq!(buf.layout(), PixelLayout::Rgba);
        assert_eq!(buf.pixel(0, 0), Rgba::new(10, 10, 10, 77));
    }

    #[test]
    fn test_normalize_rgb_and_rgba() {
        let rgb = ImageData::from_u8(1, 1, 3, vec![1, 2, 3]).unwrap();
        assert_eq!(rgb.to_buffer().unwrap().pixel(0, 0), Rgba::opaque(1, 2, 3));

        let rgba = ImageData::from_u8(1, 1, 4, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(rgba.to_buffer().unwrap().pixel(0, 0), Rgba::new(1, 2, 3, 4));
    }

    #[test]
    fn test_from_buffer_roundtrip() {
        let buf = PixelBuffer::filled(3, 2, PixelLayout::Rgba, Rgba::new(4, 5, 6, 7));
        let image = ImageData::from_buffer(&buf);
        assert_eq!(image.channels, 4);
        assert_eq!(image.to_buffer().unwrap(), buf);
    }

    #[test]
    fn test_write_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let image = ImageData::from_u8(1, 1, 3, vec![0; 3]).unwrap();
        let err = write(dir.path().join("out.xyz"), &image).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }

    #[cfg(feature = "png")]
    #[test]
    fn test_read_missing_file() {
        let err = read("/nonexistent/dir/image.png").unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
    }

    #[cfg(not(feature = "png"))]
    #[test]
    fn test_read_without_png_codec() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.png");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\n").unwrap();
        assert_eq!(Format::detect(&path).unwrap(), Format::Png);
        let err = read(&path).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }
}

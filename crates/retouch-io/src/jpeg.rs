//! JPEG format support.
//!
//! Decoding goes through `jpeg-decoder`, encoding through `jpeg-encoder`.
//! JPEG has no alpha: RGBA and gray+alpha images lose their alpha channel
//! when written. Files are encoded at a fixed quality of [`QUALITY`].

use crate::{ImageData, IoError, IoResult};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Encoder quality, 1-100.
pub const QUALITY: u8 = 90;

/// Encodes `image` into a byte vector.
fn encode(image: &ImageData) -> IoResult<Vec<u8>> {
    use jpeg_encoder::{ColorType, Encoder};

    let width = u16::try_from(image.width)
        .map_err(|_| IoError::EncodeError(format!("width {} exceeds JPEG limit", image.width)))?;
    let height = u16::try_from(image.height)
        .map_err(|_| IoError::EncodeError(format!("height {} exceeds JPEG limit", image.height)))?;

    let (color_type, pixels): (ColorType, Vec<u8>) = match image.channels {
        1 => (ColorType::Luma, image.data.clone()),
        2 => (ColorType::Luma, image.data.chunks_exact(2).map(|ga| ga[0]).collect()),
        3 => (ColorType::Rgb, image.data.clone()),
        4 => (
            ColorType::Rgb,
            image
                .data
                .chunks_exact(4)
                .flat_map(|rgba| [rgba[0], rgba[1], rgba[2]])
                .collect(),
        ),
        n => return Err(IoError::EncodeError(format!("unsupported channel count: {}", n))),
    };

    let mut buffer = Vec::new();
    Encoder::new(&mut buffer, QUALITY)
        .encode(&pixels, width, height, color_type)
        .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;

    Ok(buffer)
}

/// Reads a JPEG file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let file = File::open(path.as_ref())?;
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(file));
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

    let width = u32::from(info.width);
    let height = u32::from(info.height);

    let (channels, data) = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => (3, pixels),
        jpeg_decoder::PixelFormat::L8 => (1, pixels),
        // 16-bit grayscale: keep the high byte
        jpeg_decoder::PixelFormat::L16 => (1, pixels.chunks_exact(2).map(|l| l[0]).collect()),
        jpeg_decoder::PixelFormat::CMYK32 => {
            let rgb = pixels
                .chunks_exact(4)
                .flat_map(|cmyk| {
                    let c = cmyk[0] as f32 / 255.0;
                    let m = cmyk[1] as f32 / 255.0;
                    let y = cmyk[2] as f32 / 255.0;
                    let k = cmyk[3] as f32 / 255.0;
                    [
                        ((1.0 - c) * (1.0 - k) * 255.0) as u8,
                        ((1.0 - m) * (1.0 - k) * 255.0) as u8,
                        ((1.0 - y) * (1.0 - k) * 255.0) as u8,
                    ]
                })
                .collect();
            (3, rgb)
        }
    };

    ImageData::from_u8(width, height, channels, data)
}

/// Writes a JPEG file.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    let data = encode(image)?;
    std::fs::write(path.as_ref(), data)?;
    Ok(())
}

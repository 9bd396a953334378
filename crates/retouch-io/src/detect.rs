//! File format sniffing.
//!
//! The leading bytes of a file decide its format; the extension is only
//! consulted when the content is unrecognized or unreadable.

use crate::IoResult;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];
// SOI marker followed by the first marker prefix
const JPEG_SIGNATURE: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Image formats known to the codec layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Portable Network Graphics.
    Png,
    /// JPEG / JFIF.
    Jpeg,
    /// Anything else.
    Unknown,
}

impl Format {
    /// Lowercase extensions mapped to this format.
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Format::Png => &["png"],
            Format::Jpeg => &["jpg", "jpeg", "jpe", "jfif"],
            Format::Unknown => &[],
        }
    }

    /// Sniffs the file header, falling back to the extension.
    ///
    /// A missing or unreadable file is not an error here; the extension
    /// decides and the subsequent decode reports the I/O failure.
    pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        match Self::from_magic_bytes(path) {
            Ok(Format::Unknown) | Err(_) => Ok(Self::from_extension(path)),
            Ok(format) => Ok(format),
        }
    }

    /// Format implied by the file extension, ignoring case.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let Some(ext) = path.as_ref().extension().and_then(|e| e.to_str()) else {
            return Format::Unknown;
        };
        let ext = ext.to_ascii_lowercase();
        [Format::Png, Format::Jpeg]
            .into_iter()
            .find(|f| f.extensions().iter().any(|e| *e == ext))
            .unwrap_or(Format::Unknown)
    }

    /// Reads the first bytes of `path` and sniffs them.
    pub fn from_magic_bytes<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let mut header = Vec::with_capacity(PNG_SIGNATURE.len());
        File::open(path)?
            .take(PNG_SIGNATURE.len() as u64)
            .read_to_end(&mut header)?;
        Ok(Self::from_bytes(&header))
    }

    /// Sniffs an in-memory header.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.starts_with(&PNG_SIGNATURE) {
            Format::Png
        } else if bytes.starts_with(&JPEG_SIGNATURE) {
            Format::Jpeg
        } else {
            Format::Unknown
        }
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Format::Png => "PNG",
            Format::Jpeg => "JPEG",
            Format::Unknown => "unknown",
        }
    }
}

//! Error types for retouch-core operations.
//!
//! # Usage
//!
//! ```rust
//! use retouch_core::{Error, PixelBuffer, PixelLayout};
//!
//! let err = PixelBuffer::from_raw(2, 2, PixelLayout::Rgb, vec![0; 5]).unwrap_err();
//! assert!(matches!(err, Error::InvalidDimensions { .. }));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building pixel buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Buffer length does not match `width * height * channels`,
    /// or the dimensions overflow.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Channel count is not one the buffer can hold.
    #[error("channel mismatch: expected {expected}, got {got}")]
    ChannelMismatch {
        /// Expected channel count description
        expected: String,
        /// Actual channel count
        got: u32,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }
}

//! # retouch-core
//!
//! Core types for the retouch image editor.
//!
//! This crate provides the foundational types used throughout the workspace:
//!
//! - [`Rgba`] - 8-bit straight-alpha pixel
//! - [`Channel`] - red, green, blue, alpha selector
//! - [`PixelBuffer`] - row-major pixel grid with optional alpha storage
//! - [`Error`] - buffer construction and shape errors
//!
//! ## Crate Structure
//!
//! ```text
//! retouch-core (this crate)
//!    ^
//!    |
//!    +-- retouch-io (codecs, ImageData)
//!    +-- retouch-ops (transforms, statistics)
//!    +-- retouch-editor (session state, revision, cache)
//!    +-- retouch-cli
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod pixel;

pub use error::{Error, Result};
pub use image::{PixelBuffer, PixelLayout};
pub use pixel::{Channel, Rgba};

/// Prelude module for convenient imports.
///
/// ```
/// use retouch_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::image::{PixelBuffer, PixelLayout};
    pub use crate::pixel::{Channel, Rgba};
}

//! # retouch-ops
//!
//! Pixel transforms and channel statistics for the retouch editor.
//!
//! Every transform is a pure function of one pixel, applied uniformly over
//! a [`PixelBuffer`](retouch_core::PixelBuffer).
//!
//! # Modules
//!
//! - [`grayscale`] - lightness, average and luminosity conversions
//! - [`gamma`] - gamma correction on r, g, b
//! - [`depth`] - per-channel color-depth reduction with four policies
//! - [`lut`] - 256-entry channel lookup tables
//! - [`op`] - the closed [`PixelOp`] set and its compiled kernels
//! - [`apply`] - whole-buffer passes (parallel with the `parallel` feature)
//! - [`stats`] - histograms, entropy and the text report
//!
//! # Example
//!
//! ```rust
//! use retouch_core::{Channel, PixelBuffer, PixelLayout, Rgba};
//! use retouch_ops::{apply_op, GrayscaleMethod, ImageStatistics, PixelOp};
//!
//! let mut buf = PixelBuffer::filled(8, 8, PixelLayout::Rgb, Rgba::opaque(255, 0, 0));
//! apply_op(&mut buf, &PixelOp::Grayscale(GrayscaleMethod::Average)).unwrap();
//! assert_eq!(buf.pixel(0, 0), Rgba::opaque(85, 85, 85));
//!
//! let stats = ImageStatistics::compute(&buf);
//! assert_eq!(stats.entropy(Channel::Red), 0.0);
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` - rayon row-parallel pixel passes and histogram counting (default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;

pub mod apply;
pub mod depth;
pub mod gamma;
pub mod grayscale;
pub mod lut;
pub mod op;
pub mod stats;

pub use apply::{apply_op, map_pixels};
pub use depth::{ChannelDepths, QuantizePolicy};
pub use error::{OpsError, OpsResult};
pub use grayscale::GrayscaleMethod;
pub use lut::{ChannelLut, PixelLut};
pub use op::{PixelKernel, PixelOp};
pub use stats::{ChannelStats, Histogram, ImageStatistics};

//! # retouch-editor
//!
//! Editing session state for the retouch image editor.
//!
//! An [`Editor`] owns the decoded original, a working copy every transform
//! mutates, a [`Revision`] counter bumped on each successful mutation, and a
//! [`StatsCache`] that recomputes histograms and entropies only when the
//! revision moved.
//!
//! ```rust
//! use retouch_core::Channel;
//! use retouch_editor::Editor;
//! use retouch_io::ImageData;
//! use retouch_ops::GrayscaleMethod;
//!
//! let mut editor = Editor::new();
//! let image = ImageData::from_u8(2, 1, 4, vec![255, 0, 0, 255, 0, 255, 0, 255]).unwrap();
//! editor.load_image(image, None).unwrap();
//!
//! assert_eq!(editor.entropy(Channel::Red).unwrap(), 1.0);
//! editor.convert_to_grayscale(GrayscaleMethod::Lightness).unwrap();
//! assert_eq!(editor.entropy(Channel::Red).unwrap(), 0.0);
//! ```
//!
//! Images loaded without alpha keep an alpha-free working copy: alpha reads
//! as 255 and the alpha result of every transform is discarded, so reducing
//! alpha depth on such an image leaves its alpha histogram at `{255: n}`.
//!
//! A single editor is not meant to be shared; a multi-threaded host wraps
//! the whole `Editor` in one lock.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod cache;
mod editor;
mod error;
mod notify;
mod revision;

pub use cache::StatsCache;
pub use editor::Editor;
pub use error::{EditorError, EditorResult};
pub use notify::{Listener, ListenerId, Listeners};
pub use revision::Revision;

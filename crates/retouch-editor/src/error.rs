//! Editor error types.

use std::path::PathBuf;
use thiserror::Error;

use retouch_io::IoError;
use retouch_ops::OpsError;

/// Error type for editor operations.
///
/// Whatever the variant, a failed call leaves the loaded image, the working
/// buffer and the revision exactly as they were.
#[derive(Error, Debug)]
pub enum EditorError {
    /// The codec could not decode the file.
    #[error("failed to load {}", path.display())]
    Load {
        /// File that was being read.
        path: PathBuf,
        /// Codec error.
        source: IoError,
    },

    /// The codec could not encode or write the file.
    #[error("failed to save {}", path.display())]
    Save {
        /// File that was being written.
        path: PathBuf,
        /// Codec error.
        source: IoError,
    },

    /// Rejected operation parameters.
    #[error(transparent)]
    InvalidParameter(#[from] OpsError),

    /// Mutation or query before any successful load.
    #[error("no image loaded")]
    NoImage,

    /// Decoded pixel data inconsistent with its dimensions.
    #[error(transparent)]
    Image(#[from] retouch_core::Error),
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

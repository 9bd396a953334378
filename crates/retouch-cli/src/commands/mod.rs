//! CLI command implementations

pub mod depth;
pub mod edit;
pub mod gamma;
pub mod grayscale;
pub mod info;

use anyhow::{Context, Result};
use retouch_editor::{Editor, Revision};
use retouch_ops::gamma::MAX_GAMMA;
use std::path::Path;
use tracing::debug;

/// Opens an editing session on `path`.
///
/// Every later change of the working buffer is logged at debug level.
pub fn open_editor(path: &Path) -> Result<Editor> {
    let mut editor = Editor::new();
    editor.subscribe(|revision: Revision| debug!(%revision, "working buffer updated"));
    editor
        .load(path)
        .with_context(|| format!("Failed to load: {}", path.display()))?;
    Ok(editor)
}

/// Writes the working buffer of `editor` to `path`.
pub fn save_editor(editor: &Editor, path: &Path) -> Result<()> {
    editor
        .save(path)
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// Parses a gamma value in (0, MAX_GAMMA].
pub fn parse_gamma(s: &str) -> Result<f64, String> {
    let gamma: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if !(gamma > 0.0 && gamma <= MAX_GAMMA) {
        return Err(format!("gamma must be in (0, {}], got {}", MAX_GAMMA, gamma));
    }
    Ok(gamma)
}

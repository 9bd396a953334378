//! Editing session.

use std::path::{Path, PathBuf};

use retouch_core::{Channel, PixelBuffer};
use retouch_io::ImageData;
use retouch_ops::{
    ChannelDepths, GrayscaleMethod, Histogram, ImageStatistics, PixelOp, QuantizePolicy,
};
use tracing::debug;

use crate::cache::StatsCache;
use crate::notify::{ListenerId, Listeners};
use crate::{EditorError, EditorResult, Revision};

#[derive(Debug)]
struct Session {
    path: Option<PathBuf>,
    original: ImageData,
    working: PixelBuffer,
}

/// One loaded image with its working copy, revision and cached statistics.
///
/// Every successful mutation (load, transform, revert) bumps the revision
/// once and then notifies subscribers once. Failed calls change nothing.
///
/// ```rust,ignore
/// use retouch_editor::Editor;
/// use retouch_ops::GrayscaleMethod;
/// use retouch_core::Channel;
///
/// let mut editor = Editor::new();
/// editor.load("photo.png")?;
/// editor.convert_to_grayscale(GrayscaleMethod::Luminosity)?;
/// println!("red entropy: {}", editor.entropy(Channel::Red)?);
/// editor.save("gray.png")?;
/// ```
#[derive(Debug, Default)]
pub struct Editor {
    session: Option<Session>,
    revision: Revision,
    stats: StatsCache,
    listeners: Listeners,
}

impl Editor {
    /// Editor with no image.
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns `true` once an image has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.session.is_some()
    }

    /// Current revision.
    pub fn revision(&self) -> Revision {
        self.revision
    }

    /// Path the current image was loaded from.
    pub fn file_path(&self) -> Option<&Path> {
        self.session.as_ref().and_then(|s| s.path.as_deref())
    }

    /// Image as decoded, before normalization.
    pub fn original(&self) -> Option<&ImageData> {
        self.session.as_ref().map(|s| &s.original)
    }

    /// Buffer all transforms operate on.
    pub fn working(&self) -> Option<&PixelBuffer> {
        self.session.as_ref().map(|s| &s.working)
    }

    /// Statistics cache, for inspecting recomputation.
    pub fn stats_cache(&self) -> &StatsCache {
        &self.stats
    }

    // ------------------------------------------------------------------
    // Load / save / revert
    // ------------------------------------------------------------------

    /// Decodes `path` and makes it the current image.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> EditorResult<()> {
        let path = path.as_ref();
        let image = retouch_io::read(path).map_err(|source| EditorError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_image(image, Some(path.to_path_buf()))
    }

    /// Makes an already decoded image the current one.
    pub fn load_image(&mut self, image: ImageData, path: Option<PathBuf>) -> EditorResult<()> {
        let working = image.to_buffer()?;
        debug!(
            path = ?path,
            width = working.width(),
            height = working.height(),
            alpha = working.has_alpha(),
            "image loaded"
        );
        self.session = Some(Session {
            path,
            original: image,
            working,
        });
        self.commit();
        Ok(())
    }

    /// Encodes the working buffer to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> EditorResult<()> {
        let path = path.as_ref();
        let session = self.session.as_ref().ok_or(EditorError::NoImage)?;
        retouch_io::write(path, &ImageData::from_buffer(&session.working)).map_err(|source| {
            EditorError::Save {
                path: path.to_path_buf(),
                source,
            }
        })?;
        debug!(path = %path.display(), revision = %self.revision, "image saved");
        Ok(())
    }

    /// Discards every transform, restoring the freshly loaded pixels.
    pub fn revert_to_original(&mut self) -> EditorResult<()> {
        let session = self.session.as_mut().ok_or(EditorError::NoImage)?;
        session.working = session.original.to_buffer()?;
        debug!("reverted to original");
        self.commit();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Transforms
    // ------------------------------------------------------------------

    /// Applies `op` to every pixel of the working buffer.
    ///
    /// Parameters are validated before any pixel changes.
    pub fn apply(&mut self, op: PixelOp) -> EditorResult<()> {
        let session = self.session.as_mut().ok_or(EditorError::NoImage)?;
        retouch_ops::apply_op(&mut session.working, &op)?;
        self.commit();
        Ok(())
    }

    /// Converts the working buffer to gray.
    pub fn convert_to_grayscale(&mut self, method: GrayscaleMethod) -> EditorResult<()> {
        self.apply(PixelOp::Grayscale(method))
    }

    /// Gamma-corrects r, g and b.
    pub fn gamma_correct(&mut self, gamma: f64) -> EditorResult<()> {
        self.apply(PixelOp::Gamma(gamma))
    }

    /// Quantizes each channel to its own bit depth.
    pub fn reduce_color_depth(
        &mut self,
        depths: ChannelDepths,
        policy: QuantizePolicy,
    ) -> EditorResult<()> {
        self.apply(PixelOp::ReduceDepth { depths, policy })
    }

    // ------------------------------------------------------------------
    // Statistics
    // ------------------------------------------------------------------

    /// Histograms and entropies of the working buffer.
    ///
    /// Recomputed only if the buffer changed since the last query.
    pub fn statistics(&mut self) -> EditorResult<&ImageStatistics> {
        let session = self.session.as_ref().ok_or(EditorError::NoImage)?;
        Ok(self.stats.get_or_compute(self.revision, &session.working))
    }

    /// Histogram of one channel.
    pub fn histogram(&mut self, channel: Channel) -> EditorResult<&Histogram> {
        Ok(self.statistics()?.histogram(channel))
    }

    /// Entropy of one channel.
    pub fn entropy(&mut self, channel: Channel) -> EditorResult<f64> {
        Ok(self.statistics()?.entropy(channel))
    }

    // ------------------------------------------------------------------
    // Notification
    // ------------------------------------------------------------------

    /// Registers a callback run after every successful mutation.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(Revision) + Send + 'static,
    {
        self.listeners.subscribe(listener)
    }

    /// Removes a callback. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn commit(&mut self) {
        let revision = self.revision.bump();
        debug!(%revision, "working buffer changed");
        self.listeners.notify(revision);
    }
}

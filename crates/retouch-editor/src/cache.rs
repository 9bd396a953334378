//! Revision-tagged statistics cache.

use retouch_core::PixelBuffer;
use retouch_ops::ImageStatistics;
use tracing::trace;

use crate::Revision;

/// Holds the last [`ImageStatistics`] together with the revision it was
/// computed against.
#[derive(Debug, Default)]
pub struct StatsCache {
    entry: Option<(Revision, ImageStatistics)>,
    recompute_count: u64,
}

impl StatsCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the cached result belongs to `revision`.
    pub fn is_fresh(&self, revision: Revision) -> bool {
        matches!(&self.entry, Some((tag, _)) if *tag == revision)
    }

    /// Revision the cached result was computed against.
    pub fn revision(&self) -> Option<Revision> {
        self.entry.as_ref().map(|(tag, _)| *tag)
    }

    /// How many times statistics were computed.
    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }

    /// Returns the cached statistics, recomputing all channels from
    /// `buffer` when the tag differs from `revision`.
    pub fn get_or_compute(&mut self, revision: Revision, buffer: &PixelBuffer) -> &ImageStatistics {
        if !self.is_fresh(revision) {
            self.entry = None;
        }
        let recompute_count = &mut self.recompute_count;
        let (_, stats) = self.entry.get_or_insert_with(|| {
            *recompute_count += 1;
            trace!(%revision, "statistics stale, recomputing");
            (revision, ImageStatistics::compute(buffer))
        });
        stats
    }
}

//! Mutation counter.

use std::fmt;

/// Number of successful mutations since the editor was created.
///
/// Only ever increases. Used as a cache-validity token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Revision(u64);

impl Revision {
    /// Revision of a fresh editor.
    pub const INITIAL: Revision = Revision(0);

    /// Raw counter value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Advances by one and returns the new value.
    pub(crate) fn bump(&mut self) -> Revision {
        self.0 += 1;
        *self
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

//! Change events emitted to the view layer.

use serde::Serialize;

use navspy_types::{ActiveSection, Location, MenuState};

/// One observable state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavChange {
    ActiveSection { section: ActiveSection },
    Menu { state: MenuState },
    Location { location: Location },
}

/// Pending change events with a monotonic revision counter.
///
/// The revision is bumped on every push and survives draining, so a view can
/// use it as a cache key without holding on to the events themselves.
#[derive(Debug, Clone, Default)]
pub struct ChangeLog {
    pending: Vec<NavChange>,
    revision: u64,
}

impl ChangeLog {
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn push(&mut self, change: NavChange) {
        self.pending.push(change);
        self.revision = self.revision.wrapping_add(1);
    }

    /// Take every pending change, oldest first.
    pub fn drain(&mut self) -> Vec<NavChange> {
        std::mem::take(&mut self.pending)
    }
}

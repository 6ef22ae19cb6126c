//! The set of sections currently counted as in view.

use crate::SectionId;

/// Sections currently inside the activation band, ordered by when each one
/// became visible.
///
/// Order is arrival order of visibility reports, not document order. A section
/// that is reported visible again while already a member keeps its original
/// position; it only moves to the back after leaving and re-entering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilitySet {
    members: Vec<SectionId>,
}

impl VisibilitySet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id`. Returns `false` when it was already a member.
    pub fn insert(&mut self, id: SectionId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.members.push(id);
        true
    }

    /// Remove `id`. Returns `false` when it was not a member.
    pub fn remove(&mut self, id: &SectionId) -> bool {
        let before = self.members.len();
        self.members.retain(|member| member != id);
        self.members.len() != before
    }

    #[must_use]
    pub fn contains(&self, id: &SectionId) -> bool {
        self.members.iter().any(|member| member == id)
    }

    /// The member that most recently became visible.
    #[must_use]
    pub fn newest(&self) -> Option<&SectionId> {
        self.members.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SectionId> {
        self.members.iter()
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }
}

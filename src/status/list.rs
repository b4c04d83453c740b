//! Per-unit status list.
//!
//! Entries keep application order (damage rules fold in that order), ids
//! are unique, and a stack count is always positive: anything that would
//! leave an entry at zero or below removes it instead.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::StatusId;

/// One status on one unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusStack {
    pub status: StatusId,
    pub stacks: i64,
}

/// Ordered, unique, strictly positive status stacks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusList {
    entries: SmallVec<[StatusStack; 4]>,
}

impl StatusList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack count for a status, 0 if absent.
    #[must_use]
    pub fn get(&self, status: StatusId) -> i64 {
        self.entries
            .iter()
            .find(|e| e.status == status)
            .map_or(0, |e| e.stacks)
    }

    #[must_use]
    pub fn contains(&self, status: StatusId) -> bool {
        self.entries.iter().any(|e| e.status == status)
    }

    /// Set a stack count. Counts of zero or less remove the entry; new
    /// entries go to the end of the list.
    pub fn set(&mut self, status: StatusId, stacks: i64) {
        if stacks <= 0 {
            self.remove(status);
            return;
        }
        match self.entries.iter_mut().find(|e| e.status == status) {
            Some(entry) => entry.stacks = stacks,
            None => self.entries.push(StatusStack { status, stacks }),
        }
    }

    /// Remove a status. Returns whether it was present.
    pub fn remove(&mut self, status: StatusId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.status != status);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusStack> {
        self.entries.iter()
    }

    /// Copy of the current entries, for iterating while mutating.
    #[must_use]
    pub fn snapshot(&self) -> SmallVec<[StatusStack; 4]> {
        self.entries.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

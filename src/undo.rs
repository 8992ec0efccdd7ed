// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Single linear undo log for discrete edits

use crate::types::{BusbarId, CubicleId, SectionRef, SelectedComponent};

/// What an undo has to reverse
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoEntry {
    /// A cubicle (with all of its compartments) was appended
    AddCubicle(CubicleId),
    /// A section's component was replaced; `previous` is what it held before
    SelectComponent {
        /// The section that changed
        at: SectionRef,
        /// Prior selection, `None` if the section was empty
        previous: Option<SelectedComponent>,
    },
    /// A busbar was created
    AddBusbar(BusbarId),
}

impl UndoEntry {
    /// Whether reversing this entry would touch the given cubicle
    #[must_use]
    pub fn refers_to_cubicle(&self, id: CubicleId) -> bool {
        match self {
            Self::AddCubicle(cubicle) => *cubicle == id,
            Self::SelectComponent { at, .. } => at.cubicle == id,
            Self::AddBusbar(_) => false,
        }
    }
}

/// LIFO stack of [`UndoEntry`]; session scoped and never persisted
#[derive(Debug, Clone, Default)]
pub struct UndoLog {
    entries: Vec<UndoEntry>,
}

impl UndoLog {
    /// Create an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an edit
    pub fn push(&mut self, entry: UndoEntry) {
        self.entries.push(entry);
    }

    /// Take the most recent edit
    pub fn pop(&mut self) -> Option<UndoEntry> {
        self.entries.pop()
    }

    /// Most recent edit without removing it
    #[must_use]
    pub fn peek(&self) -> Option<&UndoEntry> {
        self.entries.last()
    }

    /// Drop entries that no longer apply
    pub fn retain(&mut self, keep: impl FnMut(&UndoEntry) -> bool) {
        self.entries.retain(keep);
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of undoable edits
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there is nothing to undo
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! # Undo/Redo History
//!
//! Snapshot history over whole templates.
//!
//! ## Design
//!
//! - Every committed state is a full copy of the template plus the selection
//! - `present` is the state the editor shows; `past` and `future` hold
//!   snapshots on either side of it
//! - Committing a new state clears `future`
//! - `past` is capped at `max_levels`; the oldest snapshot is dropped first
//! - Committing a template equal to `present` records nothing
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new();
//! history.commit(Snapshot::new(template.clone(), Selection::None));
//! history.commit(Snapshot::new(edited, selection));
//!
//! let previous = history.undo().unwrap();
//! let edited_again = history.redo().unwrap();
//! ```

use crate::selection::Selection;
use mailforge_document::Template;
use std::collections::VecDeque;

/// Default number of undo levels
pub const DEFAULT_MAX_LEVELS: usize = 50;

/// One point in the edit history
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub template: Template,
    pub selection: Selection,
}

impl Snapshot {
    pub fn new(template: Template, selection: Selection) -> Self {
        Self {
            template,
            selection,
        }
    }
}

#[derive(Debug, Clone)]
pub struct History {
    /// Older states (most recent last)
    past: VecDeque<Snapshot>,

    present: Option<Snapshot>,

    /// Undone states (next redo last)
    future: Vec<Snapshot>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_MAX_LEVELS)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            past: VecDeque::new(),
            present: None,
            future: Vec::new(),
            max_levels,
        }
    }

    /// Record `snapshot` as the new present state
    ///
    /// The first commit only seeds `present`. Returns `false` when the
    /// template is unchanged, in which case only the stored selection moves.
    pub fn commit(&mut self, snapshot: Snapshot) -> bool {
        let Some(present) = self.present.as_mut() else {
            self.present = Some(snapshot);
            return false;
        };

        if present.template == snapshot.template {
            present.selection = snapshot.selection;
            return false;
        }

        let previous = std::mem::replace(present, snapshot);
        self.past.push_back(previous);
        self.future.clear();

        if self.max_levels > 0 {
            while self.past.len() > self.max_levels {
                self.past.pop_front();
            }
        }

        true
    }

    /// Step back one state, returning the snapshot that becomes present
    pub fn undo(&mut self) -> Option<&Snapshot> {
        let previous = self.past.pop_back()?;
        if let Some(current) = self.present.replace(previous) {
            self.future.push(current);
        }
        self.present.as_ref()
    }

    /// Step forward one state, returning the snapshot that becomes present
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let next = self.future.pop()?;
        if let Some(current) = self.present.replace(next) {
            self.past.push_back(current);
        }
        self.present.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.past.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.future.len()
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    pub fn present(&self) -> Option<&Snapshot> {
        self.present.as_ref()
    }

    /// Replace the selection stored with the present state
    pub fn reselect(&mut self, selection: Selection) {
        if let Some(present) = self.present.as_mut() {
            present.selection = selection;
        }
    }

    /// Forget everything, including the present state
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        self.present = None;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Snapshot {
        let mut template = Template::new();
        template.name = name.to_string();
        Snapshot::new(template, Selection::None)
    }

    #[test]
    fn test_first_commit_seeds_present() {
        let mut history = History::new();
        assert!(!history.commit(named("a")));
        assert!(!history.can_undo());
        assert_eq!(history.present().unwrap().template.name, "a");
    }

    #[test]
    fn test_undo_redo() {
        let mut history = History::new();
        history.commit(named("a"));
        history.commit(named("b"));
        history.commit(named("c"));

        assert_eq!(history.undo().unwrap().template.name, "b");
        assert_eq!(history.undo().unwrap().template.name, "a");
        assert!(history.undo().is_none());
        assert_eq!(history.present().unwrap().template.name, "a");

        assert_eq!(history.redo().unwrap().template.name, "b");
        assert_eq!(history.redo_levels(), 1);
    }

    #[test]
    fn test_commit_clears_future() {
        let mut history = History::new();
        history.commit(named("a"));
        history.commit(named("b"));
        history.undo();
        assert!(history.can_redo());

        history.commit(named("c"));
        assert!(!history.can_redo());
        assert_eq!(history.undo_levels(), 1);
    }

    #[test]
    fn test_max_levels() {
        let mut history = History::with_max_levels(3);
        history.commit(named("0"));
        for i in 1..=10 {
            history.commit(named(&i.to_string()));
        }

        assert_eq!(history.undo_levels(), 3);
        let mut oldest = String::new();
        while let Some(snapshot) = history.undo() {
            oldest = snapshot.template.name.clone();
        }
        assert_eq!(oldest, "7");
    }

    #[test]
    fn test_identical_commit_updates_selection_only() {
        let mut history = History::new();
        let first = named("a");
        history.commit(first.clone());

        let reselected = Snapshot::new(first.template.clone(), Selection::section("s1"));
        assert!(!history.commit(reselected));
        assert!(!history.can_undo());
        assert_eq!(
            history.present().unwrap().selection,
            Selection::section("s1")
        );
    }
}

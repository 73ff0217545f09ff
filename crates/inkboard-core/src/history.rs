//! Linear undo/redo over snapshots.

use crate::snapshot::Snapshot;

/// Maximum number of undo states to keep.
const MAX_UNDO_HISTORY: usize = 50;

/// Linear undo/redo history.
///
/// `past` always holds at least one entry (the baseline the session started
/// from), so the board can always answer "what should the surface look like
/// right now". Recording a new edit invalidates the redo buffer; this is a
/// plain linear history, not a tree.
#[derive(Debug, Clone)]
pub struct History {
    past: Vec<Snapshot>,
    future: Vec<Snapshot>,
}

impl History {
    /// Create a history rooted at `baseline` (the blank or restored surface).
    pub fn new(baseline: Snapshot) -> Self {
        Self {
            past: vec![baseline],
            future: Vec::new(),
        }
    }

    /// Record a completed edit. Clears any redo state.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.past.push(snapshot);
        self.future.clear();

        // Limit history size; the dropped entry's successor becomes the new
        // undo floor.
        if self.past.len() > MAX_UNDO_HISTORY {
            self.past.remove(0);
        }
    }

    /// Step back one edit and return the snapshot to render.
    ///
    /// Returns `None` at the floor; the baseline itself is never popped.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.past.len() <= 1 {
            return None;
        }
        let current = self.past.pop()?;
        self.future.push(current);
        self.past.last()
    }

    /// Re-apply the most recently undone edit and return the snapshot to
    /// render. Returns `None` when there is nothing to redo.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let next = self.future.pop()?;
        self.past.push(next);
        self.past.last()
    }

    /// The snapshot describing the surface's current content.
    pub fn current(&self) -> &Snapshot {
        self.past
            .last()
            .expect("history always holds at least the baseline")
    }

    /// Whether an undo would change anything.
    pub fn can_undo(&self) -> bool {
        self.past.len() > 1
    }

    /// Whether a redo would change anything.
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Discard everything and start over from a new baseline (used after a
    /// fresh restore).
    pub fn reset(&mut self, baseline: Snapshot) {
        self.past.clear();
        self.past.push(baseline);
        self.future.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(tag: u8) -> Snapshot {
        Snapshot::new(vec![tag], 1.0, 1.0, 1.0)
    }

    #[test]
    fn test_undo_redo_are_inverses() {
        let mut history = History::new(snap(0));
        history.push(snap(1));
        history.push(snap(2));

        assert_eq!(history.undo(), Some(&snap(1)));
        assert_eq!(history.redo(), Some(&snap(2)));

        assert_eq!(history.undo(), Some(&snap(1)));
        assert_eq!(history.undo(), Some(&snap(0)));
        // At the baseline: nothing further to undo.
        assert_eq!(history.undo(), None);
        assert_eq!(history.current(), &snap(0));
    }

    #[test]
    fn test_push_clears_redo() {
        let mut history = History::new(snap(0));
        history.push(snap(1));
        history.push(snap(2));

        history.undo();
        assert!(history.can_redo());

        history.push(snap(3));
        assert!(!history.can_redo());
        assert_eq!(history.redo(), None);
        assert_eq!(history.current(), &snap(3));
    }

    #[test]
    fn test_boundary_operations_are_noops() {
        let mut history = History::new(snap(0));
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), None);
        assert_eq!(history.current(), &snap(0));
    }

    #[test]
    fn test_history_is_capped() {
        let mut history = History::new(snap(0));
        for i in 0..=MAX_UNDO_HISTORY as u8 {
            history.push(snap(i.wrapping_add(1)));
        }

        // Undo all the way down: the original baseline was dropped, so the
        // floor is now the oldest retained snapshot.
        let mut steps = 0;
        while history.undo().is_some() {
            steps += 1;
        }
        assert_eq!(steps, MAX_UNDO_HISTORY - 1);
        assert_ne!(history.current(), &snap(0));
    }

    #[test]
    fn test_reset_discards_both_stacks() {
        let mut history = History::new(snap(0));
        history.push(snap(1));
        history.undo();

        history.reset(snap(9));
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.current(), &snap(9));
    }
}

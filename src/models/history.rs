// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! History system for undo/redo functionality.
//!
//! A linear, bounded list of snapshots with a cursor pointing at the snapshot
//! that matches the current state. Recording a new snapshot discards any redo
//! entries beyond the cursor; once the capacity is exceeded the oldest
//! snapshots are dropped.

/// Default number of snapshots kept.
pub const DEFAULT_CAPACITY: usize = 20;

#[derive(Debug, Clone)]
pub struct History<T> {
    snapshots: Vec<T>,
    cursor: usize,
    capacity: usize,
}

impl<T: Clone> Default for History<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<T: Clone> History<T> {
    /// Create an empty history holding at most `capacity` snapshots (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// Drop everything and start over from `initial`.
    pub fn reset(&mut self, initial: T) {
        self.snapshots.clear();
        self.snapshots.push(initial);
        self.cursor = 0;
    }

    /// Save the state after an edit, discarding any redo entries.
    pub fn record(&mut self, snapshot: T) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        if self.snapshots.len() > self.capacity {
            let excess = self.snapshots.len() - self.capacity;
            self.snapshots.drain(..excess);
        }
        self.cursor = self.snapshots.len() - 1;
        log::debug!(
            "History recorded, position {}/{}",
            self.cursor + 1,
            self.snapshots.len()
        );
    }

    /// Undo: step back and return the previous snapshot.
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.snapshots.get(self.cursor)
    }

    /// Redo: step forward and return the next snapshot.
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.snapshots.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0 && !self.snapshots.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot matching the current state.
    #[cfg(test)]
    pub fn current(&self) -> Option<&T> {
        self.snapshots.get(self.cursor)
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_redo_walks_the_cursor() {
        let mut history = History::new(20);
        history.reset(0);
        history.record(1);
        history.record(2);

        assert_eq!(history.undo(), Some(&1));
        assert_eq!(history.undo(), Some(&0));
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), Some(&1));
        assert_eq!(history.redo(), Some(&2));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_record_truncates_redo_branch() {
        let mut history = History::new(20);
        history.reset(0);
        history.record(1);
        history.record(2);
        history.undo();
        history.undo();

        history.record(10);
        assert!(!history.can_redo());
        assert_eq!(history.len(), 2);
        assert_eq!(history.undo(), Some(&0));
        assert_eq!(history.redo(), Some(&10));
    }

    #[test]
    fn test_capacity_discards_oldest() {
        let mut history = History::new(3);
        history.reset(0);
        for i in 1..=5 {
            history.record(i);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.current(), Some(&5));
        assert_eq!(history.undo(), Some(&4));
        assert_eq!(history.undo(), Some(&3));
        assert_eq!(history.undo(), None);
    }

    #[test]
    fn test_default_capacity_is_twenty() {
        let mut history: History<u32> = History::default();
        history.reset(0);
        for i in 1..50 {
            history.record(i);
        }
        assert_eq!(history.len(), DEFAULT_CAPACITY);
        assert_eq!(history.current(), Some(&49));
    }

    #[test]
    fn test_reset_discards_everything() {
        let mut history = History::new(5);
        history.reset(0);
        history.record(1);
        history.reset(7);
        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.current(), Some(&7));
    }

    #[test]
    fn test_empty_history() {
        let mut history: History<u8> = History::new(0);
        assert_eq!(history.capacity(), 1);
        assert!(history.is_empty());
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), None);
        history.record(3);
        assert_eq!(history.current(), Some(&3));
    }
}

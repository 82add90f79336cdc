use uuid::Uuid;

use crate::raster::RasterBuffer;

/// Default number of snapshots kept for undo/redo
pub const DEFAULT_CAPACITY: usize = 20;

/// Upper bound on snapshots; each one is a full copy of the canvas
pub const MAX_CAPACITY: usize = 100;

/// An immutable snapshot of the canvas at one point in time.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    id: Uuid,
    buffer: RasterBuffer,
}

impl HistoryEntry {
    fn new(buffer: RasterBuffer) -> Self {
        Self {
            id: Uuid::new_v4(),
            buffer,
        }
    }

    /// Unique per snapshot, usable as a texture cache key
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn buffer(&self) -> &RasterBuffer {
        &self.buffer
    }
}

/// Bounded linear snapshot history for undo/redo.
///
/// Saving while not at the newest entry throws away the redo branch first;
/// saving at capacity then evicts the oldest snapshot, so the cursor always
/// ends on the entry just saved. Snapshots are full deep copies, O(width * height).
#[derive(Debug)]
pub struct HistoryManager {
    entries: Vec<HistoryEntry>,
    /// Position of the current snapshot; `None` only while empty
    index: Option<usize>,
    capacity: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl HistoryManager {
    /// Creates an empty history, with the capacity clamped to `1..=MAX_CAPACITY`.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, MAX_CAPACITY);
        Self {
            entries: Vec::new(),
            index: None,
            capacity,
        }
    }

    /// Record a copy of `buffer` as the newest snapshot.
    pub fn save_state(&mut self, buffer: &RasterBuffer) {
        let entry = HistoryEntry::new(buffer.clone());

        if let Some(index) = self.index {
            if index + 1 < self.entries.len() {
                log::debug!(
                    "Discarding {} redo snapshot(s)",
                    self.entries.len() - index - 1
                );
                self.entries.truncate(index + 1);
            }
        }

        if self.entries.len() >= self.capacity {
            // Grows and shrinks by one: the cursor stays put numerically
            self.entries.remove(0);
        } else {
            self.index = Some(self.index.map_or(0, |i| i + 1));
        }
        self.entries.push(entry);

        log::debug!(
            "Saved snapshot {}/{} ({}x{})",
            self.entries.len(),
            self.capacity,
            buffer.width(),
            buffer.height()
        );
    }

    /// Step back one snapshot and return a copy of it, or `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<RasterBuffer> {
        let index = self.index.filter(|&i| i > 0)? - 1;
        self.index = Some(index);
        log::debug!("Undo to snapshot {}", index);
        Some(self.entries[index].buffer.clone())
    }

    /// Step forward one snapshot and return a copy of it, or `None` at the newest entry.
    pub fn redo(&mut self) -> Option<RasterBuffer> {
        let index = self.index.filter(|&i| i + 1 < self.entries.len())? + 1;
        self.index = Some(index);
        log::debug!("Redo to snapshot {}", index);
        Some(self.entries[index].buffer.clone())
    }

    pub fn can_undo(&self) -> bool {
        self.index.is_some_and(|i| i > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.index.is_some_and(|i| i + 1 < self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the current snapshot, `None` while empty
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn current(&self) -> Option<&HistoryEntry> {
        self.index.map(|i| &self.entries[i])
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn buffer_marked(n: u8) -> RasterBuffer {
        let mut buffer = RasterBuffer::new(50, 50, Color::WHITE).unwrap();
        buffer.set_pixel(0, 0, Color::rgb(n, 0, 0)).unwrap();
        buffer
    }

    fn marker(buffer: &RasterBuffer) -> u8 {
        buffer.get_pixel(0, 0).unwrap().r
    }

    #[test]
    fn test_empty_history() {
        let mut history = HistoryManager::default();
        assert!(history.is_empty());
        assert_eq!(history.index(), None);
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert!(history.current().is_none());
    }

    #[test]
    fn test_undo_redo_walks_snapshots() {
        let mut history = HistoryManager::default();
        for n in 1..=3 {
            history.save_state(&buffer_marked(n));
        }

        assert_eq!(marker(&history.undo().unwrap()), 2);
        assert_eq!(marker(&history.undo().unwrap()), 1);
        assert!(history.undo().is_none());
        assert_eq!(history.index(), Some(0));

        assert_eq!(marker(&history.redo().unwrap()), 2);
        assert_eq!(marker(&history.redo().unwrap()), 3);
        assert!(history.redo().is_none());
        assert_eq!(history.index(), Some(2));
    }

    #[test]
    fn test_returned_copies_are_independent() {
        let mut history = HistoryManager::default();
        history.save_state(&buffer_marked(1));
        history.save_state(&buffer_marked(2));

        let mut copy = history.undo().unwrap();
        copy.set_pixel(0, 0, Color::rgb(99, 0, 0)).unwrap();
        assert_eq!(marker(history.current().unwrap().buffer()), 1);
    }

    #[test]
    fn test_saved_snapshot_does_not_alias_live_buffer() {
        let mut history = HistoryManager::default();
        let mut live = buffer_marked(1);
        history.save_state(&live);
        live.set_pixel(0, 0, Color::rgb(7, 0, 0)).unwrap();
        assert_eq!(marker(history.current().unwrap().buffer()), 1);
    }

    #[test]
    fn test_entry_ids_are_unique() {
        let mut history = HistoryManager::default();
        history.save_state(&buffer_marked(1));
        history.save_state(&buffer_marked(1));
        assert_ne!(history.entries()[0].id(), history.entries()[1].id());
    }

    #[test]
    fn test_zero_capacity_keeps_one_entry() {
        let mut history = HistoryManager::new(0);
        history.save_state(&buffer_marked(1));
        history.save_state(&buffer_marked(2));
        assert_eq!(history.len(), 1);
        assert_eq!(history.index(), Some(0));
        assert_eq!(marker(history.current().unwrap().buffer()), 2);
    }

    #[test]
    fn test_huge_capacity_is_clamped() {
        let history = HistoryManager::new(usize::MAX);
        assert_eq!(history.capacity(), MAX_CAPACITY);
        assert!(history.is_empty());
    }
}

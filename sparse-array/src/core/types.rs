//! Shared deterministic types for the sparse array core.
//!
//! These types define stable contracts between core components. They should not
//! depend on external state or I/O and must remain deterministic across runs.

use serde::{Deserialize, Serialize};

/// Per-index storage cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Slot<T> {
    /// No load covering this index has completed yet.
    #[default]
    Unloaded,
    /// Value from the most recent successful load covering this index.
    Loaded(T),
}

impl<T> Slot<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Slot::Loaded(_))
    }
}

/// Half-open index range `[offset, offset + limit)` requested from the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    pub offset: usize,
    pub limit: usize,
}

impl Window {
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    /// Exclusive upper bound.
    pub fn end(&self) -> usize {
        self.offset + self.limit
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.offset && index < self.end()
    }

    pub fn overlaps(&self, other: &Window) -> bool {
        self.offset < other.end() && other.offset < self.end()
    }
}

/// One loader response: the items for `[offset, offset + items.len())` and the
/// total length of the source at the time of the load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: usize) -> Self {
        Self { items, total }
    }
}

/// Payload of a will-change/did-change notification.
///
/// `removed` slots starting at `start` are replaced by `added` slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub start: usize,
    pub removed: usize,
    pub added: usize,
}

impl Change {
    pub fn new(start: usize, removed: usize, added: usize) -> Self {
        Self {
            start,
            removed,
            added,
        }
    }

    /// Length of the sequence after this change is applied to `len`.
    pub fn apply_to_len(&self, len: usize) -> usize {
        len - self.removed + self.added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_contains_is_half_open() {
        let window = Window::new(10, 5);
        assert!(!window.contains(9));
        assert!(window.contains(10));
        assert!(window.contains(14));
        assert!(!window.contains(15));
    }

    #[test]
    fn adjacent_windows_do_not_overlap() {
        let left = Window::new(0, 10);
        assert!(!left.overlaps(&Window::new(10, 10)));
        assert!(left.overlaps(&Window::new(9, 1)));
    }
}

//! Sparse backing store: one [`Slot`] per index in `[0, len)`.

use crate::core::types::Slot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotStore<T> {
    slots: Vec<Slot<T>>,
}

impl<T> Default for SlotStore<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<T> SlotStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slot<T>> {
        self.slots.get(index)
    }

    /// True only for in-bounds `Loaded` slots.
    pub fn is_loaded(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(Slot::is_loaded)
    }

    pub fn loaded_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_loaded()).count()
    }

    /// Grow with `Unloaded` slots or truncate (dropping loaded values) to `len`.
    pub fn resize(&mut self, len: usize) {
        if len < self.slots.len() {
            self.slots.truncate(len);
        } else {
            self.slots.resize_with(len, || Slot::Unloaded);
        }
    }

    /// Overwrite `[offset, offset + items.len())` with loaded values, growing
    /// the store if the range extends past the current length.
    pub fn write(&mut self, offset: usize, items: Vec<T>) {
        let end = offset + items.len();
        if end > self.slots.len() {
            self.resize(end);
        }
        for (slot, item) in self.slots[offset..end].iter_mut().zip(items) {
            *slot = Slot::Loaded(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_past_end_pads_with_unloaded() {
        let mut store = SlotStore::new();
        store.write(3, vec!["d", "e"]);
        assert_eq!(store.len(), 5);
        assert_eq!(store.get(0), Some(&Slot::Unloaded));
        assert_eq!(store.get(4), Some(&Slot::Loaded("e")));
        assert_eq!(store.loaded_count(), 2);
    }

    #[test]
    fn write_overwrites_previous_values() {
        let mut store = SlotStore::new();
        store.write(0, vec![1, 2, 3]);
        store.write(1, vec![20]);
        assert_eq!(store.get(1), Some(&Slot::Loaded(20)));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn truncate_drops_loaded_tail() {
        let mut store = SlotStore::new();
        store.write(0, vec![1, 2, 3, 4]);
        store.resize(2);
        assert_eq!(store.len(), 2);
        assert!(!store.is_loaded(2));
        store.resize(4);
        assert_eq!(store.get(3), Some(&Slot::Unloaded));
    }
}

//! Bookkeeping for in-flight load windows.
//!
//! Windows are selected over unoccupied slots only, so recorded windows never
//! overlap each other.

use crate::core::types::Window;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingLoads {
    windows: Vec<Window>,
}

impl PendingLoads {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, window: Window) {
        debug_assert!(
            !self.windows.iter().any(|pending| pending.overlaps(&window)),
            "pending windows must not overlap"
        );
        self.windows.push(window);
    }

    /// Remove `window`, returning whether it was pending.
    pub fn remove(&mut self, window: Window) -> bool {
        match self.windows.iter().position(|pending| *pending == window) {
            Some(pos) => {
                self.windows.remove(pos);
                true
            }
            None => false,
        }
    }

    /// The in-flight window covering `index`, if any.
    pub fn covering(&self, index: usize) -> Option<Window> {
        self.windows
            .iter()
            .copied()
            .find(|window| window.contains(index))
    }

    pub fn covers(&self, index: usize) -> bool {
        self.covering(index).is_some()
    }

    /// Pending windows sorted by offset.
    pub fn windows(&self) -> Vec<Window> {
        let mut windows = self.windows.clone();
        windows.sort_by_key(|window| window.offset);
        windows
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn clear(&mut self) {
        self.windows.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covering_finds_window_for_inner_index() {
        let mut pending = PendingLoads::new();
        pending.insert(Window::new(10, 10));
        pending.insert(Window::new(40, 5));
        assert_eq!(pending.covering(12), Some(Window::new(10, 10)));
        assert_eq!(pending.covering(44), Some(Window::new(40, 5)));
        assert!(!pending.covers(20));
    }

    #[test]
    fn remove_clears_only_matching_window() {
        let mut pending = PendingLoads::new();
        pending.insert(Window::new(40, 5));
        pending.insert(Window::new(0, 5));
        assert!(!pending.remove(Window::new(0, 4)));
        assert!(pending.remove(Window::new(0, 5)));
        assert_eq!(pending.windows(), vec![Window::new(40, 5)]);
    }
}

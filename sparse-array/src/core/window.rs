//! Deterministic load-range selection.

use crate::core::types::Window;

/// Pick the window to load so that `index` becomes available.
///
/// The candidate window is centered on `index` (`index` sits `batch_size / 2`
/// into it). It is then shrunk to the contiguous run of unoccupied slots that
/// contains `index`: the left edge skips occupied slots (stopping at `index`),
/// and the right edge stops at the first occupied slot or after `batch_size`
/// slots, whichever comes first.
///
/// `occupied(i)` must report slots that are loaded or already covered by an
/// in-flight request. Slots past the known length count as unoccupied, so the
/// window is never clamped to the current length.
///
/// `batch_size` must be positive; `index` itself is expected to be unoccupied.
pub fn select_window(
    index: usize,
    batch_size: usize,
    occupied: impl Fn(usize) -> bool,
) -> Window {
    debug_assert!(batch_size > 0, "batch_size must be > 0");

    let mut start = index.saturating_sub(batch_size / 2);
    while start < index && occupied(start) {
        start += 1;
    }

    let max_end = start + batch_size.max(1);
    let mut end = start + 1;
    while end < max_end && !occupied(end) {
        end += 1;
    }

    Window::new(start, end - start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::Range;

    fn loaded(ranges: &[Range<usize>]) -> impl Fn(usize) -> bool + '_ {
        move |i| ranges.iter().any(|range| range.contains(&i))
    }

    #[test]
    fn initial_window_starts_at_zero() {
        assert_eq!(select_window(0, 33, loaded(&[])), Window::new(0, 33));
    }

    #[test]
    fn skips_loaded_prefix_instead_of_recentering() {
        assert_eq!(select_window(12, 10, loaded(&[0..10])), Window::new(10, 10));
    }

    #[test]
    fn centers_window_in_unloaded_region() {
        assert_eq!(select_window(47, 10, loaded(&[0..10])), Window::new(42, 10));
        assert_eq!(select_window(40, 10, loaded(&[0..10])), Window::new(35, 10));
    }

    #[test]
    fn shrinks_to_single_gap_between_loaded_runs() {
        assert_eq!(select_window(16, 10, loaded(&[0..10])), Window::new(11, 10));
        assert_eq!(
            select_window(10, 10, loaded(&[0..10, 11..21])),
            Window::new(10, 1)
        );
    }

    #[test]
    fn right_edge_stops_at_next_loaded_slot() {
        assert_eq!(select_window(20, 10, loaded(&[23..40])), Window::new(15, 8));
    }

    #[test]
    fn window_may_extend_past_known_length() {
        // Source of 101 items with [0, 20) loaded: nothing stops the right edge.
        assert_eq!(select_window(100, 10, loaded(&[0..20])), Window::new(95, 10));
    }

    #[test]
    fn odd_batch_size_uses_floor_half() {
        assert_eq!(select_window(20, 5, loaded(&[])), Window::new(18, 5));
    }

    #[test]
    fn batch_size_one_loads_only_the_index() {
        assert_eq!(select_window(7, 1, loaded(&[])), Window::new(7, 1));
    }
}

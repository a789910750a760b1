//! Change planning for completed loads.
//!
//! A completed load produces at most two notifications, always in this order:
//! the fill of the loaded range, then the length delta reported by the source.
//! They are never merged, even when adjacent.

use crate::core::types::Change;

/// Notifications to emit for one completed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadPlan {
    /// Replacement of the loaded range (padded with unloaded slots when the
    /// range starts past the current length).
    pub fill: Option<Change>,
    /// Growth or shrinkage of the tail to match the reported total.
    pub length_delta: Option<Change>,
}

/// Plan the notifications for `item_count` items loaded at `offset` into a
/// sequence of `old_len` slots, with the source reporting `total` items.
pub fn plan_load(old_len: usize, offset: usize, item_count: usize, total: usize) -> LoadPlan {
    let fill = if item_count == 0 {
        None
    } else if offset <= old_len {
        let removed = item_count.min(old_len - offset);
        Some(Change::new(offset, removed, item_count))
    } else {
        // Length shrank below this window while it was in flight.
        Some(Change::new(old_len, 0, offset + item_count - old_len))
    };

    let mid = fill
        .map(|change| change.apply_to_len(old_len))
        .unwrap_or(old_len);

    let length_delta = if total > mid {
        Some(Change::new(mid, 0, total - mid))
    } else if total < mid {
        Some(Change::new(total, mid - total, 0))
    } else {
        None
    };

    LoadPlan { fill, length_delta }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn changes(plan: LoadPlan) -> Vec<(usize, usize, usize)> {
        plan.fill
            .into_iter()
            .chain(plan.length_delta)
            .map(|change| (change.start, change.removed, change.added))
            .collect()
    }

    #[test]
    fn first_load_fills_then_grows() {
        let plan = plan_load(0, 0, 10, 100);
        assert_eq!(changes(plan), vec![(0, 0, 10), (10, 0, 90)]);
    }

    #[test]
    fn in_place_fill_replaces_limit_slots() {
        let plan = plan_load(100, 35, 10, 100);
        assert_eq!(changes(plan), vec![(35, 10, 10)]);
    }

    #[test]
    fn growth_in_middle_appends_at_old_length() {
        let plan = plan_load(100, 45, 10, 108);
        assert_eq!(changes(plan), vec![(45, 10, 10), (100, 0, 8)]);
    }

    #[test]
    fn growth_at_end_extends_fill_past_old_length() {
        let plan = plan_load(100, 94, 10, 108);
        assert_eq!(changes(plan), vec![(94, 6, 10), (104, 0, 4)]);
    }

    #[test]
    fn shrink_in_middle_removes_tail_at_new_length() {
        let plan = plan_load(100, 45, 10, 80);
        assert_eq!(changes(plan), vec![(45, 10, 10), (80, 20, 0)]);
    }

    #[test]
    fn shrink_at_end_fills_short_page() {
        let plan = plan_load(100, 73, 7, 80);
        assert_eq!(changes(plan), vec![(73, 7, 7), (80, 20, 0)]);
    }

    #[test]
    fn empty_page_only_reports_length_delta() {
        let plan = plan_load(100, 60, 0, 50);
        assert_eq!(plan.fill, None);
        assert_eq!(changes(plan), vec![(50, 50, 0)]);
    }

    #[test]
    fn stale_window_past_length_pads_with_unloaded_slots() {
        let plan = plan_load(50, 60, 5, 70);
        assert_eq!(changes(plan), vec![(50, 0, 15), (65, 0, 5)]);
    }

    #[test]
    fn unchanged_length_and_no_items_plans_nothing() {
        let plan = plan_load(10, 10, 0, 10);
        assert_eq!(plan.fill, None);
        assert_eq!(plan.length_delta, None);
    }
}

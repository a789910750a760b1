//! Change observers.
//!
//! Every store mutation is bracketed by exactly one `will_change` (before the
//! store is touched) and one `did_change` (after), with identical arguments.

use crate::core::types::{Change, Window};

pub trait ArrayObserver {
    fn will_change(&mut self, change: Change);

    fn did_change(&mut self, change: Change);

    /// A load was rejected by the loader. Its window is no longer pending.
    fn load_failed(&mut self, _window: Window, _error: &anyhow::Error) {}
}

/// Handle returned by [`ObserverSet::add`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Observers in subscription order.
#[derive(Default)]
pub struct ObserverSet {
    next_id: u64,
    observers: Vec<(ObserverId, Box<dyn ArrayObserver>)>,
}

impl ObserverSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, observer: Box<dyn ArrayObserver>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    pub fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    pub fn will_change(&mut self, change: Change) {
        for (_, observer) in &mut self.observers {
            observer.will_change(change);
        }
    }

    pub fn did_change(&mut self, change: Change) {
        for (_, observer) in &mut self.observers {
            observer.did_change(change);
        }
    }

    pub fn load_failed(&mut self, window: Window, error: &anyhow::Error) {
        for (_, observer) in &mut self.observers {
            observer.load_failed(window, error);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn clear(&mut self) {
        self.observers.clear();
    }
}

impl std::fmt::Debug for ObserverSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverSet")
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Tagged {
        tag: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl ArrayObserver for Tagged {
        fn will_change(&mut self, change: Change) {
            self.log
                .borrow_mut()
                .push(format!("{} will {}", self.tag, change.start));
        }

        fn did_change(&mut self, change: Change) {
            self.log
                .borrow_mut()
                .push(format!("{} did {}", self.tag, change.start));
        }
    }

    #[test]
    fn notifies_in_subscription_order_and_supports_removal() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut set = ObserverSet::new();
        let a = set.add(Box::new(Tagged {
            tag: "a",
            log: Rc::clone(&log),
        }));
        set.add(Box::new(Tagged {
            tag: "b",
            log: Rc::clone(&log),
        }));

        set.will_change(Change::new(3, 0, 1));
        assert!(set.remove(a));
        assert!(!set.remove(a));
        set.did_change(Change::new(3, 0, 1));

        assert_eq!(*log.borrow(), vec!["a will 3", "b will 3", "b did 3"]);
    }
}

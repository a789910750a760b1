//! Test-only doubles for the loader and observer capabilities.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use anyhow::{Result, anyhow};

use crate::core::types::{Change, Page, Window};
use crate::loader::Loader;
use crate::observer::ArrayObserver;

/// Mutable in-memory page source that records every load call.
///
/// Pages are sliced when `load` is called, so mutations made after a call do
/// not affect the page it resolves to. Clones share state.
#[derive(Debug, Clone)]
pub struct FixtureSource<T = usize> {
    items: Rc<RefCell<Vec<T>>>,
    calls: Rc<RefCell<Vec<(usize, usize)>>>,
    failures: Rc<RefCell<VecDeque<String>>>,
}

impl FixtureSource {
    /// Source of `0..len`.
    pub fn with_len(len: usize) -> Self {
        Self::new((0..len).collect())
    }
}

impl<T: Clone + 'static> FixtureSource<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Rc::new(RefCell::new(items)),
            calls: Rc::new(RefCell::new(Vec::new())),
            failures: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    pub fn loader(&self) -> impl Loader<T> + use<T> {
        let source = self.clone();
        move |offset: usize, limit: usize| {
            let result = source.page(offset, limit);
            async move { result }
        }
    }

    /// Record the call and slice the current fixtures.
    pub fn page(&self, offset: usize, limit: usize) -> Result<Page<T>> {
        self.calls.borrow_mut().push((offset, limit));
        if let Some(message) = self.failures.borrow_mut().pop_front() {
            return Err(anyhow!(message));
        }
        let items = self.items.borrow();
        let start = offset.min(items.len());
        let end = (offset + limit).min(items.len());
        Ok(Page::new(items[start..end].to_vec(), items.len()))
    }

    /// Reject the next load with `message`.
    pub fn fail_next(&self, message: &str) {
        self.failures.borrow_mut().push_back(message.to_string());
    }

    pub fn push(&self, item: T) {
        self.items.borrow_mut().push(item);
    }

    pub fn extend(&self, items: impl IntoIterator<Item = T>) {
        self.items.borrow_mut().extend(items);
    }

    pub fn truncate(&self, len: usize) {
        self.items.borrow_mut().truncate(len);
    }

    /// Remove `count` items starting at `start`.
    pub fn splice_out(&self, start: usize, count: usize) {
        let mut items = self.items.borrow_mut();
        let end = (start + count).min(items.len());
        items.drain(start.min(end)..end);
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Drain the recorded `(offset, limit)` calls.
    pub fn take_calls(&self) -> Vec<(usize, usize)> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }
}

/// One observed notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObservedEvent {
    Will(Change),
    Did(Change),
    Failed(Window),
}

/// Observer that records every notification. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Rc<RefCell<Vec<ObservedEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ObservedEvent> {
        self.events.borrow().clone()
    }

    pub fn will_changes(&self) -> Vec<(usize, usize, usize)> {
        self.collect(|event| match event {
            ObservedEvent::Will(change) => Some(*change),
            _ => None,
        })
    }

    pub fn did_changes(&self) -> Vec<(usize, usize, usize)> {
        self.collect(|event| match event {
            ObservedEvent::Did(change) => Some(*change),
            _ => None,
        })
    }

    pub fn failures(&self) -> Vec<Window> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                ObservedEvent::Failed(window) => Some(*window),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn collect(
        &self,
        pick: impl Fn(&ObservedEvent) -> Option<Change>,
    ) -> Vec<(usize, usize, usize)> {
        self.events
            .borrow()
            .iter()
            .filter_map(pick)
            .map(|change| (change.start, change.removed, change.added))
            .collect()
    }
}

impl ArrayObserver for RecordingObserver {
    fn will_change(&mut self, change: Change) {
        self.events.borrow_mut().push(ObservedEvent::Will(change));
    }

    fn did_change(&mut self, change: Change) {
        self.events.borrow_mut().push(ObservedEvent::Did(change));
    }

    fn load_failed(&mut self, window: Window, _error: &anyhow::Error) {
        self.events.borrow_mut().push(ObservedEvent::Failed(window));
    }
}

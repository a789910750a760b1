//! The sparse array: a windowed view over an asynchronous page source.
//!
//! Reads are synchronous. A read of an unloaded slot returns
//! [`Entry::Unloaded`] and issues a load for a window around it, unless an
//! in-flight load already covers it. Loads resolve only when the owner drives
//! them with [`SparseArray::complete_next`] or [`SparseArray::settle`]; each
//! completion is applied in completion order, on the caller's task.

use futures::FutureExt;
use futures::StreamExt;
use futures::future::LocalBoxFuture;
use futures::stream::FuturesUnordered;
use tracing::{debug, trace, warn};

use crate::config::SparseArrayConfig;
use crate::core::diff::plan_load;
use crate::core::pending::PendingLoads;
use crate::core::store::SlotStore;
use crate::core::types::{Change, Page, Slot, Window};
use crate::core::window::select_window;
use crate::error::{Result, SparseArrayError};
use crate::loader::Loader;
use crate::observer::{ArrayObserver, ObserverId, ObserverSet};

/// Result of reading one index.
#[derive(Debug, PartialEq, Eq)]
pub enum Entry<'a, T> {
    Loaded(&'a T),
    /// In bounds but not loaded yet; a load covering it is in flight.
    Unloaded,
    /// Outside `[0, len)`. No load is issued.
    OutOfBounds,
}

impl<'a, T> Entry<'a, T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Entry::Loaded(_))
    }

    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, Entry::OutOfBounds)
    }

    pub fn value(&self) -> Option<&'a T> {
        match self {
            Entry::Loaded(value) => Some(*value),
            Entry::Unloaded | Entry::OutOfBounds => None,
        }
    }
}

type InFlight<T> = LocalBoxFuture<'static, (Window, anyhow::Result<Page<T>>)>;

pub struct SparseArray<T> {
    batch_size: usize,
    loader: Box<dyn Loader<T>>,
    store: SlotStore<T>,
    pending: PendingLoads,
    in_flight: FuturesUnordered<InFlight<T>>,
    observers: ObserverSet,
    is_loaded: bool,
    disposed: bool,
}

impl<T: 'static> SparseArray<T> {
    /// Create the array and immediately issue the initial load of
    /// `[0, batch_size)`.
    pub fn new(config: SparseArrayConfig, loader: impl Loader<T> + 'static) -> Result<Self> {
        config.validate()?;
        let mut array = Self {
            batch_size: config.batch_size,
            loader: Box::new(loader),
            store: SlotStore::new(),
            pending: PendingLoads::new(),
            in_flight: FuturesUnordered::new(),
            observers: ObserverSet::new(),
            is_loaded: false,
            disposed: false,
        };
        array.request(Window::new(0, array.batch_size));
        Ok(array)
    }

    pub fn with_batch_size(batch_size: usize, loader: impl Loader<T> + 'static) -> Result<Self> {
        Self::new(SparseArrayConfig::with_batch_size(batch_size), loader)
    }

    /// Known length: the `total` reported by the most recent completed load.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// True once the first load has completed.
    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn loaded_count(&self) -> usize {
        self.store.loaded_count()
    }

    /// In-flight windows sorted by offset.
    pub fn pending_windows(&self) -> Vec<Window> {
        self.pending.windows()
    }

    pub fn has_pending_loads(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn add_observer(&mut self, observer: Box<dyn ArrayObserver>) -> ObserverId {
        self.observers.add(observer)
    }

    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    /// Read `index`, issuing a load when it is in bounds but unloaded.
    ///
    /// Until a load has succeeded the length is 0 and every read is out of
    /// bounds; such a read re-issues the initial window if it is no longer in
    /// flight (the initial load failed).
    pub fn object_at(&mut self, index: usize) -> Entry<'_, T> {
        if self.disposed {
            return Entry::OutOfBounds;
        }
        if index >= self.store.len() {
            if !self.is_loaded && self.pending.is_empty() {
                debug!(index, "retrying initial load");
                self.request(Window::new(0, self.batch_size));
            }
            return Entry::OutOfBounds;
        }
        if !self.store.is_loaded(index) {
            self.ensure_requested(index);
            return Entry::Unloaded;
        }
        self.peek(index)
    }

    /// Signed variant of [`object_at`](Self::object_at); negative indices are
    /// out of bounds.
    pub fn object_at_signed(&mut self, index: i64) -> Entry<'_, T> {
        match usize::try_from(index) {
            Ok(index) => self.object_at(index),
            Err(_) => Entry::OutOfBounds,
        }
    }

    /// Read `index` without issuing a load.
    pub fn peek(&self, index: usize) -> Entry<'_, T> {
        if self.disposed {
            return Entry::OutOfBounds;
        }
        match self.store.get(index) {
            Some(Slot::Loaded(value)) => Entry::Loaded(value),
            Some(Slot::Unloaded) => Entry::Unloaded,
            None => Entry::OutOfBounds,
        }
    }

    /// Apply the next load to complete.
    ///
    /// Returns `None` when nothing is in flight (or the array is disposed).
    /// A rejected load yields [`SparseArrayError::LoadFailure`]; its window is
    /// no longer pending.
    pub async fn complete_next(&mut self) -> Option<Result<Window>> {
        if self.disposed {
            return None;
        }
        let (window, result) = self.in_flight.next().await?;
        Some(self.apply(window, result))
    }

    /// Apply completions until nothing is in flight.
    ///
    /// Stops at the first failed load and returns it; loads still in flight
    /// stay pending for the next call.
    pub async fn settle(&mut self) -> Result<()> {
        while let Some(result) = self.complete_next().await {
            result?;
        }
        Ok(())
    }

    /// Release observers and drop in-flight loads. The array stops mutating:
    /// reads return [`Entry::OutOfBounds`] and issue no loads.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        debug!(
            pending = self.pending.len(),
            observers = self.observers.len(),
            "disposing sparse array"
        );
        self.disposed = true;
        self.observers.clear();
        self.pending.clear();
        self.in_flight = FuturesUnordered::new();
    }

    fn ensure_requested(&mut self, index: usize) {
        if let Some(window) = self.pending.covering(index) {
            trace!(
                index,
                offset = window.offset,
                limit = window.limit,
                "read coalesced into pending load"
            );
            return;
        }
        let store = &self.store;
        let pending = &self.pending;
        let window = select_window(index, self.batch_size, |i| {
            store.is_loaded(i) || pending.covers(i)
        });
        self.request(window);
    }

    fn request(&mut self, window: Window) {
        debug!(offset = window.offset, limit = window.limit, "issuing load");
        self.pending.insert(window);
        let load = self.loader.load(window.offset, window.limit);
        self.in_flight
            .push(async move { (window, load.await) }.boxed_local());
    }

    fn apply(&mut self, window: Window, result: anyhow::Result<Page<T>>) -> Result<Window> {
        self.pending.remove(window);
        match result {
            Ok(page) => {
                self.apply_page(window, page);
                Ok(window)
            }
            Err(source) => {
                let message = format!("{source:#}");
                warn!(
                    offset = window.offset,
                    limit = window.limit,
                    error = %message,
                    "load failed"
                );
                self.observers.load_failed(window, &source);
                Err(SparseArrayError::LoadFailure { window, source })
            }
        }
    }

    fn apply_page(&mut self, window: Window, page: Page<T>) {
        let Page { mut items, total } = page;
        if items.len() > window.limit {
            warn!(
                offset = window.offset,
                limit = window.limit,
                received = items.len(),
                "loader returned more items than requested; truncating"
            );
            items.truncate(window.limit);
        }

        let old_len = self.store.len();
        let plan = plan_load(old_len, window.offset, items.len(), total);

        if let Some(change) = plan.fill {
            self.mutate(change, |store| store.write(window.offset, items));
        }
        if let Some(change) = plan.length_delta {
            self.mutate(change, |store| store.resize(total));
        }
        debug_assert_eq!(self.store.len(), total);

        self.is_loaded = true;
        debug!(
            offset = window.offset,
            limit = window.limit,
            old_len,
            len = total,
            "load applied"
        );
    }

    fn mutate(&mut self, change: Change, apply: impl FnOnce(&mut SlotStore<T>)) {
        trace!(
            start = change.start,
            removed = change.removed,
            added = change.added,
            "array change"
        );
        self.observers.will_change(change);
        apply(&mut self.store);
        self.observers.did_change(change);
    }
}

impl<T> std::fmt::Debug for SparseArray<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SparseArray")
            .field("batch_size", &self.batch_size)
            .field("len", &self.store.len())
            .field("loaded", &self.store.loaded_count())
            .field("pending", &self.pending)
            .field("is_loaded", &self.is_loaded)
            .field("disposed", &self.disposed)
            .finish()
    }
}

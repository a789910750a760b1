//! In-memory page source with optional simulated latency.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use sparse_array::{Loader, Page};
use tracing::debug;

use crate::report::{ProbeEvent, Reporter};

/// Source of `0..len` whose length can change between loads.
///
/// Pages are sliced when the load is issued; the latency only delays
/// delivery.
#[derive(Debug, Clone)]
pub struct ProbeSource {
    items: Rc<RefCell<Vec<u64>>>,
    latency: Duration,
    reporter: Reporter,
}

impl ProbeSource {
    pub fn new(len: usize, latency: Duration, reporter: Reporter) -> Self {
        Self {
            items: Rc::new(RefCell::new((0..len as u64).collect())),
            latency,
            reporter,
        }
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    /// Append `count` items continuing the `0..len` numbering.
    pub fn push(&self, count: usize) {
        let mut items = self.items.borrow_mut();
        let next = items.len() as u64;
        items.extend(next..next + count as u64);
    }

    pub fn truncate(&self, len: usize) {
        self.items.borrow_mut().truncate(len);
    }

    fn page(&self, offset: usize, limit: usize) -> Page<u64> {
        let items = self.items.borrow();
        let start = offset.min(items.len());
        let end = (offset + limit).min(items.len());
        Page::new(items[start..end].to_vec(), items.len())
    }

    pub fn loader(&self) -> impl Loader<u64> + use<> {
        let source = self.clone();
        move |offset: usize, limit: usize| {
            source.reporter.emit(&ProbeEvent::Load { offset, limit });
            let page = source.page(offset, limit);
            let latency = source.latency;
            async move {
                if !latency.is_zero() {
                    tokio::time::sleep(latency).await;
                }
                debug!(
                    offset,
                    limit,
                    items = page.items.len(),
                    total = page.total,
                    "page delivered"
                );
                Ok::<_, anyhow::Error>(page)
            }
        }
    }
}

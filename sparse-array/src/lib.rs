//! Lazily-populated, windowed array over an asynchronous page source.
//!
//! A [`SparseArray`] exposes a logical sequence of `len` items but only holds
//! the batches that reads have asked for. Reading an unloaded index issues a
//! load for a window around it, coalescing reads that fall inside a load
//! already in flight. Every mutation of the visible sequence is reported to
//! observers as a will-change/did-change pair. The architecture enforces a
//! strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (window selection, change
//!   planning, slot storage, pending bookkeeping). No async, fully testable in
//!   isolation.
//! - **[`array`]**: Orchestration: issues loads through the injected
//!   [`Loader`], applies completions and notifies [`ArrayObserver`]s.

pub mod array;
pub mod config;
pub mod core;
pub mod error;
pub mod loader;
pub mod logging;
pub mod observer;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use array::{Entry, SparseArray};
pub use config::SparseArrayConfig;
pub use crate::core::types::{Change, Page, Slot, Window};
pub use error::{Result, SparseArrayError};
pub use loader::Loader;
pub use observer::{ArrayObserver, ObserverId};

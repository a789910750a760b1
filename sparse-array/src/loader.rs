//! The injected range-fetch capability.

use std::future::Future;

use anyhow::Result;
use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::core::types::Page;

/// Asynchronous source of pages.
///
/// `load(offset, limit)` must resolve to at most `limit` items starting at
/// `offset`, plus the current total length of the source. It may be called
/// again for a disjoint range before earlier calls resolve.
pub trait Loader<T> {
    fn load(&self, offset: usize, limit: usize) -> LocalBoxFuture<'static, Result<Page<T>>>;
}

impl<T, F, Fut> Loader<T> for F
where
    F: Fn(usize, usize) -> Fut,
    Fut: Future<Output = Result<Page<T>>> + 'static,
{
    fn load(&self, offset: usize, limit: usize) -> LocalBoxFuture<'static, Result<Page<T>>> {
        self(offset, limit).boxed_local()
    }
}

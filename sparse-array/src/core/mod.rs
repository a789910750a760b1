//! Deterministic, pure logic behind the sparse array.
//!
//! Core modules must be free of I/O and async side effects. They operate on
//! in-memory data structures and return deterministic outputs suitable for
//! tests.

pub mod diff;
pub mod pending;
pub mod store;
pub mod types;
pub mod window;

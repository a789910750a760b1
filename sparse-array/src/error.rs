//! Error kinds surfaced by the sparse array.
//!
//! Reading past the end is not an error: it yields
//! [`Entry::OutOfBounds`](crate::array::Entry::OutOfBounds).

use std::fmt;

use crate::core::types::Window;

pub type Result<T> = std::result::Result<T, SparseArrayError>;

#[derive(Debug)]
pub enum SparseArrayError {
    /// The configuration cannot drive a sparse array (e.g. `batch_size == 0`).
    InvalidConfiguration(String),
    /// The loader rejected a request. The window is no longer pending, so a
    /// later read of the same range issues a fresh load.
    LoadFailure {
        window: Window,
        source: anyhow::Error,
    },
}

impl SparseArrayError {
    pub fn window(&self) -> Option<Window> {
        match self {
            Self::LoadFailure { window, .. } => Some(*window),
            Self::InvalidConfiguration(_) => None,
        }
    }
}

impl fmt::Display for SparseArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
            Self::LoadFailure { window, .. } => write!(
                f,
                "load failed for offset {} limit {}",
                window.offset, window.limit
            ),
        }
    }
}

impl std::error::Error for SparseArrayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::LoadFailure { source, .. } => Some(&**source),
            Self::InvalidConfiguration(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn load_failure_exposes_loader_error_as_source() {
        let err = SparseArrayError::LoadFailure {
            window: Window::new(10, 5),
            source: anyhow::anyhow!("connection reset"),
        };
        assert_eq!(err.to_string(), "load failed for offset 10 limit 5");
        assert_eq!(
            err.source().map(|source| source.to_string()),
            Some("connection reset".to_string())
        );
        assert_eq!(err.window(), Some(Window::new(10, 5)));
    }
}

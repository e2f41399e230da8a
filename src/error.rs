//! Error type shared by the operators, the demo runner and the CLIs.

use thiserror::Error;

/// Errors raised while building or running a stream demo.
#[derive(Debug, Error)]
pub enum StreamError {
    /// A demo or category name that is not in the catalogue.
    #[error("unknown demo '{0}' (try --list)")]
    UnknownDemo(String),

    /// An operator count that the operator cannot work with.
    #[error("{operator} count must be at least 1, got {count}")]
    InvalidCount { operator: &'static str, count: usize },

    /// A `range` whose last value does not fit in an `i32`.
    #[error("range starting at {start} with {count} values overflows i32")]
    RangeOverflow { start: i32, count: u32 },

    /// A demo that has no record-typed stage chain.
    #[error("{0} cannot run on the push executor")]
    NotPushable(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

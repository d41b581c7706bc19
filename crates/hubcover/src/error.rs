//! Error taxonomy for the cover engine.
//!
//! Four outcomes only: bad caller input, an instance that provably has no
//! cover, caller-requested cancellation, and internal invariant breakage.
//! Nothing is retried; the computation is deterministic.

use thiserror::Error;

/// Result type for cover operations.
pub type CoverResult<T> = Result<T, CoverError>;

/// Errors surfaced by coverage construction, modeling, and search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoverError {
    /// Malformed matrix, threshold, or cost vector. Caller's fault; never
    /// reached by well-formed input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Some universe element is covered by no candidate. A property of the
    /// data, reported with the first offending element.
    #[error("infeasible instance: element {element} is covered by no candidate")]
    Infeasible {
        /// Lowest-index universe element with an empty covering list.
        element: usize,
    },

    /// The caller's cancellation token fired. No partial cover is returned.
    #[error("solve cancelled")]
    Cancelled,

    /// Internal bug: a produced cover failed validation. Must never occur.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

//! Error types for the economy engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during engine startup and the tick loop.

/// Top-level error for the economy engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Tick driver startup failed.
    #[error("driver error: {source}")]
    Driver {
        /// The underlying runner error.
        #[from]
        source: hamlet_core::RunnerError,
    },
}

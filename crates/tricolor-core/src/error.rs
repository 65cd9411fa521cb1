//! Pipeline error types.
//!
//! None of these are fatal: each one maps onto a fallback the pipeline
//! applies while it keeps rendering.

use thiserror::Error;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Recoverable failures of the color pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// No usable color configuration; the registry falls back to raw.
    #[error("no color configuration available: {reason}")]
    ConfigUnavailable {
        /// Why the configuration could not be used.
        reason: String,
    },

    /// The configuration could not build a src -> dst transform.
    #[error("cannot build transform {src} -> {dst}: {reason}")]
    TransformBuild {
        /// Source color space.
        src: String,
        /// Destination color space.
        dst: String,
        /// Underlying cause.
        reason: String,
    },

    /// The transform was built but evaluating it failed.
    #[error("transform {src} -> {dst} failed: {reason}")]
    TransformEval {
        /// Source color space.
        src: String,
        /// Destination color space.
        dst: String,
        /// Underlying cause.
        reason: String,
    },

    /// Selection index outside the color space list.
    #[error("selection index {index} out of range (0..{len})")]
    InvalidSelection {
        /// Requested index.
        index: usize,
        /// Number of selectable spaces.
        len: usize,
    },
}
